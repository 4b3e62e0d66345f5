use super::requests::{resolve_request, Resolution};
use super::{AssignOptions, SchedError, Scheduler, TieBreak};
use crate::calendar;
use crate::model::{DaySchedule, PriorityWorkerSet, Schedule, ScheduleWarning, ShiftKind, Worker};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap};

/// État d'un membre pendant une génération ; jeté à la fin.
struct WorkerState<'a> {
    worker: &'a Worker,
    shifts: HashMap<NaiveDate, ShiftKind>,
    day_total: u32,
    night_total: u32,
}

impl<'a> WorkerState<'a> {
    fn new(worker: &'a Worker) -> Self {
        Self {
            worker,
            shifts: HashMap::new(),
            day_total: 0,
            night_total: 0,
        }
    }

    fn is_free(&self, date: NaiveDate) -> bool {
        !self.shifts.contains_key(&date)
    }

    fn assign(&mut self, date: NaiveDate, kind: ShiftKind, day: &mut DaySchedule) {
        self.shifts.insert(date, kind);
        match kind {
            ShiftKind::Day => self.day_total += 1,
            ShiftKind::Night => self.night_total += 1,
            ShiftKind::RequestedOff | ShiftKind::PublicOff => {}
        }
        day.push(kind, self.worker.id.clone());
    }
}

pub(super) fn generate(
    scheduler: &Scheduler,
    year: i32,
    month: u32,
    opts: AssignOptions,
) -> Result<Schedule, SchedError> {
    let dates = calendar::month_dates(year, month);
    if dates.is_empty() {
        return Err(SchedError::InvalidMonth { year, month });
    }
    if scheduler.workers.is_empty() {
        return Err(SchedError::EmptyRoster);
    }

    let mut states: Vec<WorkerState<'_>> =
        scheduler.workers.iter().map(WorkerState::new).collect();
    let mut days: BTreeMap<NaiveDate, DaySchedule> =
        dates.iter().map(|d| (*d, DaySchedule::default())).collect();
    let mut rng = match opts.tie_break {
        TieBreak::ById => None,
        TieBreak::Shuffled { seed } => Some(StdRng::seed_from_u64(seed)),
    };

    // Passe 1 : souhaits de repos sur tout le mois avant toute affectation.
    for date in &dates {
        let day = days.entry(*date).or_default();
        grant_off_requests(&mut states, *date, &scheduler.priority, day);
    }

    // Passe 2 : jour, nuit puis repos ordinaire, date par date.
    let mut warnings = Vec::new();
    let mut previous: Option<NaiveDate> = None;
    for date in &dates {
        let (need_day, need_night) = scheduler.policy.required_staffing(*date);
        tracing::debug!(%date, need_day, need_night, "staffing date");
        let day = days.entry(*date).or_default();

        for (kind, need) in [(ShiftKind::Day, need_day), (ShiftKind::Night, need_night)] {
            let got = assign_shift(&mut states, *date, previous, kind, need, rng.as_mut(), day);
            if got < need {
                warnings.push(shortfall(*date, kind, need, got));
            }
        }
        fill_public_off(&mut states, *date, day);
        previous = Some(*date);
    }

    tracing::info!(
        year,
        month,
        days = dates.len(),
        warnings = warnings.len(),
        "schedule generated"
    );
    Ok(Schedule {
        year,
        month,
        days,
        warnings,
    })
}

/// Accorde sans plafond tous les souhaits : prioritaires d'abord, ordinaires ensuite.
fn grant_off_requests(
    states: &mut [WorkerState<'_>],
    date: NaiveDate,
    priority: &PriorityWorkerSet,
    day: &mut DaySchedule,
) {
    for wanted in [Resolution::PriorityOff, Resolution::OrdinaryOff] {
        for state in states.iter_mut() {
            if state.is_free(date) && resolve_request(state.worker, date, priority) == wanted {
                state.assign(date, ShiftKind::RequestedOff, day);
            }
        }
    }
}

/// Affecte jusqu'à `required` membres libres sur `kind` (jour ou nuit) et
/// retourne le nombre effectivement affecté.
fn assign_shift(
    states: &mut [WorkerState<'_>],
    date: NaiveDate,
    previous: Option<NaiveDate>,
    kind: ShiftKind,
    required: u32,
    rng: Option<&mut StdRng>,
    day: &mut DaySchedule,
) -> u32 {
    let mut pool: Vec<usize> = (0..states.len()).filter(|&i| states[i].is_free(date)).collect();
    let load = |i: usize| match kind {
        ShiftKind::Day => states[i].day_total,
        _ => states[i].night_total,
    };
    match rng {
        Some(rng) => {
            pool.shuffle(rng);
            pool.sort_by_key(|&i| load(i));
        }
        None => pool.sort_by(|&a, &b| {
            load(a)
                .cmp(&load(b))
                .then_with(|| states[a].worker.id.cmp(&states[b].worker.id))
        }),
    }

    let mut assigned = 0u32;
    for i in pool {
        if assigned >= required {
            break;
        }
        // repos : pas de jour juste après une nuit
        let after_night = previous
            .is_some_and(|prev| states[i].shifts.get(&prev) == Some(&ShiftKind::Night));
        if kind == ShiftKind::Day && after_night {
            continue;
        }
        states[i].assign(date, kind, day);
        assigned += 1;
    }
    assigned
}

fn fill_public_off(states: &mut [WorkerState<'_>], date: NaiveDate, day: &mut DaySchedule) {
    for state in states.iter_mut().filter(|s| s.is_free(date)) {
        state.assign(date, ShiftKind::PublicOff, day);
    }
}

fn shortfall(date: NaiveDate, shift: ShiftKind, required: u32, actual: u32) -> ScheduleWarning {
    tracing::warn!(%date, %shift, required, actual, "staffing shortfall");
    ScheduleWarning {
        date,
        shift,
        required,
        actual,
    }
}
