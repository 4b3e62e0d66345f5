use super::requests::{resolve_request, Resolution};
use super::{Conflict, ConflictKind, Scheduler};
use crate::model::{DaySchedule, Schedule, ShiftKind};
use chrono::NaiveDate;

const ALL_KINDS: [ShiftKind; 4] = [
    ShiftKind::Day,
    ShiftKind::Night,
    ShiftKind::RequestedOff,
    ShiftKind::PublicOff,
];

pub(super) fn detect_conflicts(scheduler: &Scheduler, schedule: &Schedule) -> Vec<Conflict> {
    let mut out = Vec::new();

    for worker in scheduler.workers.iter() {
        let mut previous = None;
        for (date, day) in &schedule.days {
            // occurrences, pas seulement appartenance : `[a, a]` compte double
            let memberships: usize = ALL_KINDS
                .iter()
                .map(|kind| day.members(*kind).iter().filter(|id| *id == &worker.id).count())
                .sum();
            let mut push = |kind| {
                out.push(Conflict {
                    worker: worker.id.clone(),
                    date: *date,
                    kind,
                })
            };

            match memberships {
                0 => push(ConflictKind::Unassigned),
                1 => {}
                _ => push(ConflictKind::DoubleAssignment),
            }

            let worked_night = previous.is_some_and(|(prev, prev_day): (NaiveDate, &DaySchedule)| {
                prev.succ_opt() == Some(*date) && prev_day.night.contains(&worker.id)
            });
            if worked_night && day.day.contains(&worker.id) {
                push(ConflictKind::RestViolation);
            }

            if resolve_request(worker, *date, &scheduler.priority) == Resolution::PriorityOff
                && !day.requested_off.contains(&worker.id)
            {
                push(ConflictKind::PriorityIgnored);
            }

            previous = Some((*date, day));
        }
    }

    out
}
