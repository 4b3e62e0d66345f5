use crate::model::{Schedule, ShiftKind, ShiftTally, WorkerId};
use chrono::NaiveDate;

/// Statut d'un membre pour `date`. Priorité de lecture : repos demandé,
/// jour, nuit ; sinon repos ordinaire (y compris date absente).
pub fn shift_of(schedule: &Schedule, date: NaiveDate, worker: &WorkerId) -> ShiftKind {
    let Some(day) = schedule.days.get(&date) else {
        return ShiftKind::PublicOff;
    };
    [ShiftKind::RequestedOff, ShiftKind::Day, ShiftKind::Night]
        .into_iter()
        .find(|kind| day.members(*kind).contains(worker))
        .unwrap_or(ShiftKind::PublicOff)
}

impl Schedule {
    pub fn shift_of(&self, date: NaiveDate, worker: &WorkerId) -> ShiftKind {
        shift_of(self, date, worker)
    }

    /// Ligne du membre, jour 1 à N.
    pub fn row(&self, worker: &WorkerId) -> Vec<ShiftKind> {
        self.days.keys().map(|date| shift_of(self, *date, worker)).collect()
    }

    pub fn tally(&self, worker: &WorkerId) -> ShiftTally {
        self.row(worker)
            .into_iter()
            .fold(ShiftTally::default(), |mut acc, kind| {
                match kind {
                    ShiftKind::Day => acc.day += 1,
                    ShiftKind::Night => acc.night += 1,
                    ShiftKind::RequestedOff => acc.requested_off += 1,
                    ShiftKind::PublicOff => acc.public_off += 1,
                }
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DaySchedule;
    use std::collections::BTreeMap;

    #[test]
    fn requested_off_wins_over_other_sets() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let a = WorkerId::new("a");
        let b = WorkerId::new("b");
        let day = DaySchedule {
            day: vec![a.clone(), b.clone()],
            requested_off: vec![a.clone()],
            ..DaySchedule::default()
        };
        let schedule = Schedule {
            year: 2025,
            month: 6,
            days: BTreeMap::from([(date, day)]),
            warnings: Vec::new(),
        };
        assert_eq!(shift_of(&schedule, date, &a), ShiftKind::RequestedOff);
        assert_eq!(shift_of(&schedule, date, &b), ShiftKind::Day);
        assert_eq!(shift_of(&schedule, date, &WorkerId::new("z")), ShiftKind::PublicOff);
        assert_eq!(
            shift_of(&schedule, date.succ_opt().unwrap(), &a),
            ShiftKind::PublicOff
        );
        assert_eq!(schedule.tally(&b).day, 1);
    }
}
