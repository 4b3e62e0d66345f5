use crate::model::WorkerId;
use chrono::NaiveDate;
use thiserror::Error;

/// Départage des candidats à compteur égal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Ordre croissant des identifiants (reproductible).
    #[default]
    ById,
    /// Mélange pseudo-aléatoire, reproductible pour une graine donnée.
    Shuffled { seed: u64 },
}

/// Options d'assignation
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignOptions {
    pub tie_break: TieBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Unassigned,
    DoubleAssignment,
    RestViolation,
    PriorityIgnored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub worker: WorkerId,
    pub date: NaiveDate,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("cannot generate: worker roster is empty")]
    EmptyRoster,
    #[error("cannot generate: invalid target month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
}
