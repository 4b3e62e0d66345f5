#![forbid(unsafe_code)]
//! Shiftkan — génération de plannings mensuels jour/nuit.
//!
//! - Souhaits de repos (prioritaires ou ordinaires), toujours accordés.
//! - Effectifs requis semaine / week-end, jours fériés optionnellement traités en week-end.
//! - Repos minimal : pas de service de jour après une nuit.
//! - Effectifs non atteints = avertissements, jamais d'échec.
//! - Import CSV, export TSV (BOM) et JSON avec la feature `serde`.

pub mod calendar;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod scheduler;
#[cfg(feature = "serde")]
pub mod storage;

pub use model::{
    DaySchedule, OffRequest, PriorityWorkerSet, Project, Schedule, ScheduleWarning, ShiftKind,
    ShiftTally, StaffingPolicy, Worker, WorkerId,
};
pub use scheduler::{AssignOptions, Conflict, ConflictKind, SchedError, Scheduler, TieBreak};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage};
