mod assignment;
mod conflicts;
mod policy;
mod query;
mod requests;
mod types;

pub use query::shift_of;
pub use requests::{resolve_request, Resolution};
pub use types::{AssignOptions, Conflict, ConflictKind, SchedError, TieBreak};

use crate::model::{PriorityWorkerSet, Project, Schedule, StaffingPolicy, Worker, WorkerId};

/// Scheduler : roster, politique d'effectifs et membres prioritaires pour
/// une génération mensuelle.
#[derive(Debug, Default)]
pub struct Scheduler {
    workers: Vec<Worker>,
    policy: StaffingPolicy,
    priority: PriorityWorkerSet,
}

impl Scheduler {
    pub fn new(policy: StaffingPolicy) -> Self {
        Self {
            workers: Vec::new(),
            policy,
            priority: PriorityWorkerSet::new(),
        }
    }

    pub fn from_project(project: Project) -> Self {
        Self {
            workers: project.workers,
            policy: project.policy,
            priority: project.priority,
        }
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }
    pub fn policy(&self) -> &StaffingPolicy {
        &self.policy
    }
    pub fn policy_mut(&mut self) -> &mut StaffingPolicy {
        &mut self.policy
    }
    pub fn priority(&self) -> &PriorityWorkerSet {
        &self.priority
    }

    pub fn add_workers(&mut self, workers: Vec<Worker>) {
        self.workers.extend(workers);
    }

    /// Marque tous les souhaits de `id` comme prioritaires.
    pub fn prioritize(&mut self, id: WorkerId) {
        self.priority.insert(id);
    }

    /// Génère le planning du mois `month` (1-12) de `year`.
    ///
    /// Échoue uniquement si le roster est vide ou le mois invalide ; les
    /// effectifs non atteints sont rapportés dans `Schedule::warnings`.
    pub fn generate(
        &self,
        year: i32,
        month: u32,
        opts: AssignOptions,
    ) -> Result<Schedule, SchedError> {
        assignment::generate(self, year, month, opts)
    }

    /// Vérifie un planning (éventuellement retouché) contre le roster courant.
    pub fn detect_conflicts(&self, schedule: &Schedule) -> Vec<Conflict> {
        conflicts::detect_conflicts(self, schedule)
    }
}
