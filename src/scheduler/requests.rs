use crate::model::{PriorityWorkerSet, Worker};
use chrono::NaiveDate;

/// Résultat de la résolution d'un souhait de repos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    NoRequest,
    PriorityOff,
    OrdinaryOff,
}

/// Un souhait est prioritaire si son drapeau est posé ou si le membre
/// appartient à l'ensemble prioritaire.
pub fn resolve_request(
    worker: &Worker,
    date: NaiveDate,
    priority: &PriorityWorkerSet,
) -> Resolution {
    match worker.request_for(date) {
        None => Resolution::NoRequest,
        Some(req) if req.priority || priority.contains(&worker.id) => Resolution::PriorityOff,
        Some(_) => Resolution::OrdinaryOff,
    }
}
