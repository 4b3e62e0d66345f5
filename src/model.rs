use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Identifiant fort pour Worker
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WorkerId(String);

impl WorkerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Souhait de repos pour une date. `priority` = repos inconditionnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OffRequest {
    pub date: NaiveDate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: bool,
}

/// Membre du planning
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub requests: Vec<OffRequest>,
}

impl Worker {
    pub fn new<I: AsRef<str>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: WorkerId::new(id),
            name: name.into(),
            requests: Vec::new(),
        }
    }

    /// Ajoute un souhait de repos (style builder).
    pub fn with_request(mut self, date: NaiveDate, priority: bool) -> Self {
        self.requests.push(OffRequest { date, priority });
        self
    }

    /// Premier souhait déposé pour `date` ; les doublons suivants sont ignorés.
    pub fn request_for(&self, date: NaiveDate) -> Option<&OffRequest> {
        self.requests.iter().find(|r| r.date == date)
    }
}

/// Classification d'un membre pour une date donnée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShiftKind {
    Day,
    Night,
    RequestedOff,
    PublicOff,
}

impl ShiftKind {
    /// Code court utilisé dans la grille exportée (vide = repos ordinaire).
    pub fn code(self) -> &'static str {
        match self {
            ShiftKind::Day => "日",
            ShiftKind::Night => "夜",
            ShiftKind::RequestedOff => "休",
            ShiftKind::PublicOff => "",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "日" => Some(ShiftKind::Day),
            "夜" => Some(ShiftKind::Night),
            "休" => Some(ShiftKind::RequestedOff),
            "" => Some(ShiftKind::PublicOff),
            _ => None,
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShiftKind::Day => "day",
            ShiftKind::Night => "night",
            ShiftKind::RequestedOff => "requested-off",
            ShiftKind::PublicOff => "public-off",
        })
    }
}

/// Effectifs requis et jours fériés.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StaffingPolicy {
    pub weekday_day: u32,
    pub weekday_night: u32,
    pub weekend_day: u32,
    pub weekend_night: u32,
    pub treat_public_holidays_as_weekends: bool,
    pub public_holidays: BTreeSet<NaiveDate>,
}

impl Default for StaffingPolicy {
    fn default() -> Self {
        Self {
            weekday_day: 2,
            weekday_night: 1,
            weekend_day: 1,
            weekend_night: 1,
            treat_public_holidays_as_weekends: true,
            public_holidays: BTreeSet::new(),
        }
    }
}

/// Membres dont tous les souhaits de repos sont prioritaires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PriorityWorkerSet(BTreeSet<WorkerId>);

impl PriorityWorkerSet {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn contains(&self, id: &WorkerId) -> bool {
        self.0.contains(id)
    }
    pub fn insert(&mut self, id: WorkerId) -> bool {
        self.0.insert(id)
    }
    pub fn remove(&mut self, id: &WorkerId) -> bool {
        self.0.remove(id)
    }
    pub fn iter(&self) -> impl Iterator<Item = &WorkerId> {
        self.0.iter()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<WorkerId> for PriorityWorkerSet {
    fn from_iter<T: IntoIterator<Item = WorkerId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Répartition d'une journée. Les quatre listes partitionnent le roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DaySchedule {
    pub day: Vec<WorkerId>,
    pub night: Vec<WorkerId>,
    pub requested_off: Vec<WorkerId>,
    pub public_off: Vec<WorkerId>,
}

impl DaySchedule {
    pub(crate) fn push(&mut self, kind: ShiftKind, id: WorkerId) {
        match kind {
            ShiftKind::Day => self.day.push(id),
            ShiftKind::Night => self.night.push(id),
            ShiftKind::RequestedOff => self.requested_off.push(id),
            ShiftKind::PublicOff => self.public_off.push(id),
        }
    }

    pub fn members(&self, kind: ShiftKind) -> &[WorkerId] {
        match kind {
            ShiftKind::Day => &self.day,
            ShiftKind::Night => &self.night,
            ShiftKind::RequestedOff => &self.requested_off,
            ShiftKind::PublicOff => &self.public_off,
        }
    }
}

/// Effectif non atteint pour un créneau (non bloquant).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleWarning {
    pub date: NaiveDate,
    pub shift: ShiftKind,
    pub required: u32,
    pub actual: u32,
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} shift: required {}, assigned {}",
            self.date, self.shift, self.required, self.actual
        )
    }
}

/// Planning mensuel produit par le moteur.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    pub year: i32,
    pub month: u32,
    pub days: BTreeMap<NaiveDate, DaySchedule>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub warnings: Vec<ScheduleWarning>,
}

/// Compteurs par type pour un membre sur le mois.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftTally {
    pub day: u32,
    pub night: u32,
    pub requested_off: u32,
    pub public_off: u32,
}

/// Projet persisté : roster, politique d'effectifs, membres prioritaires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Project {
    #[cfg_attr(feature = "serde", serde(default))]
    pub workers: Vec<Worker>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub policy: StaffingPolicy,
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: PriorityWorkerSet,
}

impl Project {
    pub fn find_worker<'a>(&'a self, id: &WorkerId) -> Option<&'a Worker> {
        self.workers.iter().find(|w| &w.id == id)
    }
}
