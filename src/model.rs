use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Identifiant fort pour StaffMember
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour ShiftDefinition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour un service (département)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepartmentId(String);

impl DepartmentId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Catégorie de personnel. Chaque créneau exprime ses besoins par rôle,
/// et les rôles ne se remplacent jamais entre eux.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Nurse,
    Assistant,
}

impl Role {
    /// Adaptateur d'ingestion : déduit le rôle depuis un libellé de poste
    /// libre. Vocabulaire fixe hérité des données sources ; tout libellé
    /// non reconnu retombe sur `Nurse`.
    pub fn from_position_label(label: &str) -> Self {
        match label.trim() {
            "assistant" | "ผู้ช่วยพยาบาล" | "ผู้ช่วย" => Role::Assistant,
            _ => Role::Nurse,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Nurse => "nurse",
            Role::Assistant => "assistant",
        }
    }
}

/// Membre du personnel d'un service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub display_name: String,
    pub role: Role,
}

impl StaffMember {
    pub fn new<D: Into<String>>(display_name: D, role: Role) -> Self {
        Self {
            id: StaffId::random(),
            display_name: display_name.into(),
            role,
        }
    }

    /// Construit un membre depuis un libellé de poste libre (import CSV).
    pub fn from_position<D: Into<String>>(display_name: D, position: &str) -> Self {
        Self::new(display_name, Role::from_position_label(position))
    }
}

/// Définition de créneau : une plage horaire nommée et ses besoins par rôle.
/// `end_time <= start_time` signifie que le créneau passe minuit ; seul le
/// jour calendaire compte pour l'affectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    pub id: ShiftId,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub required_nurses: u32,
    pub required_assistants: u32,
}

impl ShiftDefinition {
    pub fn new(
        name: String,
        start_time: NaiveTime,
        end_time: NaiveTime,
        required_nurses: u32,
        required_assistants: u32,
    ) -> Result<Self, String> {
        if name.trim().is_empty() {
            return Err("shift name cannot be empty".to_string());
        }
        Ok(Self {
            id: ShiftId::random(),
            name,
            start_time,
            end_time,
            required_nurses,
            required_assistants,
        })
    }

    pub fn required_for(&self, role: Role) -> u32 {
        match role {
            Role::Nurse => self.required_nurses,
            Role::Assistant => self.required_assistants,
        }
    }
}

/// Jours ouvrés d'un service, indexés 0=dimanche .. 6=samedi.
///
/// Deux modes :
/// - configuration explicite : un jour absent de la table est *fermé* ;
/// - aucune configuration : tous les jours sont ouverts (compatibilité
///   avec les services n'ayant jamais rempli ce réglage).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDayCalendar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    days: Option<BTreeMap<u8, bool>>,
}

impl WorkingDayCalendar {
    pub fn unconfigured() -> Self {
        Self { days: None }
    }

    pub fn explicit<I: IntoIterator<Item = (u8, bool)>>(days: I) -> Result<Self, String> {
        let map: BTreeMap<u8, bool> = days.into_iter().collect();
        if map.keys().any(|d| *d > 6) {
            return Err("weekday index must be in 0..=6 (0=Sunday)".to_string());
        }
        Ok(Self { days: Some(map) })
    }

    /// Ouvre exactement les jours listés, ferme tous les autres.
    pub fn open_only<I: IntoIterator<Item = Weekday>>(open: I) -> Self {
        let map = open
            .into_iter()
            .map(|w| (w.num_days_from_sunday() as u8, true))
            .collect();
        Self { days: Some(map) }
    }

    pub fn is_configured(&self) -> bool {
        self.days.is_some()
    }

    pub fn is_open(&self, date: NaiveDate) -> bool {
        match &self.days {
            None => true,
            Some(map) => {
                let idx = date.weekday().num_days_from_sunday() as u8;
                map.get(&idx).copied().unwrap_or(false)
            }
        }
    }
}

/// Période de fermeture du service entier, bornes incluses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HolidayRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if end < start {
            return Err("holiday end must not precede start".to_string());
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Congé approuvé d'un membre, bornes incluses. Le workflow d'approbation
/// est hors périmètre : seuls les congés déjà validés arrivent ici.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRange {
    pub staff: StaffId,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl LeaveRange {
    pub fn new(staff: StaffId, start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if end < start {
            return Err("leave end must not precede start".to_string());
        }
        Ok(Self { staff, start, end })
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Assigned,
}

/// Affectation produite par une résolution : un membre, un créneau, un jour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub department: DepartmentId,
    pub staff: StaffId,
    pub shift: ShiftId,
    pub date: NaiveDate,
    pub status: AssignmentStatus,
}

/// Instantané complet d'un service : tout ce que le solveur consomme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub shifts: Vec<ShiftDefinition>,
    #[serde(default)]
    pub working_days: WorkingDayCalendar,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holidays: Vec<HolidayRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leaves: Vec<LeaveRange>,
}

impl Department {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            id: DepartmentId::random(),
            name: name.into(),
            staff: Vec::new(),
            shifts: Vec::new(),
            working_days: WorkingDayCalendar::unconfigured(),
            holidays: Vec::new(),
            leaves: Vec::new(),
        }
    }

    pub fn find_staff_by_name<'a>(&'a self, name: &str) -> Option<&'a StaffMember> {
        self.staff.iter().find(|s| s.display_name == name)
    }
    pub fn find_staff_by_id<'a>(&'a self, id: &StaffId) -> Option<&'a StaffMember> {
        self.staff.iter().find(|s| &s.id == id)
    }
    pub fn find_shift_by_name<'a>(&'a self, name: &str) -> Option<&'a ShiftDefinition> {
        self.shifts.iter().find(|s| s.name == name)
    }
    pub fn find_shift_by_id<'a>(&'a self, id: &ShiftId) -> Option<&'a ShiftDefinition> {
        self.shifts.iter().find(|s| &s.id == id)
    }
}
