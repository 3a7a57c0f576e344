mod assign;
mod balance;
mod eligibility;
mod emit;
mod fairness;
mod state;
mod types;

pub use types::{SolveError, SolveOptions};

use crate::calendar::{resolve_working_days, Month};
use crate::model::{
    Assignment, Department, DepartmentId, HolidayRange, LeaveRange, Role, ShiftDefinition,
    StaffId, StaffMember, WorkingDayCalendar,
};
use std::collections::HashSet;
use tracing::debug;

/// Entrées d'une résolution : instantanés déjà résolus par les
/// collaborateurs externes (catalogue de créneaux, annuaire, congés
/// approuvés...). Le solveur ne fait aucune requête et ne modifie rien.
#[derive(Debug, Clone)]
pub struct SolveInput {
    pub department: DepartmentId,
    pub month: Month,
    pub shifts: Vec<ShiftDefinition>,
    pub staff: Vec<StaffMember>,
    pub working_days: WorkingDayCalendar,
    pub holidays: Vec<HolidayRange>,
    pub leaves: Vec<LeaveRange>,
}

impl SolveInput {
    pub fn from_department(department: &Department, month: Month) -> Self {
        Self {
            department: department.id.clone(),
            month,
            shifts: department.shifts.clone(),
            staff: department.staff.clone(),
            working_days: department.working_days.clone(),
            holidays: department.holidays.clone(),
            leaves: department.leaves.clone(),
        }
    }

    /// Vérifications structurelles, avant tout travail d'affectation.
    fn validate(&self) -> Result<(), SolveError> {
        let invalid = |msg: String| Err(SolveError::InvalidInput(msg));

        let mut seen_staff = HashSet::new();
        for member in &self.staff {
            if member.id.as_str().trim().is_empty() {
                return invalid("staff member with empty id".to_string());
            }
            if !seen_staff.insert(member.id.clone()) {
                return invalid(format!("duplicate staff id: {}", member.id.as_str()));
            }
        }

        let mut seen_shifts = HashSet::new();
        for shift in &self.shifts {
            if shift.id.as_str().trim().is_empty() || shift.name.trim().is_empty() {
                return invalid("shift with empty id or name".to_string());
            }
            if !seen_shifts.insert(shift.id.clone()) {
                return invalid(format!("duplicate shift id: {}", shift.id.as_str()));
            }
        }

        for h in &self.holidays {
            if h.end < h.start {
                return invalid(format!("holiday range {} > {}", h.start, h.end));
            }
        }
        for lv in &self.leaves {
            if lv.end < lv.start {
                return invalid(format!(
                    "leave range {} > {} for {}",
                    lv.start,
                    lv.end,
                    lv.staff.as_str()
                ));
            }
        }
        Ok(())
    }
}

/// Roster scindé par rôle ; l'ordre d'entrée est conservé mais n'influe
/// pas sur la sélection (clé secondaire = identifiant).
#[derive(Debug, Default)]
struct RoleSplit {
    nurses: Vec<StaffId>,
    assistants: Vec<StaffId>,
}

impl RoleSplit {
    fn new(staff: &[StaffMember]) -> Self {
        let mut split = Self::default();
        for member in staff {
            match member.role {
                Role::Nurse => split.nurses.push(member.id.clone()),
                Role::Assistant => split.assistants.push(member.id.clone()),
            }
        }
        split
    }

    fn of(&self, role: Role) -> &[StaffId] {
        match role {
            Role::Nurse => &self.nurses,
            Role::Assistant => &self.assistants,
        }
    }
}

/// Résout le planning d'un mois : calcul pur, synchrone, sans E/S.
///
/// Pipeline : validation → calendrier ouvré → amorçage (une affectation
/// pour chaque membre à zéro) → remplissage glouton équitable →
/// équilibrage de l'écart → émission triée. Le sous-effectif n'est pas une
/// erreur : les slots sans candidat restent simplement absents de la
/// sortie.
pub fn solve(input: &SolveInput, options: SolveOptions) -> Result<Vec<Assignment>, SolveError> {
    input.validate()?;

    let days = resolve_working_days(input.month, &input.working_days, &input.holidays);
    let split = RoleSplit::new(&input.staff);
    let targets = fairness::Targets {
        nurse: fairness::role_target(
            &days,
            &input.shifts,
            Role::Nurse,
            split.of(Role::Nurse).len(),
        ),
        assistant: fairness::role_target(
            &days,
            &input.shifts,
            Role::Assistant,
            split.of(Role::Assistant).len(),
        ),
    };
    debug!(
        department = input.department.as_str(),
        month = %input.month,
        nurses = split.of(Role::Nurse).len(),
        assistants = split.of(Role::Assistant).len(),
        shifts = input.shifts.len(),
        open_days = days.len(),
        target_nurse = targets.nurse,
        target_assistant = targets.assistant,
        "solve: inputs"
    );

    let mut state = state::SolveState::new(&input.leaves);
    let mut capacity = assign::Capacity::new(&days, &input.shifts);

    for role in assign::ROLES {
        assign::seed_minimum_one(
            &mut state,
            &days,
            input.shifts.len(),
            role,
            split.of(role),
            &mut capacity,
        );
    }

    assign::fill_month(&mut state, &days, &input.shifts, &split, &targets, &mut capacity);

    let max_diff = options.effective_max_diff();
    for role in assign::ROLES {
        balance::reduce_spread(&mut state, &split, role, max_diff);
    }

    Ok(emit::emit(input, state.drafts))
}
