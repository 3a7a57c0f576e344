use crate::model::{Role, ShiftDefinition};
use chrono::NaiveDate;

/// Cible équitable : plafond de l'effectif idéal par membre d'un rôle,
/// `ceil(slots ouverts du rôle / effectif du rôle)`. Un rôle sans effectif
/// est calculé sur un dénominateur de 1 (il restera simplement vide).
pub(super) fn role_target(days: &[NaiveDate], shifts: &[ShiftDefinition], role: Role, staff_count: usize) -> u32 {
    let total: u32 = shifts
        .iter()
        .map(|sh| sh.required_for(role) * days.len() as u32)
        .sum();
    let denom = staff_count.max(1) as u32;
    total.div_ceil(denom)
}

/// Cibles des deux rôles, figées une fois par résolution.
#[derive(Debug, Clone, Copy)]
pub(super) struct Targets {
    pub nurse: u32,
    pub assistant: u32,
}

impl Targets {
    pub fn of(&self, role: Role) -> u32 {
        match role {
            Role::Nurse => self.nurse,
            Role::Assistant => self.assistant,
        }
    }
}

/// Coût asymétrique d'un candidat : linéaire (négatif) sous la cible,
/// quadratique au-dessus. Le glouton prend le minimum, donc le membre le
/// plus en dessous de sa part gagne, et empiler sur un membre déjà chargé
/// devient vite prohibitif (2 au-dessus = 40, 3 au-dessus = 90).
pub(super) fn cost(count: u32, target: u32) -> i64 {
    let diff = i64::from(count) - i64::from(target);
    if diff <= 0 {
        diff * 5
    } else {
        diff * diff * 10
    }
}
