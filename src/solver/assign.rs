use super::eligibility::{block_reason, is_eligible};
use super::fairness::{self, Targets};
use super::state::{Draft, SolveState};
use super::RoleSplit;
use crate::model::{Role, ShiftDefinition, StaffId};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

pub(super) const ROLES: [Role; 2] = [Role::Nurse, Role::Assistant];

/// Besoins restants par (jour, créneau, rôle). Le vecteur intérieur est
/// parallèle à la liste de créneaux d'entrée.
pub(super) struct Capacity {
    remaining: BTreeMap<NaiveDate, Vec<[u32; 2]>>,
}

fn role_idx(role: Role) -> usize {
    match role {
        Role::Nurse => 0,
        Role::Assistant => 1,
    }
}

impl Capacity {
    pub fn new(days: &[NaiveDate], shifts: &[ShiftDefinition]) -> Self {
        let remaining = days
            .iter()
            .map(|d| {
                let needs = shifts
                    .iter()
                    .map(|sh| [sh.required_nurses, sh.required_assistants])
                    .collect();
                (*d, needs)
            })
            .collect();
        Self { remaining }
    }

    pub fn remaining(&self, date: NaiveDate, shift_idx: usize, role: Role) -> u32 {
        self.remaining
            .get(&date)
            .map(|needs| needs[shift_idx][role_idx(role)])
            .unwrap_or(0)
    }

    pub fn take(&mut self, date: NaiveDate, shift_idx: usize, role: Role) {
        if let Some(needs) = self.remaining.get_mut(&date) {
            let slot = &mut needs[shift_idx][role_idx(role)];
            *slot = slot.saturating_sub(1);
        }
    }
}

/// Passe d'amorçage : tente de donner une première affectation à chaque
/// membre encore à zéro, tant que la capacité le permet. Le remplissage
/// principal lisse ensuite la distribution.
pub(super) fn seed_minimum_one(
    state: &mut SolveState,
    days: &[NaiveDate],
    shifts_len: usize,
    role: Role,
    staff: &[StaffId],
    capacity: &mut Capacity,
) {
    for id in staff {
        if state.count(id) > 0 {
            continue;
        }
        let mut placed = false;
        'days: for &date in days {
            for shift_idx in 0..shifts_len {
                if capacity.remaining(date, shift_idx, role) == 0 {
                    continue;
                }
                // Les règles d'exclusion portent sur le jour entier : un
                // blocage vaut pour tous les créneaux de la date.
                if let Some(reason) = block_reason(state, id, date) {
                    debug!(
                        staff = id.as_str(),
                        date = %date,
                        reason = reason.as_str(),
                        "seed: blocked"
                    );
                    continue 'days;
                }
                state.record(Draft {
                    staff: id.clone(),
                    shift_idx,
                    date,
                    role,
                });
                capacity.take(date, shift_idx, role);
                placed = true;
                debug!(staff = id.as_str(), date = %date, shift_idx, "seed: assigned");
                break 'days;
            }
        }
        if !placed {
            debug!(
                staff = id.as_str(),
                role = role.as_str(),
                "seed: no slot or constraints"
            );
        }
    }
}

/// Boucle gloutonne principale : jours croissants, créneaux dans l'ordre
/// d'entrée, infirmières puis aides. Un slot sans candidat éligible reste
/// vide, sans erreur ni nouvel essai.
pub(super) fn fill_month(
    state: &mut SolveState,
    days: &[NaiveDate],
    shifts: &[ShiftDefinition],
    split: &RoleSplit,
    targets: &Targets,
    capacity: &mut Capacity,
) {
    for &date in days {
        for shift_idx in 0..shifts.len() {
            for role in ROLES {
                while capacity.remaining(date, shift_idx, role) > 0 {
                    let Some(chosen) = pick(state, split.of(role), date, targets.of(role))
                    else {
                        break;
                    };
                    state.record(Draft {
                        staff: chosen,
                        shift_idx,
                        date,
                        role,
                    });
                    capacity.take(date, shift_idx, role);
                }
            }
        }
    }
}

/// Candidat éligible de coût minimal ; égalité départagée par identifiant
/// (clé secondaire fixe, indépendante de l'ordre du roster).
fn pick(
    state: &SolveState,
    candidates: &[StaffId],
    date: NaiveDate,
    target: u32,
) -> Option<StaffId> {
    candidates
        .iter()
        .filter(|id| is_eligible(state, id, date))
        .min_by_key(|id| (fairness::cost(state.count(id), target), (*id).clone()))
        .cloned()
}
