use super::state::Draft;
use super::SolveInput;
use crate::model::{Assignment, AssignmentStatus};
use uuid::Uuid;

/// Matérialise les brouillons en enregistrements finaux. La passe
/// d'amorçage décide hors ordre chronologique, d'où le tri
/// (jour, créneau, rôle) ; le tri est stable, le reste de l'ordre de
/// décision est conservé. Aucune revalidation : chaque brouillon respecte
/// déjà les invariants par construction.
pub(super) fn emit(input: &SolveInput, mut drafts: Vec<Draft>) -> Vec<Assignment> {
    drafts.sort_by(|a, b| {
        (a.date, a.shift_idx, a.role).cmp(&(b.date, b.shift_idx, b.role))
    });
    drafts
        .into_iter()
        .map(|d| Assignment {
            id: Uuid::new_v4().to_string(),
            department: input.department.clone(),
            staff: d.staff,
            shift: input.shifts[d.shift_idx].id.clone(),
            date: d.date,
            status: AssignmentStatus::Assigned,
        })
        .collect()
}
