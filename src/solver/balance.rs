use super::eligibility::is_eligible;
use super::state::SolveState;
use super::RoleSplit;
use crate::model::Role;
use tracing::debug;

/// Borne dure sur les itérations, héritée du comportement de référence.
const MAX_MOVES: usize = 600;

/// Passe d'équilibrage : tant que l'écart (max − min) des compteurs du rôle
/// dépasse `max_diff`, déplace une affectation du membre le plus chargé vers
/// le membre éligible le moins chargé. Jour et créneau du slot ne bougent
/// pas, seul le titulaire change ; s'arrête dès qu'aucun mouvement légal
/// n'existe.
pub(super) fn reduce_spread(state: &mut SolveState, split: &RoleSplit, role: Role, max_diff: u32) {
    let ids = split.of(role);
    if ids.len() < 2 {
        return;
    }

    for _ in 0..MAX_MOVES {
        let Some(high) = ids
            .iter()
            .max_by_key(|id| (state.count(id), (*id).clone()))
            .cloned()
        else {
            return;
        };
        let high_cnt = state.count(&high);
        let low_cnt = ids.iter().map(|id| state.count(id)).min().unwrap_or(0);
        if high_cnt.saturating_sub(low_cnt) <= max_diff {
            break;
        }

        let mut moved = false;
        for idx in 0..state.drafts.len() {
            if state.drafts[idx].staff != high || state.drafts[idx].role != role {
                continue;
            }
            let date = state.drafts[idx].date;
            let best = ids
                .iter()
                .filter(|id| state.count(id) < high_cnt)
                .filter(|id| is_eligible(state, id, date))
                .min_by_key(|id| (state.count(id), (*id).clone()))
                .cloned();
            if let Some(best) = best {
                debug!(
                    from = high.as_str(),
                    to = best.as_str(),
                    date = %date,
                    role = role.as_str(),
                    "balance: moved assignment"
                );
                state.reassign(idx, best);
                moved = true;
                break;
            }
        }
        if !moved {
            break;
        }
    }

    let zeros: Vec<&str> = ids
        .iter()
        .filter(|id| state.count(id) == 0)
        .map(|id| id.as_str())
        .collect();
    if !zeros.is_empty() {
        debug!(role = role.as_str(), ?zeros, "balance: staff left without assignment");
    }
}
