use super::state::SolveState;
use crate::model::StaffId;
use chrono::NaiveDate;

/// Première règle dure bloquant une affectation, pour les traces de debug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BlockReason {
    Leave,
    SameDay,
    AdjacentDay,
}

impl BlockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockReason::Leave => "leave",
            BlockReason::SameDay => "same-day",
            BlockReason::AdjacentDay => "adjacent-day",
        }
    }
}

/// Règles d'exclusion, par adjacence de *dates* (indépendantes des horaires
/// des créneaux) :
/// 1. congé couvrant le jour ;
/// 2. déjà affecté ce jour, quel que soit le créneau ;
/// 3. affecté la veille — ou le lendemain, cas atteignable uniquement par
///    la passe d'équilibrage qui déplace des affectations hors ordre.
pub(super) fn block_reason(
    state: &SolveState,
    staff: &StaffId,
    date: NaiveDate,
) -> Option<BlockReason> {
    if state.on_leave(staff, date) {
        return Some(BlockReason::Leave);
    }
    if state.assigned_on(staff, date) {
        return Some(BlockReason::SameDay);
    }
    let prev = date.pred_opt();
    let next = date.succ_opt();
    if prev.is_some_and(|d| state.assigned_on(staff, d))
        || next.is_some_and(|d| state.assigned_on(staff, d))
    {
        return Some(BlockReason::AdjacentDay);
    }
    None
}

pub(super) fn is_eligible(state: &SolveState, staff: &StaffId, date: NaiveDate) -> bool {
    block_reason(state, staff, date).is_none()
}
