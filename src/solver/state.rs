use crate::model::{LeaveRange, Role, StaffId};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Affectation en cours de construction ; `shift_idx` renvoie à l'ordre
/// d'entrée des définitions de créneaux.
#[derive(Debug, Clone)]
pub(super) struct Draft {
    pub staff: StaffId,
    pub shift_idx: usize,
    pub date: NaiveDate,
    pub role: Role,
}

/// État mutable d'une seule résolution, possédé par l'appel à `solve`.
/// Rien n'est partagé entre résolutions : deux appels concurrents sur des
/// entrées distinctes ne se voient pas.
#[derive(Debug, Default)]
pub(super) struct SolveState {
    counts: HashMap<StaffId, u32>,
    assigned_dates: HashMap<StaffId, BTreeSet<NaiveDate>>,
    leaves: HashMap<StaffId, Vec<(NaiveDate, NaiveDate)>>,
    pub drafts: Vec<Draft>,
}

impl SolveState {
    pub fn new(leaves: &[LeaveRange]) -> Self {
        let mut by_staff: HashMap<StaffId, Vec<(NaiveDate, NaiveDate)>> = HashMap::new();
        for lv in leaves {
            by_staff
                .entry(lv.staff.clone())
                .or_default()
                .push((lv.start, lv.end));
        }
        Self {
            leaves: by_staff,
            ..Self::default()
        }
    }

    pub fn count(&self, staff: &StaffId) -> u32 {
        self.counts.get(staff).copied().unwrap_or(0)
    }

    pub fn on_leave(&self, staff: &StaffId, date: NaiveDate) -> bool {
        self.leaves
            .get(staff)
            .is_some_and(|ranges| ranges.iter().any(|(s, e)| *s <= date && date <= *e))
    }

    pub fn assigned_on(&self, staff: &StaffId, date: NaiveDate) -> bool {
        self.assigned_dates
            .get(staff)
            .is_some_and(|days| days.contains(&date))
    }

    /// Enregistre une décision. Définitive pour le remplissage glouton ;
    /// seule la passe d'équilibrage peut encore changer le titulaire.
    pub fn record(&mut self, draft: Draft) {
        *self.counts.entry(draft.staff.clone()).or_insert(0) += 1;
        self.assigned_dates
            .entry(draft.staff.clone())
            .or_default()
            .insert(draft.date);
        self.drafts.push(draft);
    }

    /// Transfère le brouillon `idx` à `to`, en gardant jour et créneau.
    /// Les compteurs et les jeux de dates des deux membres suivent.
    pub fn reassign(&mut self, idx: usize, to: StaffId) {
        let date = self.drafts[idx].date;
        let from = std::mem::replace(&mut self.drafts[idx].staff, to.clone());

        if let Some(c) = self.counts.get_mut(&from) {
            *c = c.saturating_sub(1);
        }
        if let Some(days) = self.assigned_dates.get_mut(&from) {
            days.remove(&date);
        }
        *self.counts.entry(to.clone()).or_insert(0) += 1;
        self.assigned_dates.entry(to).or_default().insert(date);
    }
}
