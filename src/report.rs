use crate::calendar::{resolve_working_days, Month};
use crate::model::{Assignment, Role, ShiftId, StaffId};
use crate::solver::{SolveInput, SolveOptions};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Slot resté sans titulaire (sous-effectif ou contraintes).
#[derive(Debug, Clone)]
pub struct UnfilledSlot {
    pub date: NaiveDate,
    pub shift: ShiftId,
    pub shift_name: String,
    pub role: Role,
    pub missing: u32,
}

/// Charge d'un membre sur le mois.
#[derive(Debug, Clone)]
pub struct StaffLoad {
    pub staff: StaffId,
    pub display_name: String,
    pub role: Role,
    pub count: u32,
}

/// Dispersion des compteurs d'un rôle.
#[derive(Debug, Clone, Copy)]
pub struct RoleSummary {
    pub role: Role,
    pub staff_count: usize,
    pub min_count: u32,
    pub max_count: u32,
}

impl RoleSummary {
    pub fn spread(&self) -> u32 {
        self.max_count.saturating_sub(self.min_count)
    }
}

/// Bilan de couverture et d'équité d'une résolution. Le sous-effectif se
/// lit ici, en avertissement métier ("12 slots sur 180 non pourvus"),
/// jamais en erreur système.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    pub month: Month,
    pub total_slots: u32,
    pub filled_slots: u32,
    pub unfilled: Vec<UnfilledSlot>,
    pub per_staff: Vec<StaffLoad>,
    pub roles: Vec<RoleSummary>,
    pub max_diff_allowed: u32,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.filled_slots == self.total_slots
    }

    /// Vrai si chaque rôle respecte l'écart toléré par le service.
    pub fn within_tolerance(&self) -> bool {
        self.roles
            .iter()
            .all(|r| r.staff_count < 2 || r.spread() <= self.max_diff_allowed)
    }
}

/// Construit le bilan d'une sortie de `solve` face à ses entrées.
pub fn build_report(
    input: &SolveInput,
    assignments: &[Assignment],
    options: SolveOptions,
) -> CoverageReport {
    let days = resolve_working_days(input.month, &input.working_days, &input.holidays);

    let role_of: HashMap<&StaffId, Role> = input
        .staff
        .iter()
        .map(|m| (&m.id, m.role))
        .collect();

    // affectations par (jour, créneau, rôle)
    let mut filled: HashMap<(NaiveDate, &ShiftId, Role), u32> = HashMap::new();
    for a in assignments {
        if let Some(role) = role_of.get(&a.staff) {
            *filled.entry((a.date, &a.shift, *role)).or_insert(0) += 1;
        }
    }

    let mut total_slots = 0u32;
    let mut unfilled = Vec::new();
    for &date in &days {
        for sh in &input.shifts {
            for role in [Role::Nurse, Role::Assistant] {
                let required = sh.required_for(role);
                total_slots += required;
                let got = filled
                    .get(&(date, &sh.id, role))
                    .copied()
                    .unwrap_or(0);
                if got < required {
                    unfilled.push(UnfilledSlot {
                        date,
                        shift: sh.id.clone(),
                        shift_name: sh.name.clone(),
                        role,
                        missing: required - got,
                    });
                }
            }
        }
    }

    let mut counts: HashMap<&StaffId, u32> = HashMap::new();
    for a in assignments {
        *counts.entry(&a.staff).or_insert(0) += 1;
    }
    let per_staff: Vec<StaffLoad> = input
        .staff
        .iter()
        .map(|m| StaffLoad {
            staff: m.id.clone(),
            display_name: m.display_name.clone(),
            role: m.role,
            count: counts.get(&m.id).copied().unwrap_or(0),
        })
        .collect();

    let roles = [Role::Nurse, Role::Assistant]
        .into_iter()
        .map(|role| {
            let loads: Vec<u32> = per_staff
                .iter()
                .filter(|l| l.role == role)
                .map(|l| l.count)
                .collect();
            RoleSummary {
                role,
                staff_count: loads.len(),
                min_count: loads.iter().copied().min().unwrap_or(0),
                max_count: loads.iter().copied().max().unwrap_or(0),
            }
        })
        .collect();

    let filled_slots = total_slots - unfilled.iter().map(|u| u.missing).sum::<u32>();

    CoverageReport {
        month: input.month,
        total_slots,
        filled_slots,
        unfilled,
        per_staff,
        roles,
        max_diff_allowed: options.effective_max_diff(),
    }
}

/// Permet de customiser le rendu du bilan (texte, mail, etc.).
pub trait ReportRenderer {
    fn render(&self, report: &CoverageReport) -> String;
}

/// Gabarit texte simple, une ligne de synthèse puis le détail.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReport;

impl ReportRenderer for TextReport {
    fn render(&self, report: &CoverageReport) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Planning {} : {}/{} slots pourvus",
            report.month, report.filled_slots, report.total_slots
        );
        for u in &report.unfilled {
            let _ = writeln!(
                out,
                "  manque {} {} le {} ({})",
                u.missing,
                u.role.as_str(),
                u.date,
                u.shift_name
            );
        }
        for r in &report.roles {
            let _ = writeln!(
                out,
                "  {} : effectif {}, charge {}..{} (écart toléré {})",
                r.role.as_str(),
                r.staff_count,
                r.min_count,
                r.max_count,
                report.max_diff_allowed
            );
        }
        for l in &report.per_staff {
            let _ = writeln!(
                out,
                "  {} ({}) : {} garde(s)",
                l.display_name,
                l.role.as_str(),
                l.count
            );
        }
        out
    }
}
