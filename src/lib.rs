#![forbid(unsafe_code)]
//! Gardeplan — génération locale de plannings de garde mensuels (sans BD).
//!
//! - Instantané de service en JSON, imports/exports CSV.
//! - Remplissage glouton guidé par un coût d'équité, puis équilibrage.
//! - Contraintes dures : congés, fermetures, jours ouvrés, un seul créneau
//!   par jour, pas de jours consécutifs.
//! - Tout en dates naïves ; l'affichage localisé reste hors de la lib.

pub mod calendar;
pub mod io;
pub mod model;
pub mod report;
pub mod solver;
pub mod storage;

pub use calendar::{resolve_working_days, Month};
pub use model::{
    Assignment, AssignmentStatus, Department, DepartmentId, HolidayRange, LeaveRange, Role,
    ShiftDefinition, ShiftId, StaffId, StaffMember, WorkingDayCalendar,
};
pub use report::{
    build_report, CoverageReport, ReportRenderer, RoleSummary, StaffLoad, TextReport,
    UnfilledSlot,
};
pub use solver::{solve, SolveError, SolveInput, SolveOptions};
pub use storage::{JsonStorage, Storage};
