#![forbid(unsafe_code)]
use chrono::NaiveTime;
use gardeplan::{
    build_report,
    model::{Role, ShiftDefinition, ShiftId, StaffId, StaffMember, WorkingDayCalendar},
    solver::{solve, SolveInput, SolveOptions},
    DepartmentId, ReportRenderer, TextReport,
};

fn input() -> SolveInput {
    let staff = vec![
        StaffMember {
            id: StaffId::new("n1"),
            display_name: "Anna".to_string(),
            role: Role::Nurse,
        },
        StaffMember {
            id: StaffId::new("n2"),
            display_name: "Badia".to_string(),
            role: Role::Nurse,
        },
        StaffMember {
            id: StaffId::new("n3"),
            display_name: "Chloé".to_string(),
            role: Role::Nurse,
        },
        StaffMember {
            id: StaffId::new("a1"),
            display_name: "Farid".to_string(),
            role: Role::Assistant,
        },
    ];
    SolveInput {
        department: DepartmentId::new("dept-1"),
        month: "2025-09".parse().unwrap(),
        shifts: vec![ShiftDefinition {
            id: ShiftId::new("day"),
            name: "jour".to_string(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            required_nurses: 1,
            required_assistants: 1,
        }],
        staff,
        working_days: WorkingDayCalendar::unconfigured(),
        holidays: Vec::new(),
        leaves: Vec::new(),
    }
}

#[test]
fn coverage_report_counts_slots_and_tolerance() {
    let input = input();
    let assignments = solve(&input, SolveOptions::default()).unwrap();

    let report = build_report(&input, &assignments, SolveOptions::default());
    assert_eq!(report.total_slots, 60);
    // l'aide seule ne peut pas travailler deux jours de suite
    assert!(report.filled_slots < report.total_slots);
    assert!(!report.is_complete());

    let nurse_summary = report
        .roles
        .iter()
        .find(|r| r.role == Role::Nurse)
        .unwrap();
    assert_eq!(nurse_summary.staff_count, 3);
    assert!(nurse_summary.spread() <= report.max_diff_allowed);
    assert!(report.within_tolerance());
}

#[test]
fn per_staff_loads_cover_whole_roster() {
    let input = input();
    let assignments = solve(&input, SolveOptions::default()).unwrap();
    let report = build_report(&input, &assignments, SolveOptions::default());

    assert_eq!(report.per_staff.len(), 4);
    let total: u32 = report.per_staff.iter().map(|l| l.count).sum();
    assert_eq!(total as usize, assignments.len());
}

#[test]
fn non_positive_max_diff_clamps_to_one() {
    let input = input();
    let options = SolveOptions { max_diff_allowed: 0 };
    let assignments = solve(&input, options).unwrap();
    let report = build_report(&input, &assignments, options);
    assert_eq!(report.max_diff_allowed, 1);
}

#[test]
fn text_renderer_summarizes_gaps_and_loads() {
    let input = input();
    let assignments = solve(&input, SolveOptions::default()).unwrap();
    let report = build_report(&input, &assignments, SolveOptions::default());

    let text = TextReport.render(&report);
    assert!(text.starts_with("Planning 2025-09"));
    assert!(text.contains("slots pourvus"));
    assert!(text.contains("manque 1 assistant"));
    assert!(text.contains("Anna (nurse)"));
    assert!(text.contains("Farid (assistant)"));
}
