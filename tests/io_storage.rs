#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime};
use gardeplan::{
    io,
    model::{Department, Role, ShiftDefinition},
    solver::{solve, SolveInput, SolveOptions},
    JsonStorage, Storage, WorkingDayCalendar,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn import_staff_infers_roles_from_position_label() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.csv");
    fs::write(
        &path,
        "name,position\nAnna,infirmière\nFarid,assistant\nNok,ผู้ช่วยพยาบาล\nMai,ผู้ช่วย\nChloé,head nurse\n",
    )
    .unwrap();

    let staff = io::import_staff_csv(&path).unwrap();
    assert_eq!(staff.len(), 5);
    assert_eq!(staff[0].role, Role::Nurse); // libellé inconnu → Nurse
    assert_eq!(staff[1].role, Role::Assistant);
    assert_eq!(staff[2].role, Role::Assistant);
    assert_eq!(staff[3].role, Role::Assistant);
    assert_eq!(staff[4].role, Role::Nurse);
}

#[test]
fn import_staff_rejects_empty_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.csv");
    fs::write(&path, "name,position\n ,assistant\n").unwrap();
    assert!(io::import_staff_csv(&path).is_err());
}

#[test]
fn import_shifts_parses_times_and_counts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shifts.csv");
    fs::write(
        &path,
        "name,start,end,nurses,assistants\njour,08:00,16:00,2,1\nnuit,22:00,06:00,1,0\n",
    )
    .unwrap();

    let shifts = io::import_shifts_csv(&path).unwrap();
    assert_eq!(shifts.len(), 2);
    assert_eq!(shifts[0].start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    assert_eq!(shifts[0].required_nurses, 2);
    assert_eq!(shifts[0].required_assistants, 1);
    // créneau passant minuit : accepté tel quel
    assert_eq!(shifts[1].end_time, NaiveTime::from_hms_opt(6, 0, 0).unwrap());
}

#[test]
fn import_leaves_keeps_names_for_caller_resolution() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("leaves.csv");
    fs::write(&path, "staff,start,end\nAnna,2025-09-10,2025-09-20\n").unwrap();

    let rows = io::import_leaves_csv(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].staff_name, "Anna");
    assert_eq!(rows[0].start, NaiveDate::from_ymd_opt(2025, 9, 10).unwrap());
    assert_eq!(rows[0].end, NaiveDate::from_ymd_opt(2025, 9, 20).unwrap());
}

#[test]
fn import_leaves_rejects_inverted_range() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("leaves.csv");
    fs::write(&path, "staff,start,end\nAnna,2025-09-20,2025-09-10\n").unwrap();
    assert!(io::import_leaves_csv(&path).is_err());
}

#[test]
fn import_holidays_parses_ranges() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("holidays.csv");
    fs::write(&path, "start,end\n2025-09-01,2025-09-03\n").unwrap();

    let holidays = io::import_holidays_csv(&path).unwrap();
    assert_eq!(holidays.len(), 1);
    assert!(holidays[0].contains(NaiveDate::from_ymd_opt(2025, 9, 2).unwrap()));
    assert!(!holidays[0].contains(NaiveDate::from_ymd_opt(2025, 9, 4).unwrap()));
}

#[test]
fn department_roundtrips_through_json_storage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("department.json");

    let mut department = Department::new("Urgences");
    department.staff.push(gardeplan::StaffMember::new("Anna", Role::Nurse));
    department.shifts.push(
        ShiftDefinition::new(
            "jour".to_string(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            1,
            0,
        )
        .unwrap(),
    );
    department.working_days = WorkingDayCalendar::open_only([chrono::Weekday::Mon]);

    let storage = JsonStorage::open(&path).unwrap();
    storage.save(&department).unwrap();
    let loaded = storage.load().unwrap();

    assert_eq!(loaded.id, department.id);
    assert_eq!(loaded.staff, department.staff);
    assert_eq!(loaded.shifts, department.shifts);
    assert_eq!(loaded.working_days, department.working_days);
}

#[test]
fn assignments_export_to_csv_with_resolved_names() {
    let dir = tempdir().unwrap();

    let mut department = Department::new("Urgences");
    department.staff.push(gardeplan::StaffMember::new("Anna", Role::Nurse));
    department.staff.push(gardeplan::StaffMember::new("Badia", Role::Nurse));
    department.shifts.push(
        ShiftDefinition::new(
            "jour".to_string(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            1,
            0,
        )
        .unwrap(),
    );

    let input = SolveInput::from_department(&department, "2025-09".parse().unwrap());
    let assignments = solve(&input, SolveOptions::default()).unwrap();
    assert!(!assignments.is_empty());

    let csv_path = dir.path().join("plan.csv");
    io::export_assignments_csv(&csv_path, &assignments, &department).unwrap();
    let content = fs::read_to_string(&csv_path).unwrap();
    assert!(content.starts_with("id,date,shift,staff,role,status"));
    assert!(content.contains("jour"));
    assert!(content.contains("nurse"));
    assert!(content.contains("assigned"));

    let json_path = dir.path().join("plan.json");
    io::export_assignments_json(&json_path, &assignments).unwrap();
    let parsed: Vec<gardeplan::Assignment> =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed.len(), assignments.len());
}
