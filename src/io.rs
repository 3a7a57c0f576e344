use crate::model::{
    Assignment, AssignmentStatus, Department, HolidayRange, ShiftDefinition, StaffMember,
};
use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import du personnel depuis CSV : header `name,position`.
/// Le rôle est déduit du libellé de poste libre (adaptateur d'ingestion).
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<StaffMember>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let position = rec.get(1).context("missing position")?.trim();
        if name.is_empty() {
            bail!("invalid staff row (empty name)");
        }
        out.push(StaffMember::from_position(name, position));
    }
    Ok(out)
}

/// Import de créneaux : header `name,start,end,nurses,assistants`
/// (horaires `HH:MM` ; `end <= start` = créneau passant minuit).
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ShiftDefinition>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim().to_string();
        let start = parse_time(rec.get(1).context("missing start")?)?;
        let end = parse_time(rec.get(2).context("missing end")?)?;
        let nurses: u32 = rec
            .get(3)
            .context("missing nurses")?
            .trim()
            .parse()
            .with_context(|| format!("invalid nurse count for shift {name}"))?;
        let assistants: u32 = rec
            .get(4)
            .context("missing assistants")?
            .trim()
            .parse()
            .with_context(|| format!("invalid assistant count for shift {name}"))?;
        let sh = ShiftDefinition::new(name, start, end, nurses, assistants)
            .map_err(anyhow::Error::msg)?;
        out.push(sh);
    }
    Ok(out)
}

/// Import de fermetures : header `start,end` (dates `YYYY-MM-DD` incluses).
pub fn import_holidays_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<HolidayRange>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let start = parse_date(rec.get(0).context("missing start")?)?;
        let end = parse_date(rec.get(1).context("missing end")?)?;
        out.push(HolidayRange::new(start, end).map_err(anyhow::Error::msg)?);
    }
    Ok(out)
}

/// Ligne de congé brute ; le nom est résolu en identifiant par l'appelant,
/// qui connaît le service.
#[derive(Debug, Clone)]
pub struct LeaveRow {
    pub staff_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Import de congés approuvés : header `staff,start,end`.
pub fn import_leaves_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<LeaveRow>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let staff_name = rec.get(0).context("missing staff")?.trim().to_string();
        if staff_name.is_empty() {
            bail!("invalid leave row (empty staff)");
        }
        let start = parse_date(rec.get(1).context("missing start")?)?;
        let end = parse_date(rec.get(2).context("missing end")?)?;
        if end < start {
            bail!("invalid leave row for {staff_name}: end precedes start");
        }
        out.push(LeaveRow {
            staff_name,
            start,
            end,
        });
    }
    Ok(out)
}

fn parse_time(raw: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .with_context(|| format!("invalid time (expected HH:MM): {raw}"))
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date (expected YYYY-MM-DD): {raw}"))
}

/// Export JSON des affectations (jolie mise en forme).
pub fn export_assignments_json<P: AsRef<Path>>(
    path: P,
    assignments: &[Assignment],
) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(assignments)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des affectations : header `id,date,shift,staff,role,status`.
/// Les identifiants sont résolus en noms via l'instantané du service.
pub fn export_assignments_csv<P: AsRef<Path>>(
    path: P,
    assignments: &[Assignment],
    department: &Department,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "date", "shift", "staff", "role", "status"])?;
    for a in assignments {
        let shift = department
            .find_shift_by_id(&a.shift)
            .map(|s| s.name.as_str())
            .unwrap_or("");
        let (staff, role) = department
            .find_staff_by_id(&a.staff)
            .map(|m| (m.display_name.as_str(), m.role.as_str()))
            .unwrap_or(("", ""));
        let status = match a.status {
            AssignmentStatus::Assigned => "assigned",
        };
        let date = a.date.to_string();
        w.write_record([a.id.as_str(), date.as_str(), shift, staff, role, status])?;
    }
    w.flush()?;
    Ok(())
}
