#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveTime, Weekday};
use clap::{Parser, Subcommand};
use gardeplan::{
    build_report, io,
    model::{Department, HolidayRange, LeaveRange, ShiftDefinition, WorkingDayCalendar},
    solver::{solve, SolveInput, SolveOptions},
    storage::{JsonStorage, Storage},
    Month, ReportRenderer, TextReport,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planning de garde (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du service
    #[arg(long, global = true, default_value = "department.json")]
    department: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialiser un fichier de service
    Init {
        #[arg(long)]
        name: String,
    },

    /// Créer une définition de créneau
    AddShift {
        #[arg(long)]
        name: String,
        /// HH:MM
        #[arg(long)]
        start: String,
        /// HH:MM (<= start = créneau passant minuit)
        #[arg(long)]
        end: String,
        #[arg(long, default_value_t = 1)]
        nurses: u32,
        #[arg(long, default_value_t = 0)]
        assistants: u32,
    },

    /// Importer le personnel depuis un CSV (`name,position`)
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Importer des créneaux depuis un CSV
    ImportShifts {
        #[arg(long)]
        csv: String,
    },

    /// Importer des fermetures depuis un CSV (`start,end`)
    ImportHolidays {
        #[arg(long)]
        csv: String,
    },

    /// Importer des congés approuvés depuis un CSV (`staff,start,end`)
    ImportLeaves {
        #[arg(long)]
        csv: String,
    },

    /// Déclarer un congé approuvé
    AddLeave {
        #[arg(long)]
        staff: String,
        /// YYYY-MM-DD (incluse)
        #[arg(long)]
        start: String,
        /// YYYY-MM-DD (incluse)
        #[arg(long)]
        end: String,
    },

    /// Déclarer une fermeture du service
    AddHoliday {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },

    /// Configurer les jours ouvrés : liste `mon,tue,...` ; tout jour
    /// absent de la liste est fermé
    SetWorkingDays {
        #[arg(long)]
        days: String,
    },

    /// Résoudre le planning d'un mois et afficher le bilan
    Solve {
        /// YYYY-MM
        #[arg(long)]
        month: String,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        /// Écart de charge toléré par rôle (réglage du service)
        #[arg(long, default_value_t = 1)]
        max_diff: i32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.department)?;

    let code = match cli.cmd {
        Commands::Init { name } => {
            let department = Department::new(name);
            storage.save(&department)?;
            println!("Created {} ({})", cli.department, department.id.as_str());
            0
        }
        Commands::AddShift {
            name,
            start,
            end,
            nurses,
            assistants,
        } => {
            let mut department = storage.load()?;
            let start = NaiveTime::parse_from_str(&start, "%H:%M")?;
            let end = NaiveTime::parse_from_str(&end, "%H:%M")?;
            let shift = ShiftDefinition::new(name, start, end, nurses, assistants)
                .map_err(anyhow::Error::msg)?;
            department.shifts.push(shift);
            storage.save(&department)?;
            0
        }
        Commands::ImportStaff { csv } => {
            let mut department = storage.load()?;
            let staff = io::import_staff_csv(csv)?;
            department.staff.extend(staff);
            storage.save(&department)?;
            0
        }
        Commands::ImportShifts { csv } => {
            let mut department = storage.load()?;
            let shifts = io::import_shifts_csv(csv)?;
            department.shifts.extend(shifts);
            storage.save(&department)?;
            0
        }
        Commands::ImportHolidays { csv } => {
            let mut department = storage.load()?;
            let holidays = io::import_holidays_csv(csv)?;
            department.holidays.extend(holidays);
            storage.save(&department)?;
            0
        }
        Commands::ImportLeaves { csv } => {
            let mut department = storage.load()?;
            let rows = io::import_leaves_csv(csv)?;
            let mut leaves = Vec::with_capacity(rows.len());
            for row in rows {
                let Some(member) = department.find_staff_by_name(&row.staff_name) else {
                    bail!("unknown staff member: {}", row.staff_name);
                };
                leaves.push(
                    LeaveRange::new(member.id.clone(), row.start, row.end)
                        .map_err(anyhow::Error::msg)?,
                );
            }
            department.leaves.extend(leaves);
            storage.save(&department)?;
            0
        }
        Commands::AddLeave { staff, start, end } => {
            let mut department = storage.load()?;
            let Some(member) = department.find_staff_by_name(&staff) else {
                bail!("unknown staff member: {staff}");
            };
            let id = member.id.clone();
            let start = NaiveDate::parse_from_str(&start, "%Y-%m-%d")?;
            let end = NaiveDate::parse_from_str(&end, "%Y-%m-%d")?;
            let leave = LeaveRange::new(id, start, end).map_err(anyhow::Error::msg)?;
            department.leaves.push(leave);
            storage.save(&department)?;
            0
        }
        Commands::AddHoliday { start, end } => {
            let mut department = storage.load()?;
            let start = NaiveDate::parse_from_str(&start, "%Y-%m-%d")?;
            let end = NaiveDate::parse_from_str(&end, "%Y-%m-%d")?;
            let holiday = HolidayRange::new(start, end).map_err(anyhow::Error::msg)?;
            department.holidays.push(holiday);
            storage.save(&department)?;
            0
        }
        Commands::SetWorkingDays { days } => {
            let mut department = storage.load()?;
            let mut open = Vec::new();
            for raw in days.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let day: Weekday = raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("unknown weekday: {raw}"))?;
                open.push(day);
            }
            if open.is_empty() {
                bail!("no weekday given");
            }
            department.working_days = WorkingDayCalendar::open_only(open);
            storage.save(&department)?;
            0
        }
        Commands::Solve {
            month,
            out_json,
            out_csv,
            max_diff,
        } => {
            let department = storage.load()?;
            let month: Month = month.parse()?;
            let options = SolveOptions {
                max_diff_allowed: max_diff,
            };
            let input = SolveInput::from_department(&department, month);
            let assignments = solve(&input, options)?;

            if let Some(path) = out_json {
                io::export_assignments_json(path, &assignments)?;
            }
            if let Some(path) = out_csv {
                io::export_assignments_csv(path, &assignments, &department)?;
            }

            let report = build_report(&input, &assignments, options);
            print!("{}", TextReport.render(&report));
            if report.is_complete() {
                0
            } else {
                // Code 2 = planning incomplet (sous-effectif), pas une erreur
                2
            }
        }
    };

    std::process::exit(code);
}
