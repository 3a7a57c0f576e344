use crate::model::{HolidayRange, WorkingDayCalendar};
use crate::solver::SolveError;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Mois calendaire ciblé par une résolution, au format `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self, SolveError> {
        // from_ymd_opt valide aussi les années hors bornes chrono
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(SolveError::InvalidMonth(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| unreachable!("validated at construction"))
    }

    /// Tous les jours du mois, dans l'ordre.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut out = Vec::with_capacity(31);
        let mut current = self.first_day();
        while current.month() == self.month {
            out.push(current);
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        out
    }
}

impl FromStr for Month {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SolveError::InvalidMonth(s.to_string());
        let (y, m) = s.split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        Month::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Jours planifiables du mois : jour ouvré du service ET hors fermeture.
/// Séquence matérialisée (≤ 31 entrées), triée croissante.
pub fn resolve_working_days(
    month: Month,
    working_days: &WorkingDayCalendar,
    holidays: &[HolidayRange],
) -> Vec<NaiveDate> {
    month
        .days()
        .into_iter()
        .filter(|d| working_days.is_open(*d))
        .filter(|d| !holidays.iter().any(|h| h.contains(*d)))
        .collect()
}
