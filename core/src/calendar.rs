//! Month calendar layout for staffing results.
//!
//! Weeks start on Monday. Every week row has exactly seven cells;
//! days outside the month are blank, days without a staffing row are
//! marked as having no data.

use crate::{
    error::{StaffingError, StaffingResult},
    forecast::{StaffingRow, StaffingTable},
    types::{AgentCount, CallVolume, DAYS_PER_WEEK},
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

/// Date label shown in a staffed cell.
pub const CELL_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    /// Padding before the 1st or after the last day of the month.
    Blank,
    NoData {
        date: NaiveDate,
    },
    Staffed {
        date:        NaiveDate,
        agents:      AgentCount,
        call_volume: CallVolume,
        label:       String,
    },
}

impl CalendarCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Blank => None,
            Self::NoData { date } | Self::Staffed { date, .. } => Some(*date),
        }
    }
}

pub type CalendarWeek = [CalendarCell; DAYS_PER_WEEK];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    pub year:  i32,
    pub month: u32,
    pub weeks: Vec<CalendarWeek>,
}

impl CalendarGrid {
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.weeks.iter().flatten()
    }

    pub fn staffed_days(&self) -> usize {
        self.cells()
            .filter(|c| matches!(c, CalendarCell::Staffed { .. }))
            .count()
    }
}

fn first_of_month(year: i32, month: u32) -> StaffingResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(StaffingError::InvalidMonth { year, month })
}

pub fn days_in_month(year: i32, month: u32) -> StaffingResult<u32> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    Ok((next - first).num_days() as u32)
}

/// Monday-first week rows needed to lay out the month: 4, 5 or 6.
pub fn weeks_in_month(year: i32, month: u32) -> StaffingResult<usize> {
    let lead = first_of_month(year, month)?.weekday().num_days_from_monday() as usize;
    let days = days_in_month(year, month)? as usize;
    Ok((lead + days).div_ceil(DAYS_PER_WEEK))
}

/// Lay out `rows` for one month. Rows from other months are ignored;
/// on duplicate dates the first row wins.
pub fn build_calendar(rows: &StaffingTable, year: i32, month: u32) -> StaffingResult<CalendarGrid> {
    let first = first_of_month(year, month)?;
    let days = days_in_month(year, month)?;
    let lead = first.weekday().num_days_from_monday() as usize;

    let mut by_date: HashMap<NaiveDate, &StaffingRow> = HashMap::new();
    for row in rows.rows() {
        if by_date.contains_key(&row.date) {
            log::warn!("calendar: duplicate row for {}, keeping the first", row.date);
            continue;
        }
        by_date.insert(row.date, row);
    }

    let mut cells: Vec<CalendarCell> = vec![CalendarCell::Blank; lead];
    for day in 0..days {
        let date = first + chrono::Days::new(day as u64);
        let cell = match by_date.get(&date) {
            Some(row) => CalendarCell::Staffed {
                date,
                agents:      row.agents_with_shrinkage,
                call_volume: row.call_volume,
                label:       date.format(CELL_DATE_FORMAT).to_string(),
            },
            None => CalendarCell::NoData { date },
        };
        cells.push(cell);
    }
    let padded = cells.len().div_ceil(DAYS_PER_WEEK) * DAYS_PER_WEEK;
    cells.resize(padded, CalendarCell::Blank);

    let weeks: Vec<CalendarWeek> = cells
        .chunks_exact(DAYS_PER_WEEK)
        .map(|week| std::array::from_fn(|i| week[i].clone()))
        .collect();

    log::debug!(
        "calendar: {year}-{month:02} laid out in {} weeks, {} staffed days",
        weeks.len(),
        by_date.keys().filter(|d| d.year() == year && d.month() == month).count()
    );

    Ok(CalendarGrid { year, month, weeks })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2024, 12).unwrap(), 31);
        assert_eq!(days_in_month(2024, 4).unwrap(), 30);
    }

    #[test]
    fn bad_month_is_rejected() {
        assert!(matches!(
            weeks_in_month(2024, 13),
            Err(StaffingError::InvalidMonth { year: 2024, month: 13 })
        ));
        assert!(days_in_month(2024, 0).is_err());
    }
}
