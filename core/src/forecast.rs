//! Daily forecast ingestion and the batch staffing run.
//!
//! A forecast file is loaded whole or not at all: the first bad row
//! aborts the load. Once loaded, rows are immutable; staffing tables
//! are recomputed from them whenever the parameters change.

use crate::{
    error::{StaffingError, StaffingResult},
    formulas::calculate_agents,
    params::StaffingParams,
    types::{AgentCount, CallVolume},
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, io, path::Path};

pub const DATE_COLUMN: &str = "Date";
pub const DAY_COLUMN: &str = "Day";
pub const VOLUME_COLUMN: &str = "Forecasted Call Volume";

/// Largest accepted daily volume: 2^53, the last integer an f64
/// holds exactly, so every downstream float formula sees the true count.
pub const MAX_CALL_VOLUME: CallVolume = 1 << 53;

/// Accepted `Date` layouts, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date:        NaiveDate,
    /// Weekday label from the file, passed through untouched.
    pub day:         String,
    pub call_volume: CallVolume,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastTable {
    rows: Vec<ForecastRow>,
}

impl ForecastTable {
    pub fn new(rows: Vec<ForecastRow>) -> Self {
        Self { rows }
    }

    pub fn from_path(path: impl AsRef<Path>) -> StaffingResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        log::info!("forecast: loaded {} rows from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> StaffingResult<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(StaffingError::MissingColumn(name))
        };
        let date_idx = column(DATE_COLUMN)?;
        let day_idx = column(DAY_COLUMN)?;
        let volume_idx = column(VOLUME_COLUMN)?;

        let mut rows = Vec::new();
        for (i, record) in csv.records().enumerate() {
            let record = record?;
            let row = i + 1;

            let date_text = required_field(&record, date_idx, DATE_COLUMN, row)?;
            let date = parse_forecast_date(date_text).ok_or_else(|| StaffingError::InvalidForecastRow {
                row,
                reason: format!("unparseable date '{date_text}'"),
            })?;
            let day = required_field(&record, day_idx, DAY_COLUMN, row)?.to_string();
            let call_volume = parse_call_volume(required_field(&record, volume_idx, VOLUME_COLUMN, row)?)
                .map_err(|reason| StaffingError::InvalidForecastRow { row, reason })?;

            rows.push(ForecastRow { date, day, call_volume });
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ForecastRow] { &self.rows }
    pub fn len(&self) -> usize           { self.rows.len() }
    pub fn is_empty(&self) -> bool       { self.rows.is_empty() }

    /// Earliest and latest dates, or None for an empty table.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rows.iter().map(|r| r.date).min()?;
        let last = self.rows.iter().map(|r| r.date).max()?;
        Some((first, last))
    }

    /// Distinct (year, month) pairs in first-seen order.
    pub fn available_months(&self) -> Vec<(i32, u32)> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| (r.date.year(), r.date.month()))
            .filter(|ym| seen.insert(*ym))
            .collect()
    }

    /// Forecast volume for `date`; the first matching row wins.
    pub fn volume_on(&self, date: NaiveDate) -> StaffingResult<CallVolume> {
        match self.rows.iter().find(|r| r.date == date) {
            Some(r) => Ok(r.call_volume),
            None => {
                log::warn!("forecast: no row for {date}");
                Err(StaffingError::NoData { date })
            }
        }
    }
}

fn required_field<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    name: &str,
    row: usize,
) -> StaffingResult<&'r str> {
    match record.get(idx) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(StaffingError::InvalidForecastRow {
            row,
            reason: format!("missing {name}"),
        }),
    }
}

fn parse_forecast_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Whole, non-negative numbers up to [`MAX_CALL_VOLUME`];
/// `1200.0` is accepted as 1200.
fn parse_call_volume(text: &str) -> Result<CallVolume, String> {
    if let Ok(v) = text.parse::<CallVolume>() {
        if v > MAX_CALL_VOLUME {
            return Err(format!("call volume {text} exceeds {MAX_CALL_VOLUME}"));
        }
        return Ok(v);
    }
    let v: f64 = text
        .parse()
        .map_err(|_| format!("call volume '{text}' is not a number"))?;
    if !v.is_finite() || v < 0.0 {
        return Err(format!("call volume {text} must be a non-negative number"));
    }
    if v.fract() != 0.0 {
        return Err(format!("call volume {text} is not a whole number of calls"));
    }
    if v > MAX_CALL_VOLUME as f64 {
        return Err(format!("call volume {text} exceeds {MAX_CALL_VOLUME}"));
    }
    Ok(v as CallVolume)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingRow {
    #[serde(rename = "Date")]
    pub date:                     NaiveDate,
    #[serde(rename = "Day")]
    pub day:                      String,
    #[serde(rename = "Forecasted Call Volume")]
    pub call_volume:              CallVolume,
    #[serde(rename = "Agents (No Shrinkage)")]
    pub agents_without_shrinkage: AgentCount,
    #[serde(rename = "Agents (With Shrinkage)")]
    pub agents_with_shrinkage:    AgentCount,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StaffingTable {
    rows: Vec<StaffingRow>,
}

impl StaffingTable {
    pub fn new(rows: Vec<StaffingRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[StaffingRow] { &self.rows }
    pub fn len(&self) -> usize           { self.rows.len() }
    pub fn is_empty(&self) -> bool       { self.rows.is_empty() }

    pub fn for_month(&self, year: i32, month: u32) -> StaffingTable {
        let rows = self
            .rows
            .iter()
            .filter(|r| r.date.year() == year && r.date.month() == month)
            .cloned()
            .collect();
        Self { rows }
    }

    pub fn find(&self, date: NaiveDate) -> Option<&StaffingRow> {
        self.rows.iter().find(|r| r.date == date)
    }

    /// Write the table as CSV with the dashboard's column names.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> StaffingResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv.serialize(row)?;
        }
        csv.flush()?;
        Ok(())
    }
}

/// Apply the forward staffing formula to every forecast row, in order.
pub fn run_forecast(forecast: &ForecastTable, params: &StaffingParams) -> StaffingTable {
    let rows: Vec<StaffingRow> = forecast
        .rows()
        .iter()
        .map(|f| {
            let req = calculate_agents(f.call_volume, params);
            StaffingRow {
                date:                     f.date,
                day:                      f.day.clone(),
                call_volume:              f.call_volume,
                agents_without_shrinkage: req.without_shrinkage,
                agents_with_shrinkage:    req.with_shrinkage,
            }
        })
        .collect();

    log::info!(
        "forecast: staffed {} days, peak {} agents",
        rows.len(),
        rows.iter().map(|r| r.agents_with_shrinkage).max().unwrap_or(0)
    );

    StaffingTable { rows }
}
