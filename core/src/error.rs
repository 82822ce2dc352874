use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StaffingError {
    #[error("Invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name:   &'static str,
        value:  f64,
        reason: &'static str,
    },

    #[error("Forecast row {row} is invalid: {reason}")]
    InvalidForecastRow { row: usize, reason: String },

    #[error("Forecast file is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Hourly profile for {weekday} is invalid: {reason}")]
    InvalidProfile { weekday: String, reason: String },

    #[error("No calendar month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("No month number {0}, expected 1-12")]
    InvalidMonthNumber(u32),

    #[error("No data available for {date}")]
    NoData { date: NaiveDate },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StaffingError {
    /// True for the non-fatal "nothing to show for this date" condition.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}

pub type StaffingResult<T> = Result<T, StaffingError>;
