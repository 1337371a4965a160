//! Month/year normalization for relationship end dates.

use chrono::{Days, NaiveDate};
use tracing::warn;

use super::patterns::MONTH_YEAR_ONLY;
use crate::error::ExtractionError;

/// Date format used throughout CNIS statements.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Last calendar day of a `MM/YYYY` value.
///
/// The first day of the following month is built (December rolls over to
/// January of the next year) and one day is subtracted from it.
pub fn last_day_of_month(month_year: &str) -> Result<NaiveDate, ExtractionError> {
    let caps = MONTH_YEAR_ONLY
        .captures(month_year.trim())
        .ok_or_else(|| ExtractionError::InvalidMonthYear(month_year.to_string()))?;

    let month: u32 = caps[1]
        .parse()
        .map_err(|_| ExtractionError::InvalidMonthYear(month_year.to_string()))?;
    let year: i32 = caps[2]
        .parse()
        .map_err(|_| ExtractionError::InvalidMonthYear(month_year.to_string()))?;

    if !(1..=12).contains(&month) {
        return Err(ExtractionError::InvalidMonthYear(month_year.to_string()));
    }

    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1), 1)
    } else {
        (Some(year), month + 1)
    };

    next_year
        .and_then(|y| NaiveDate::from_ymd_opt(y, next_month, 1))
        .and_then(|first| first.checked_sub_days(Days::new(1)))
        .ok_or_else(|| ExtractionError::DateOverflow(month_year.to_string()))
}

/// Convert `MM/YYYY` into `DD/MM/YYYY` for the last day of that month.
///
/// Never fails: a value that cannot be converted is logged and returned
/// unchanged so the caller can still record it.
pub fn normalize_month_year(month_year: &str) -> String {
    match last_day_of_month(month_year) {
        Ok(date) => date.format(DATE_FORMAT).to_string(),
        Err(e) => {
            warn!("Could not convert {:?} to a full date: {}", month_year, e);
            month_year.to_string()
        }
    }
}
