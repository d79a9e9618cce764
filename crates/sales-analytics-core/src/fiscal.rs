//! Fiscal calendar.
//!
//! The fiscal year runs October through September and is named after the
//! calendar year in which it ends: 2024-10-01 opens FY2025, 2024-09-30
//! closes FY2024.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::SalesAnalyticsError;
use crate::SalesResult;

/// First calendar month of the fiscal year.
const FISCAL_YEAR_START_MONTH: u32 = 10;

/// Quarter of the fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FiscalQuarter {
    /// October to December
    Q1,
    /// January to March
    Q2,
    /// April to June
    Q3,
    /// July to September
    Q4,
}

/// Fiscal year a calendar date falls in.
pub fn fiscal_year(date: NaiveDate) -> i32 {
    if date.month() >= FISCAL_YEAR_START_MONTH {
        date.year() + 1
    } else {
        date.year()
    }
}

/// Equality path against a precomputed fiscal-year column. Always agrees
/// with [`fiscal_year`] for the same date.
pub fn is_in_fiscal_year(date: NaiveDate, year: i32) -> bool {
    fiscal_year(date) == year
}

/// Fiscal quarter a calendar date falls in.
pub fn fiscal_quarter(date: NaiveDate) -> FiscalQuarter {
    // Shift so October becomes month 0 of the fiscal year.
    let offset = (date.month() + 12 - FISCAL_YEAR_START_MONTH) % 12;
    match offset / 3 {
        0 => FiscalQuarter::Q1,
        1 => FiscalQuarter::Q2,
        2 => FiscalQuarter::Q3,
        _ => FiscalQuarter::Q4,
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(text: &str) -> SalesResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|e| {
        SalesAnalyticsError::invalid("date", format!("'{text}' is not a YYYY-MM-DD date: {e}"))
    })
}

/// First day of the month containing `date`.
pub(crate) fn month_start(date: NaiveDate) -> SalesResult<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).ok_or_else(|| {
        SalesAnalyticsError::DateError(format!("no month start for {date}"))
    })
}
