//! Date handling for the range routes.
//!
//! Dates travel as zero-padded ISO `YYYY-MM-DD` text, both in the database and
//! in request paths, so text order equals calendar order.

use chrono::{Months, NaiveDate};

use crate::error::{Result, SurfsUpError};

/// Format used by the database and the API
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date taken from a request path.
///
/// `param` names the path segment in the error message.
pub fn parse_date(param: &str, raw: &str) -> Result<NaiveDate> {
    // chrono also takes signed, wide or unpadded fields; those break text order
    if !has_iso_shape(raw) {
        return Err(SurfsUpError::InvalidParameter {
            param: param.to_string(),
            message: format!("'{}' is not a YYYY-MM-DD date", raw),
        });
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| SurfsUpError::InvalidParameter {
        param: param.to_string(),
        message: format!("'{}' is not a YYYY-MM-DD date ({})", raw, e),
    })
}

/// Exactly `dddd-dd-dd`
fn has_iso_shape(raw: &str) -> bool {
    raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parse a date read back from the database
pub fn parse_stored_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| SurfsUpError::Server {
        message: format!("Stored date '{}' is not a YYYY-MM-DD date ({})", raw, e),
    })
}

/// Render a date the way the database stores it
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Same month and day one year earlier.
///
/// Feb 29 maps to Feb 28 when the previous year is not a leap year.
pub fn one_year_before(date: NaiveDate) -> Result<NaiveDate> {
    date.checked_sub_months(Months::new(12))
        .ok_or_else(|| SurfsUpError::InvalidParameter {
            param: "date".to_string(),
            message: format!("{} has no date one year earlier", date),
        })
}

/// Validate an inclusive `[start, end]` range from the request path
pub fn parse_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate)> {
    let start = parse_date("start", start)?;
    let end = parse_date("end", end)?;
    if start > end {
        return Err(SurfsUpError::InvalidParameter {
            param: "end".to_string(),
            message: format!(
                "end {} is before start {}",
                format_date(end),
                format_date(start)
            ),
        });
    }
    Ok((start, end))
}
