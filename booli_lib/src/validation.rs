use chrono::NaiveDate;

use crate::error::BooliError;

pub const MAX_QUERY_LENGTH: usize = 100;

/// Date format the API expects for `minSoldDate` and `maxSoldDate`.
pub const SOLD_DATE_FORMAT: &str = "%Y%m%d";

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, BooliError> {
    if input.len() > max_len {
        return Err(BooliError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(BooliError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate the search text and lower-case it. The lower-cased form is what
/// gets sent and what names the output file.
pub fn validate_query(input: &str) -> Result<String, BooliError> {
    sanitize_text(input, MAX_QUERY_LENGTH).map(|q| q.to_lowercase())
}

/// Parse a `YYYYMMDD` date.
pub fn parse_sold_date(input: &str) -> Result<NaiveDate, BooliError> {
    let trimmed = input.trim();
    if trimmed.len() != 8 {
        return Err(invalid_date(trimmed));
    }
    NaiveDate::parse_from_str(trimmed, SOLD_DATE_FORMAT).map_err(|_| invalid_date(trimmed))
}

/// Validate a `YYYYMMDD` date and return it in canonical form.
pub fn validate_sold_date(input: &str) -> Result<String, BooliError> {
    parse_sold_date(input).map(format_sold_date)
}

pub fn format_sold_date(date: NaiveDate) -> String {
    date.format(SOLD_DATE_FORMAT).to_string()
}

/// Reject ranges whose start is after their end.
pub fn validate_date_range(min: &str, max: &str) -> Result<(), BooliError> {
    let (from, to) = (parse_sold_date(min)?, parse_sold_date(max)?);
    if from > to {
        return Err(BooliError::InvalidInput(format!(
            "minimum sold date {} is after maximum sold date {}",
            min, max
        )));
    }
    Ok(())
}

pub fn validate_limit(limit: u64) -> Result<u64, BooliError> {
    if limit == 0 {
        return Err(BooliError::InvalidInput(
            "limit must be at least 1".to_string(),
        ));
    }
    Ok(limit)
}

/// Parse an offset typed by a user: a non-negative integer.
pub fn validate_offset(input: &str) -> Result<u64, BooliError> {
    input.trim().parse::<u64>().map_err(|_| {
        BooliError::InvalidInput(format!(
            "invalid offset '{}'. Expected a non-negative integer",
            input.trim()
        ))
    })
}

fn invalid_date(input: &str) -> BooliError {
    BooliError::InvalidInput(format!(
        "invalid date '{}'. Expected format: YYYYMMDD (e.g., 20230101)",
        input
    ))
}
