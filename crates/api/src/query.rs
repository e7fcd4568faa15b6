//! Query-string parsing for the since-cursor listing endpoints.

use serde::Deserialize;

use kanban_core::types::Timestamp;

use crate::error::AppError;

/// `?since=` query parameters on the `/sync/*` listing endpoints.
#[derive(Debug, Deserialize)]
pub struct SinceQuery {
    pub since: Option<String>,
}

/// Parse a `since` cursor.
///
/// Accepts a bare `YYYY-MM-DD` date (normalized to midnight UTC) or a full
/// RFC 3339 timestamp. An absent value means "everything"; an unparseable
/// value is a 400.
pub fn parse_since(query: &SinceQuery) -> Result<Option<Timestamp>, AppError> {
    let Some(raw) = query.since.as_deref() else {
        return Ok(None);
    };

    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date.and_time(chrono::NaiveTime::MIN).and_utc()));
    }

    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Ok(Some(ts.with_timezone(&chrono::Utc))),
        Err(_) => Err(AppError::BadRequest(format!(
            "Invalid 'since' value: {raw}. Expected YYYY-MM-DD or an ISO 8601 timestamp."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn query(raw: Option<&str>) -> SinceQuery {
        SinceQuery {
            since: raw.map(String::from),
        }
    }

    #[test]
    fn absent_since_means_everything() {
        assert_matches!(parse_since(&query(None)), Ok(None));
    }

    #[test]
    fn bare_date_normalizes_to_midnight_utc() {
        let parsed = parse_since(&query(Some("2024-03-05"))).unwrap();
        assert_eq!(parsed, Some(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()));
    }

    #[test]
    fn full_timestamp_is_accepted() {
        let parsed = parse_since(&query(Some("2024-03-05T12:30:00+02:00"))).unwrap();
        assert_eq!(
            parsed,
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap()),
        );
    }

    #[test]
    fn garbage_is_a_bad_request() {
        assert_matches!(parse_since(&query(Some("last tuesday"))), Err(AppError::BadRequest(_)));
    }
}
