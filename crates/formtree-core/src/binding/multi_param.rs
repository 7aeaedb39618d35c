//! Multi-parameter date/time deconstruction
//!
//! Framework form helpers split a single date or datetime field into several
//! indexed parameters: `release_date(1i)` through `release_date(5i)` carry
//! year, month, day, hour, and minute. The coercion engine reassembles them
//! into one typed value, or rejects the group when the date parts are
//! incomplete or name an impossible calendar date. The caller's payload is
//! only ever read.
//!
//! Copyright (c) 2025 Formtree Team
//! Licensed under the Apache-2.0 license

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

/// Result of deconstructing one multi-parameter group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiParamOutcome {
    /// No part key for this property appears in the payload at all
    Absent,
    /// Part keys are present but the group does not form a valid date;
    /// nothing is assigned and nothing is raised
    Rejected,
    /// Year, month, and day formed a valid date
    Date(NaiveDate),
    /// Hour and minute additionally present: a combined date-time
    DateTime(NaiveDateTime),
}

/// Reassemble the `<name>(1i)`..`<name>(5i)` group from a flat payload object
pub fn deconstruct(payload: &Map<String, Value>, name: &str) -> MultiParamOutcome {
    let part = |index: u32| payload.get(&format!("{}({}i)", name, index));

    if (1..=5).all(|i| part(i).is_none()) {
        return MultiParamOutcome::Absent;
    }

    // Year, month, day gate the whole group.
    let (Some(year), Some(month), Some(day)) =
        (numeric(part(1)), numeric(part(2)), numeric(part(3)))
    else {
        return MultiParamOutcome::Rejected;
    };

    let year = match i32::try_from(year) {
        Ok(y) => y,
        Err(_) => return MultiParamOutcome::Rejected,
    };
    let (Ok(month), Ok(day)) = (u32::try_from(month), u32::try_from(day)) else {
        return MultiParamOutcome::Rejected;
    };
    let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
        return MultiParamOutcome::Rejected;
    };

    // Hour and minute upgrade the date as a unit; empty or missing time
    // parts leave a bare date.
    match (numeric(part(4)), numeric(part(5))) {
        (Some(hour), Some(minute)) => {
            let (Ok(hour), Ok(minute)) = (u32::try_from(hour), u32::try_from(minute)) else {
                return MultiParamOutcome::Rejected;
            };
            match date.and_hms_opt(hour, minute, 0) {
                Some(datetime) => MultiParamOutcome::DateTime(datetime),
                None => MultiParamOutcome::Rejected,
            }
        }
        _ => MultiParamOutcome::Date(date),
    }
}

// A part counts only when it is a number or a non-blank numeric string.
fn numeric(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse().ok()
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(parts: &[(u32, Value)]) -> Map<String, Value> {
        parts
            .iter()
            .map(|(i, v)| (format!("release_date({}i)", i), v.clone()))
            .collect()
    }

    #[test]
    fn test_complete_date() {
        let parts = payload(&[(1, json!("1997")), (2, json!("9")), (3, json!("27"))]);
        assert_eq!(
            deconstruct(&parts, "release_date"),
            MultiParamOutcome::Date(NaiveDate::from_ymd_opt(1997, 9, 27).unwrap())
        );
    }

    #[test]
    fn test_datetime_upgrade() {
        let parts = payload(&[
            (1, json!("1997")),
            (2, json!("9")),
            (3, json!("27")),
            (4, json!("10")),
            (5, json!("11")),
        ]);
        assert_eq!(
            deconstruct(&parts, "release_date"),
            MultiParamOutcome::DateTime(
                NaiveDate::from_ymd_opt(1997, 9, 27)
                    .unwrap()
                    .and_hms_opt(10, 11, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_empty_date_part_rejects() {
        for missing in 1..=3 {
            let mut parts = payload(&[(1, json!("1997")), (2, json!("9")), (3, json!("27"))]);
            parts.insert(format!("release_date({}i)", missing), json!(""));
            assert_eq!(
                deconstruct(&parts, "release_date"),
                MultiParamOutcome::Rejected
            );
        }
    }

    #[test]
    fn test_null_time_parts_leave_a_date() {
        let parts = payload(&[
            (1, json!("1997")),
            (2, json!("9")),
            (3, json!("27")),
            (4, Value::Null),
            (5, Value::Null),
        ]);
        assert!(matches!(
            deconstruct(&parts, "release_date"),
            MultiParamOutcome::Date(_)
        ));
    }

    #[test]
    fn test_impossible_calendar_date_rejects() {
        let parts = payload(&[(1, json!("2001")), (2, json!("2")), (3, json!("31"))]);
        assert_eq!(
            deconstruct(&parts, "release_date"),
            MultiParamOutcome::Rejected
        );
    }

    #[test]
    fn test_non_numeric_part_rejects() {
        let parts = payload(&[(1, json!("199x")), (2, json!("9")), (3, json!("27"))]);
        assert_eq!(
            deconstruct(&parts, "release_date"),
            MultiParamOutcome::Rejected
        );
    }

    #[test]
    fn test_numeric_json_numbers_accepted() {
        let parts = payload(&[(1, json!(1997)), (2, json!(9)), (3, json!(27))]);
        assert!(matches!(
            deconstruct(&parts, "release_date"),
            MultiParamOutcome::Date(_)
        ));
    }

    #[test]
    fn test_no_part_keys_is_absent() {
        let other = payload(&[(1, json!("1997"))]);
        assert_eq!(deconstruct(&other, "published_on"), MultiParamOutcome::Absent);
    }
}
