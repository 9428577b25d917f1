use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One employee's punches for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_code: u64,
    pub employee_name: String,
    pub in_time: Option<NaiveDateTime>,
    pub out_time: Option<NaiveDateTime>,
    pub att_date: NaiveDate,
}

/// Punch row as it comes off the attendance store. The device DB stores
/// times as text, so they are parsed before classification; a row that
/// fails to parse is skipped, not fatal to the batch.
#[derive(Debug, sqlx::FromRow)]
pub struct RawPunchRow {
    pub employee_code: u64,
    pub employee_name: String,
    pub in_time: Option<String>,
    pub out_time: Option<String>,
    pub att_date: NaiveDate,
}

impl RawPunchRow {
    pub fn into_record(self) -> Result<AttendanceRecord, chrono::ParseError> {
        let in_time = self.in_time.as_deref().map(parse_punch_time).transpose()?;
        let out_time = self.out_time.as_deref().map(parse_punch_time).transpose()?;
        Ok(AttendanceRecord {
            employee_code: self.employee_code,
            employee_name: self.employee_name,
            in_time,
            out_time,
            att_date: self.att_date,
        })
    }
}

/// Accepts both `2025-10-12 08:00:00` and ISO-8601 `2025-10-12T08:00:00`.
pub fn parse_punch_time(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").or_else(|_| s.parse())
}

/// Day outcome for one record. Externally these travel as the single-letter
/// codes P/A/M, both over the wire and in operator input.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    ToSchema,
)]
pub enum AttendanceStatus {
    #[serde(rename = "P")]
    #[strum(serialize = "P")]
    Present,
    #[serde(rename = "A")]
    #[strum(serialize = "A")]
    Absent,
    #[serde(rename = "M")]
    #[strum(serialize = "M")]
    Missing,
}

/// Midnight stands for "no punch" in the store, down to the minute the
/// report cares about.
pub fn is_zero_time(t: NaiveDateTime) -> bool {
    t.hour() == 0 && t.minute() == 0
}

impl AttendanceStatus {
    /// Infers the status already implied by a record's stored punches.
    /// Exactly one arm matches any (in, out) pair.
    pub fn infer(in_time: NaiveDateTime, out_time: NaiveDateTime) -> Self {
        if is_zero_time(in_time) && is_zero_time(out_time) {
            AttendanceStatus::Absent
        } else if in_time == out_time || is_zero_time(out_time) {
            AttendanceStatus::Missing
        } else {
            AttendanceStatus::Present
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn row(in_time: Option<&str>, out_time: Option<&str>) -> RawPunchRow {
        RawPunchRow {
            employee_code: 1042,
            employee_name: "Rahim Uddin".into(),
            in_time: in_time.map(String::from),
            out_time: out_time.map(String::from),
            att_date: "2025-10-12".parse().unwrap(),
        }
    }

    #[test]
    fn punch_time_accepts_space_separated_format() {
        let t = parse_punch_time("2025-10-12 08:00:00").unwrap();
        assert_eq!(t, "2025-10-12T08:00:00".parse::<NaiveDateTime>().unwrap());
    }

    #[test]
    fn punch_time_accepts_iso_8601() {
        let t = parse_punch_time("2025-10-12T18:30:00").unwrap();
        assert_eq!(t.format("%H:%M").to_string(), "18:30");
    }

    #[test]
    fn malformed_punch_time_is_an_error() {
        assert!(parse_punch_time("garbage").is_err());
        assert!(parse_punch_time("12/10/2025 08:00").is_err());
    }

    #[test]
    fn row_with_valid_times_parses_into_a_record() {
        let r = row(Some("2025-10-12 08:00:00"), Some("2025-10-12T18:30:00"))
            .into_record()
            .unwrap();
        assert_eq!(r.in_time, Some("2025-10-12T08:00:00".parse().unwrap()));
        assert_eq!(r.out_time, Some("2025-10-12T18:30:00".parse().unwrap()));
    }

    #[test]
    fn unparsable_time_fails_only_that_row() {
        assert!(row(Some("garbage"), Some("2025-10-12 18:30:00"))
            .into_record()
            .is_err());
    }

    #[test]
    fn absent_punch_passes_through_as_none() {
        let r = row(Some("2025-10-12 08:00:00"), None).into_record().unwrap();
        assert!(r.in_time.is_some());
        assert_eq!(r.out_time, None);
    }

    #[test]
    fn status_codes_round_trip_through_their_letters() {
        for (code, status) in [
            ("P", AttendanceStatus::Present),
            ("A", AttendanceStatus::Absent),
            ("M", AttendanceStatus::Missing),
        ] {
            assert_eq!(AttendanceStatus::from_str(code).unwrap(), status);
            assert_eq!(status.to_string(), code);
        }
    }

    #[test]
    fn unknown_status_code_is_rejected() {
        assert!(AttendanceStatus::from_str("X").is_err());
        assert!(AttendanceStatus::from_str("p").is_err());
    }
}
