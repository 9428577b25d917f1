use chrono::{Datelike, Duration, NaiveDateTime};

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::shift::ShiftProfile;

use super::{floor_half_hour, overtime::calculate_ot_ut, EngineConfig};

pub const MISSING_REASON: &str = "MIS";

/// Outcome of classifying one record. Deviation fields are only ever set
/// on Present records; any combination of the three may fire on the same
/// day.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub status: AttendanceStatus,
    pub in_time: NaiveDateTime,
    pub out_time: NaiveDateTime,
    /// Worked hours floored to the nearest half hour.
    pub worked_hours: f64,
    /// Minutes past scheduled shift start, when beyond grace.
    pub late_by: Option<i64>,
    /// Minutes short of scheduled shift end, when beyond grace.
    pub early_by: Option<i64>,
    /// Positive overtime in half-hour units. Undertime is computed but not
    /// surfaced here; the report only carries an overtimers bucket.
    pub overtime: Option<f64>,
}

/// Records that cannot be classified. None of these abort a batch; the
/// caller skips the record and logs which employee it belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PunchDefect {
    #[display(fmt = "no in/out punch recorded")]
    MissingPunch,
    #[display(fmt = "out-time earlier than in-time")]
    ReversedInterval,
}

/// Classifies one day's punches against the employee's shift profile.
pub fn classify(
    record: &AttendanceRecord,
    profile: &ShiftProfile,
    cfg: &EngineConfig,
) -> Result<Classification, PunchDefect> {
    let (in_time, out_time) = match (record.in_time, record.out_time) {
        (Some(i), Some(o)) => (i, o),
        _ => return Err(PunchDefect::MissingPunch),
    };

    let status = AttendanceStatus::infer(in_time, out_time);

    // A zero out-time sorts before the in punch but means "no punch", so
    // the reversed-interval defect only applies to genuine Present pairs.
    if status == AttendanceStatus::Present && out_time < in_time {
        return Err(PunchDefect::ReversedInterval);
    }

    let worked_hours = if out_time >= in_time {
        floor_half_hour((out_time - in_time).num_seconds() as f64 / 3600.0)
    } else {
        0.0
    };

    let mut result = Classification {
        status,
        in_time,
        out_time,
        worked_hours,
        late_by: None,
        early_by: None,
        overtime: None,
    };

    // Absent and missing-punch days carry no deviations.
    if status != AttendanceStatus::Present {
        return Ok(result);
    }

    let shift_start = record
        .att_date
        .and_hms_opt(cfg.shift_start_hour, 0, 0)
        .unwrap_or_else(|| record.att_date.and_hms_opt(0, 0, 0).unwrap());
    let shift_end = shift_start + Duration::seconds((profile.working_hours * 3600.0) as i64);
    let grace = Duration::minutes(cfg.grace_minutes);

    if in_time > shift_start + grace {
        result.late_by = Some((in_time - shift_start).num_minutes());
    }
    if out_time < shift_end - grace {
        result.early_by = Some((shift_end - out_time).num_minutes());
    }

    // Only positive adjustments reach the report; undertime stays internal.
    if let Some(ot) = calculate_ot_ut(
        in_time,
        out_time,
        record.att_date.weekday(),
        profile.sunday_duty,
        profile.working_hours,
        cfg.grace_minutes,
    ) {
        if ot > 0.0 {
            result.overtime = Some(ot);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, in_t: &str, out_t: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee_code: 1042,
            employee_name: "Rahim Uddin".into(),
            in_time: Some(format!("{date}T{in_t}:00").parse().unwrap()),
            out_time: Some(format!("{date}T{out_t}:00").parse().unwrap()),
            att_date: date.parse::<NaiveDate>().unwrap(),
        }
    }

    fn profile(hours: f64) -> ShiftProfile {
        ShiftProfile {
            employee_code: 1042,
            working_hours: hours,
            sunday_duty: false,
        }
    }

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn both_midnight_is_absent() {
        let c = classify(&record("2025-10-14", "00:00", "00:00"), &profile(10.0), &cfg()).unwrap();
        assert_eq!(c.status, AttendanceStatus::Absent);
        assert_eq!(c.late_by, None);
        assert_eq!(c.early_by, None);
        assert_eq!(c.overtime, None);
    }

    #[test]
    fn zero_out_time_is_missing() {
        let c = classify(&record("2025-10-14", "08:02", "00:00"), &profile(10.0), &cfg()).unwrap();
        assert_eq!(c.status, AttendanceStatus::Missing);
        assert_eq!(c.worked_hours, 0.0);
        assert_eq!(c.late_by, None);
        assert_eq!(c.early_by, None);
    }

    #[test]
    fn reversed_present_interval_is_a_defect() {
        let c = classify(&record("2025-10-14", "18:00", "08:30"), &profile(10.0), &cfg());
        assert_eq!(c, Err(PunchDefect::ReversedInterval));
    }

    #[test]
    fn identical_punches_are_missing() {
        let c = classify(&record("2025-10-14", "08:02", "08:02"), &profile(10.0), &cfg()).unwrap();
        assert_eq!(c.status, AttendanceStatus::Missing);
        assert_eq!(c.worked_hours, 0.0);
        assert_eq!(c.late_by, None);
    }

    #[test]
    fn punctual_full_day_has_no_deviations() {
        let c = classify(&record("2025-10-14", "08:00", "18:05"), &profile(10.0), &cfg()).unwrap();
        assert_eq!(c.status, AttendanceStatus::Present);
        assert_eq!(c.late_by, None);
        assert_eq!(c.early_by, None);
        assert_eq!(c.overtime, None);
    }

    #[test]
    fn late_arrival_measured_from_shift_start() {
        let c = classify(&record("2025-10-14", "09:05", "18:00"), &profile(10.0), &cfg()).unwrap();
        assert_eq!(c.status, AttendanceStatus::Present);
        assert_eq!(c.late_by, Some(65));
        assert_eq!(c.early_by, None);
    }

    #[test]
    fn half_hour_overtime_surfaces_on_present_day() {
        let c = classify(&record("2025-10-14", "08:00", "18:30"), &profile(10.0), &cfg()).unwrap();
        assert_eq!(c.status, AttendanceStatus::Present);
        assert_eq!(c.late_by, None);
        assert_eq!(c.early_by, None);
        assert_eq!(c.overtime, Some(0.5));
    }

    #[test]
    fn early_departure_measured_from_shift_end() {
        let c = classify(&record("2025-10-14", "08:00", "16:30"), &profile(10.0), &cfg()).unwrap();
        assert_eq!(c.early_by, Some(90));
        assert_eq!(c.late_by, None);
    }

    #[test]
    fn late_and_early_can_fire_together() {
        let c = classify(&record("2025-10-14", "09:30", "16:00"), &profile(10.0), &cfg()).unwrap();
        assert_eq!(c.late_by, Some(90));
        assert_eq!(c.early_by, Some(120));
    }

    #[test]
    fn arrival_inside_grace_is_not_late() {
        let c = classify(&record("2025-10-14", "08:20", "18:10"), &profile(10.0), &cfg()).unwrap();
        assert_eq!(c.late_by, None);
    }

    #[test]
    fn undertime_never_reaches_the_overtime_field() {
        let c = classify(&record("2025-10-14", "08:00", "15:00"), &profile(10.0), &cfg()).unwrap();
        assert_eq!(c.overtime, None);
        assert_eq!(c.early_by, Some(180));
    }

    #[test]
    fn missing_punch_is_reported_not_classified() {
        let mut r = record("2025-10-14", "08:00", "18:00");
        r.out_time = None;
        assert_eq!(classify(&r, &profile(10.0), &cfg()), Err(PunchDefect::MissingPunch));
    }

    #[test]
    fn custom_policy_moves_the_shift_window() {
        let policy = EngineConfig {
            shift_start_hour: 9,
            grace_minutes: 5,
            ..EngineConfig::default()
        };
        let c = classify(&record("2025-10-14", "09:06", "17:00"), &profile(8.0), &policy).unwrap();
        assert_eq!(c.late_by, Some(6));
        assert_eq!(c.early_by, None);
    }
}
