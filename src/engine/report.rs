use chrono::NaiveDate;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::report::{ClassificationReport, DeviationEntry};
use crate::model::shift::ShiftProfile;

use super::classify::{classify, Classification, MISSING_REASON};
use super::roster::ShiftRoster;
use super::EngineConfig;

const TIME_FMT: &str = "%H:%M";

/// Classifies a batch of one day's records and buckets the results into
/// the four report sections. The reporting date comes from the caller, not
/// from the data; records carrying a different date are skipped with a
/// diagnostic so a mixed batch cannot silently produce a mislabeled
/// report.
pub fn build_daily_report(
    report_date: NaiveDate,
    records: &[AttendanceRecord],
    roster: &ShiftRoster,
    cfg: &EngineConfig,
) -> ClassificationReport {
    let mut report = ClassificationReport::new(report_date);

    for record in records {
        if record.att_date != report_date {
            tracing::warn!(
                employee_code = record.employee_code,
                record_date = %record.att_date,
                report_date = %report_date,
                "Record is outside the reporting date, skipping"
            );
            continue;
        }

        let profile = roster.profile_for(record.employee_code);
        let c = match classify(record, &profile, cfg) {
            Ok(c) => c,
            Err(defect) => {
                tracing::warn!(
                    employee_code = record.employee_code,
                    employee = %record.employee_name,
                    reason = %defect,
                    "Record skipped"
                );
                continue;
            }
        };

        tracing::info!(
            employee_code = record.employee_code,
            employee = %record.employee_name,
            status = %c.status,
            "Report analysing"
        );

        match c.status {
            // Absentees appear in no bucket.
            AttendanceStatus::Absent => continue,
            AttendanceStatus::Missing => {
                let mut e = entry(record, &profile, &c, report.missing_attendance.len());
                e.reason = Some(MISSING_REASON.to_string());
                report.missing_attendance.push(e);
            }
            AttendanceStatus::Present => {
                if let Some(minutes) = c.late_by {
                    let mut e = entry(record, &profile, &c, report.late_arrival.len());
                    e.late_by = Some(minutes);
                    report.late_arrival.push(e);
                }
                if let Some(minutes) = c.early_by {
                    let mut e = entry(record, &profile, &c, report.left_early.len());
                    e.left_early = Some(minutes);
                    report.left_early.push(e);
                }
                if let Some(hours) = c.overtime {
                    let mut e = entry(record, &profile, &c, report.overtimers.len());
                    e.overtime = Some(hours);
                    report.overtimers.push(e);
                }
            }
        }
    }

    report
}

fn entry(
    record: &AttendanceRecord,
    profile: &ShiftProfile,
    c: &Classification,
    bucket_len: usize,
) -> DeviationEntry {
    DeviationEntry {
        sr_no: bucket_len as u32 + 1,
        code: record.employee_code,
        employee: record.employee_name.clone(),
        shift_hours: profile.working_hours,
        in_time: c.in_time.format(TIME_FMT).to_string(),
        out_time: c.out_time.format(TIME_FMT).to_string(),
        working_hour: c.worked_hours,
        reason: None,
        late_by: None,
        left_early: None,
        overtime: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        "2025-10-14".parse().unwrap()
    }

    fn record(code: u64, name: &str, in_t: &str, out_t: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee_code: code,
            employee_name: name.into(),
            in_time: Some(format!("2025-10-14T{in_t}:00").parse().unwrap()),
            out_time: Some(format!("2025-10-14T{out_t}:00").parse().unwrap()),
            att_date: date(),
        }
    }

    fn roster() -> ShiftRoster {
        ShiftRoster::from_profiles(Vec::new(), &EngineConfig::default())
    }

    #[test]
    fn buckets_fill_independently_in_input_order() {
        let records = vec![
            record(1, "On Time", "08:05", "18:10"),
            record(2, "Late", "09:05", "18:00"),
            record(3, "Early", "08:00", "16:30"),
            record(4, "Late And Early", "09:30", "16:00"),
            record(5, "Overtimer", "08:00", "19:00"),
            record(6, "Absent", "00:00", "00:00"),
            record(7, "Forgot Out", "08:10", "00:00"),
        ];
        let report = build_daily_report(date(), &records, &roster(), &EngineConfig::default());

        let codes = |v: &[DeviationEntry]| v.iter().map(|e| e.code).collect::<Vec<_>>();
        assert_eq!(codes(&report.late_arrival), vec![2, 4]);
        assert_eq!(codes(&report.left_early), vec![3, 4]);
        assert_eq!(codes(&report.overtimers), vec![5]);
        assert_eq!(codes(&report.missing_attendance), vec![7]);
    }

    #[test]
    fn sequence_numbers_are_one_based_per_bucket() {
        let records = vec![
            record(1, "Late A", "09:05", "18:00"),
            record(2, "Late B", "10:00", "18:00"),
        ];
        let report = build_daily_report(date(), &records, &roster(), &EngineConfig::default());
        let srs: Vec<u32> = report.late_arrival.iter().map(|e| e.sr_no).collect();
        assert_eq!(srs, vec![1, 2]);
    }

    #[test]
    fn absentees_appear_in_no_bucket() {
        let records = vec![record(1, "Absent", "00:00", "00:00")];
        let report = build_daily_report(date(), &records, &roster(), &EngineConfig::default());
        assert!(report.is_empty());
    }

    #[test]
    fn missing_bucket_rows_carry_the_fixed_reason_code() {
        let records = vec![record(1, "Same Punch", "08:15", "08:15")];
        let report = build_daily_report(date(), &records, &roster(), &EngineConfig::default());
        assert_eq!(report.missing_attendance.len(), 1);
        assert_eq!(report.missing_attendance[0].reason.as_deref(), Some("MIS"));
        assert_eq!(report.missing_attendance[0].in_time, "08:15");
    }

    #[test]
    fn record_without_punches_is_skipped_entirely() {
        let mut r = record(1, "No Punches", "08:00", "18:00");
        r.in_time = None;
        r.out_time = None;
        let report = build_daily_report(date(), &[r], &roster(), &EngineConfig::default());
        assert!(report.is_empty());
    }

    #[test]
    fn records_on_another_date_are_skipped() {
        let mut r = record(1, "Wrong Day", "09:05", "18:00");
        r.att_date = "2025-10-15".parse().unwrap();
        let report = build_daily_report(date(), &[r], &roster(), &EngineConfig::default());
        assert!(report.is_empty());
        assert_eq!(report.report_date, date());
    }

    #[test]
    fn one_record_may_land_in_three_buckets() {
        // Sunday worker without sunday duty: whole interval is overtime
        // credit even while late and early both fire against the schedule.
        let sunday: NaiveDate = "2025-10-12".parse().unwrap();
        let r = AttendanceRecord {
            employee_code: 8,
            employee_name: "Sunday Walk-in".into(),
            in_time: Some("2025-10-12T09:00:00".parse().unwrap()),
            out_time: Some("2025-10-12T14:00:00".parse().unwrap()),
            att_date: sunday,
        };
        let report = build_daily_report(sunday, &[r], &roster(), &EngineConfig::default());
        assert_eq!(report.late_arrival.len(), 1);
        assert_eq!(report.left_early.len(), 1);
        assert_eq!(report.overtimers.len(), 1);
        assert_eq!(report.overtimers[0].overtime, Some(5.0));
    }
}
