use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of a report bucket. Field names mirror the column headers the
/// downstream spreadsheet renderer expects, so the JSON can be written out
/// section by section without remapping.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeviationEntry {
    /// 1-based position within its own bucket.
    #[serde(rename = "Sr No.")]
    pub sr_no: u32,

    #[serde(rename = "Code")]
    pub code: u64,

    #[serde(rename = "Employee")]
    pub employee: String,

    #[serde(rename = "Shift Hours")]
    pub shift_hours: f64,

    #[serde(rename = "In time")]
    pub in_time: String,

    #[serde(rename = "Out time")]
    pub out_time: String,

    /// Worked hours floored to the nearest half hour.
    #[serde(rename = "Working Hour")]
    pub working_hour: f64,

    /// Exactly one of the four measures below is set, matching the bucket
    /// the entry belongs to.
    #[serde(rename = "Reason", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Minutes past scheduled shift start.
    #[serde(rename = "Late By", skip_serializing_if = "Option::is_none")]
    pub late_by: Option<i64>,

    /// Minutes short of scheduled shift end.
    #[serde(rename = "Left Early", skip_serializing_if = "Option::is_none")]
    pub left_early: Option<i64>,

    /// Overtime credit in half-hour steps.
    #[serde(rename = "Overtime", skip_serializing_if = "Option::is_none")]
    pub overtime: Option<f64>,
}

/// Aggregate of the four report sections for one reporting date. Built
/// fresh per run; the persistence layer renders each list as one labeled
/// spreadsheet section.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassificationReport {
    #[schema(value_type = String, format = "date")]
    pub report_date: NaiveDate,
    pub late_arrival: Vec<DeviationEntry>,
    pub left_early: Vec<DeviationEntry>,
    pub overtimers: Vec<DeviationEntry>,
    pub missing_attendance: Vec<DeviationEntry>,
}

impl ClassificationReport {
    pub fn new(report_date: NaiveDate) -> Self {
        Self {
            report_date,
            late_arrival: Vec::new(),
            left_early: Vec::new(),
            overtimers: Vec::new(),
            missing_attendance: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.late_arrival.is_empty()
            && self.left_early.is_empty()
            && self.overtimers.is_empty()
            && self.missing_attendance.is_empty()
    }
}
