use crate::api::correction::{CorrectionResponse, OvertimeUpdate, StatusUpdate};
use crate::model::attendance::AttendanceStatus;
use crate::model::report::{ClassificationReport, DeviationEntry};
use crate::model::shift::ShiftProfile;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Report API",
        version = "1.0.0",
        description = r#"
## Attendance Classification & Reconciliation Service

Classifies raw clock-in/clock-out punches into attendance outcomes and
serves the daily deviation report.

### 🔹 Key Features
- **Daily Report**
  - Late arrivals, early departures, overtimers, and missing punches for one date
- **Status Correction**
  - Operator A/P/M corrections with derived punch times kept consistent
- **Overtime Override**
  - Shift a present day's out-time and recompute totals

### 📦 Response Format
- JSON-based RESTful responses
- Report buckets carry the exact column names the spreadsheet writer expects

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::report::daily_report,

        crate::api::correction::update_status,
        crate::api::correction::override_overtime
    ),
    components(
        schemas(
            ClassificationReport,
            DeviationEntry,
            AttendanceStatus,
            ShiftProfile,
            StatusUpdate,
            OvertimeUpdate,
            CorrectionResponse
        )
    ),
    tags(
        (name = "Report", description = "Daily classification report APIs"),
        (name = "Correction", description = "Manual record correction APIs"),
    )
)]
pub struct ApiDoc;
