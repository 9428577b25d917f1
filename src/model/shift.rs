use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-employee scheduling policy, one entry per employee code in the
/// shift roster JSON file.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShiftProfile {
    #[schema(example = 1042)]
    pub employee_code: u64,

    /// Expected shift length in hours, may be fractional.
    #[schema(example = 10.0)]
    pub working_hours: f64,

    /// True when the employee is scheduled to work the weekly rest day.
    #[schema(example = false)]
    pub sunday_duty: bool,
}
