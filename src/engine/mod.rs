pub mod classify;
pub mod overtime;
pub mod report;
pub mod roster;
pub mod transition;

/// Scheduling policy knobs shared by the classifier, aggregator, and
/// transition resolver. Passed in explicitly so tests can run several
/// policies side by side; defaults match the plant's standing rules.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Hour of day the shift is scheduled to start (24h clock).
    pub shift_start_hour: u32,
    /// Tolerance around scheduled start/end before a deviation is flagged.
    pub grace_minutes: i64,
    /// Shift length assumed when an employee has no roster entry, and the
    /// length written by status corrections.
    pub default_shift_hours: f64,
    /// Weekend-duty assumed when an employee has no roster entry.
    pub default_sunday_duty: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shift_start_hour: 8,
            grace_minutes: 20,
            default_shift_hours: 10.0,
            default_sunday_duty: false,
        }
    }
}

/// Floor to the nearest half hour, toward zero on the magnitude. The bias
/// is deliberate: a computed duration is never rounded up past its true
/// fraction.
pub fn floor_half_hour(hours: f64) -> f64 {
    (hours * 2.0).floor() / 2.0
}
