use chrono::{NaiveDateTime, Weekday};

use super::floor_half_hour;

/// Overtime/undertime for one worked interval, in half-hour units.
///
/// Sunday is the weekly rest day: anyone present on a Sunday without
/// sunday duty is credited the whole interval as overtime. Otherwise the
/// interval is compared against standard hours with the grace window
/// applied on both sides; inside the window there is no adjustment and
/// the result is `None`.
///
/// Callers must ensure `out_time >= in_time`; a reversed interval is an
/// input defect handled upstream.
pub fn calculate_ot_ut(
    in_time: NaiveDateTime,
    out_time: NaiveDateTime,
    day: Weekday,
    sunday_duty: bool,
    standard_hours: f64,
    grace_minutes: i64,
) -> Option<f64> {
    let total_hours = (out_time - in_time).num_seconds() as f64 / 3600.0;
    let grace = grace_minutes as f64 / 60.0;

    if day == Weekday::Sun && !sunday_duty {
        Some(floor_half_hour(total_hours))
    } else if total_hours > standard_hours + grace {
        Some(floor_half_hour(total_hours - standard_hours))
    } else if total_hours < standard_hours - grace {
        Some(-floor_half_hour(standard_hours - total_hours))
    } else {
        None
    }
}
