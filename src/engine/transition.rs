use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::model::attendance::AttendanceStatus;

use super::EngineConfig;

use AttendanceStatus::{Absent, Missing, Present};

/// Concrete punch triple implementing an operator-requested status change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionOutcome {
    Apply {
        in_time: NaiveDateTime,
        out_time: NaiveDateTime,
        total_minutes: i64,
    },
    /// Requested status equals the current one; explicitly not an error.
    NoChange,
    /// Pair is outside the correction table.
    Unsupported,
}

/// Resolves an operator correction against the fixed transition table.
///
/// The table encodes only administratively meaningful corrections: marking
/// an absentee present (full standard shift), voiding a day to absent, and
/// completing a missing punch from its recorded in-time. Everything else
/// is `Unsupported`.
pub fn resolve_transition(
    current: AttendanceStatus,
    requested: AttendanceStatus,
    att_date: NaiveDate,
    in_time: Option<NaiveDateTime>,
    cfg: &EngineConfig,
) -> TransitionOutcome {
    if current == requested {
        return TransitionOutcome::NoChange;
    }

    let shift_len = Duration::seconds((cfg.default_shift_hours * 3600.0) as i64);
    let shift_in = att_date
        .and_hms_opt(cfg.shift_start_hour, 0, 0)
        .unwrap_or_else(|| att_date.and_hms_opt(0, 0, 0).unwrap());
    let shift_out = shift_in + shift_len;
    let zero_time = att_date.and_hms_opt(0, 0, 0).unwrap();
    let total = (cfg.default_shift_hours * 60.0) as i64;

    match (current, requested) {
        (Absent, Present) => TransitionOutcome::Apply {
            in_time: shift_in,
            out_time: shift_out,
            total_minutes: total,
        },
        (Missing, Present) => match in_time {
            Some(t) => TransitionOutcome::Apply {
                in_time: t,
                out_time: t + shift_len,
                total_minutes: total,
            },
            None => TransitionOutcome::Apply {
                in_time: shift_in,
                out_time: shift_out,
                total_minutes: total,
            },
        },
        (Present, Absent) | (Missing, Absent) => TransitionOutcome::Apply {
            in_time: zero_time,
            out_time: zero_time,
            total_minutes: 0,
        },
        _ => TransitionOutcome::Unsupported,
    }
}

/// Result of an explicit overtime override on a Present record. The stored
/// late/early deviation minutes are zeroed by the caller when persisting:
/// an explicit override supersedes automatic deviation detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OvertimeOverride {
    pub out_time: NaiveDateTime,
    pub total_minutes: i64,
    /// Stored overtime, clamped non-negative.
    pub ot_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum OverrideError {
    #[display(fmt = "record is not a present day")]
    NotPresent,
    #[display(fmt = "override would move out-time before in-time")]
    ReversedInterval,
}

/// Shifts a Present record's out-time by a signed hour delta and
/// recomputes the totals from the new interval.
pub fn apply_overtime_override(
    status: AttendanceStatus,
    in_time: NaiveDateTime,
    out_time: NaiveDateTime,
    delta_hours: f64,
) -> Result<OvertimeOverride, OverrideError> {
    if status != Present {
        return Err(OverrideError::NotPresent);
    }

    let new_out = out_time + Duration::seconds((delta_hours * 3600.0) as i64);
    if new_out < in_time {
        return Err(OverrideError::ReversedInterval);
    }

    Ok(OvertimeOverride {
        out_time: new_out,
        total_minutes: (new_out - in_time).num_minutes(),
        ot_minutes: ((delta_hours * 60.0) as i64).max(0),
    })
}
