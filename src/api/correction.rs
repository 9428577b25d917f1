use actix_web::{web, HttpResponse, Responder};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::engine::transition::{apply_overtime_override, resolve_transition, TransitionOutcome};
use crate::model::attendance::{parse_punch_time, AttendanceStatus};

use crate::config::Config;

#[derive(Deserialize, ToSchema)]
pub struct StatusUpdate {
    #[schema(example = 1042)]
    pub employee_code: u64,

    #[schema(example = "2025-10-12", value_type = String, format = "date")]
    pub date: NaiveDate,

    /// Requested status code: P, A or M.
    #[schema(example = "P")]
    pub new_status: String,
}

#[derive(Deserialize, ToSchema)]
pub struct OvertimeUpdate {
    #[schema(example = 1042)]
    pub employee_code: u64,

    #[schema(example = "2025-10-12", value_type = String, format = "date")]
    pub date: NaiveDate,

    /// Signed out-time shift in hours; positive extends the day.
    #[schema(example = 1.5)]
    pub delta_hours: f64,
}

#[derive(Serialize, ToSchema)]
pub struct CorrectionResponse {
    pub employee_code: u64,
    pub employee_name: String,

    #[schema(value_type = String, format = "date-time")]
    pub in_time: NaiveDateTime,

    #[schema(value_type = String, format = "date-time")]
    pub out_time: NaiveDateTime,

    pub total_minutes: i64,
}

#[derive(sqlx::FromRow)]
struct StoredPunches {
    employee_name: String,
    in_time: Option<String>,
    out_time: Option<String>,
}

const FETCH_PUNCHES: &str = r#"
    SELECT
        e.employee_name,
        CAST(a.in_time AS CHAR) AS in_time,
        CAST(a.out_time AS CHAR) AS out_time
    FROM attendance AS a
    INNER JOIN employees AS e
        ON a.employee_id = e.employee_id
    WHERE e.employee_code = ? AND a.att_date = ?
"#;

/// A genuinely reversed stored pair; a zero out-time also sorts before the
/// in punch but means "no punch" and still infers Missing, so only Present
/// pairs count.
fn reversed_interval(in_time: NaiveDateTime, out_time: NaiveDateTime) -> bool {
    AttendanceStatus::infer(in_time, out_time) == AttendanceStatus::Present && out_time < in_time
}

async fn fetch_punches(
    pool: &MySqlPool,
    employee_code: u64,
    date: NaiveDate,
) -> actix_web::Result<Option<(String, NaiveDateTime, NaiveDateTime)>> {
    let row = sqlx::query_as::<_, StoredPunches>(FETCH_PUNCHES)
        .bind(employee_code)
        .bind(date)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_code, "Failed to fetch attendance record");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let Some(row) = row else {
        return Ok(None);
    };

    let (Some(in_raw), Some(out_raw)) = (row.in_time, row.out_time) else {
        return Err(actix_web::error::ErrorBadRequest(
            "Record has no stored punches to correct",
        ));
    };
    let in_time = parse_punch_time(&in_raw)
        .map_err(|e| actix_web::error::ErrorBadRequest(format!("Stored in-time unreadable: {e}")))?;
    let out_time = parse_punch_time(&out_raw).map_err(|e| {
        actix_web::error::ErrorBadRequest(format!("Stored out-time unreadable: {e}"))
    })?;

    Ok(Some((row.employee_name, in_time, out_time)))
}

/// Manual attendance status correction
#[utoipa::path(
    post,
    path = "/api/v1/attendance/status",
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status corrected, or no change needed", body = CorrectionResponse),
        (status = 400, description = "Unsupported transition or unusable record"),
        (status = 404, description = "No record for that employee and date"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Correction"
)]
pub async fn update_status(
    body: web::Json<StatusUpdate>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let StatusUpdate {
        employee_code,
        date,
        new_status,
    } = body.into_inner();

    // Status codes outside {A, P, M} never reach the resolver.
    let new_status = AttendanceStatus::from_str(&new_status).map_err(|_| {
        actix_web::error::ErrorBadRequest(format!(
            "Invalid status code '{new_status}', only A, P or M allowed"
        ))
    })?;

    let Some((employee_name, in_time, out_time)) =
        fetch_punches(pool.get_ref(), employee_code, date).await?
    else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": format!("No record found for employee {employee_code} on {date}")
        })));
    };

    let current = AttendanceStatus::infer(in_time, out_time);
    if reversed_interval(in_time, out_time) {
        tracing::warn!(employee_code, %employee_name, "Stored punches are reversed, refusing correction");
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Stored out-time is earlier than in-time for this record"
        })));
    }
    tracing::info!(employee_code, %employee_name, %current, requested = %new_status, "Status correction requested");

    let (new_in, new_out, total_minutes) =
        match resolve_transition(current, new_status, date, Some(in_time), &config.engine()) {
            TransitionOutcome::NoChange => {
                return Ok(HttpResponse::Ok().json(serde_json::json!({
                    "message": "No change needed, record already has that status"
                })));
            }
            TransitionOutcome::Unsupported => {
                tracing::warn!(employee_code, %current, requested = %new_status, "Unsupported transition");
                return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                    "message": format!("Unsupported transition: {current} -> {new_status}")
                })));
            }
            TransitionOutcome::Apply {
                in_time,
                out_time,
                total_minutes,
            } => (in_time, out_time, total_minutes),
        };

    sqlx::query(
        r#"
        UPDATE attendance AS a
        INNER JOIN employees AS e
            ON a.employee_id = e.employee_id
        SET a.in_time = ?, a.out_time = ?, a.tot_min = ?
        WHERE e.employee_code = ? AND a.att_date = ?
        "#,
    )
    .bind(new_in)
    .bind(new_out)
    .bind(total_minutes)
    .bind(employee_code)
    .bind(date)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_code, "Status update failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    tracing::info!(employee_code, %new_status, "Attendance status updated");
    Ok(HttpResponse::Ok().json(CorrectionResponse {
        employee_code,
        employee_name,
        in_time: new_in,
        out_time: new_out,
        total_minutes,
    }))
}

/// Overtime override on a present record
#[utoipa::path(
    post,
    path = "/api/v1/attendance/overtime",
    request_body = OvertimeUpdate,
    responses(
        (status = 200, description = "Out-time shifted and totals recomputed", body = CorrectionResponse),
        (status = 400, description = "Record is not a present day, or the shift would reverse the interval"),
        (status = 404, description = "No record for that employee and date"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Correction"
)]
pub async fn override_overtime(
    body: web::Json<OvertimeUpdate>,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let OvertimeUpdate {
        employee_code,
        date,
        delta_hours,
    } = body.into_inner();

    let Some((employee_name, in_time, out_time)) =
        fetch_punches(pool.get_ref(), employee_code, date).await?
    else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": format!("No record found for employee {employee_code} on {date}")
        })));
    };

    let current = AttendanceStatus::infer(in_time, out_time);
    let update = match apply_overtime_override(current, in_time, out_time, delta_hours) {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!(employee_code, %employee_name, %current, reason = %e, "Overtime override rejected");
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": format!("Overtime override rejected: {e}")
            })));
        }
    };

    // The explicit override supersedes automatic deviation detection, so
    // the stored late/early minutes are zeroed alongside.
    sqlx::query(
        r#"
        UPDATE attendance AS a
        INNER JOIN employees AS e
            ON a.employee_id = e.employee_id
        SET a.out_time = ?, a.ot_minute = ?, a.tot_min = ?,
            a.late_minute = 0, a.early_minute = 0
        WHERE e.employee_code = ? AND a.att_date = ?
        "#,
    )
    .bind(update.out_time)
    .bind(update.ot_minutes)
    .bind(update.total_minutes)
    .bind(employee_code)
    .bind(date)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_code, "Overtime override failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    tracing::info!(employee_code, delta_hours, "Overtime override applied");
    Ok(HttpResponse::Ok().json(CorrectionResponse {
        employee_code,
        employee_name,
        in_time,
        out_time: update.out_time,
        total_minutes: update.total_minutes,
    }))
}
