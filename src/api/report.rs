use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::IntoParams;

use crate::config::Config;
use crate::engine::report::build_daily_report;
use crate::engine::roster::ShiftRoster;
use crate::model::attendance::{AttendanceRecord, RawPunchRow};
use crate::model::report::ClassificationReport;

#[derive(Deserialize, IntoParams)]
pub struct DailyReportQuery {
    /// Reporting date, `YYYY-MM-DD`.
    #[param(value_type = String, format = "date", example = "2025-10-14")]
    pub date: NaiveDate,
}

const PUNCH_QUERY: &str = r#"
    SELECT
        e.employee_code,
        e.employee_name,
        CAST(a.in_time AS CHAR) AS in_time,
        CAST(a.out_time AS CHAR) AS out_time,
        a.att_date
    FROM attendance AS a
    INNER JOIN employees AS e
        ON a.employee_id = e.employee_id
    WHERE a.att_date = ?
    ORDER BY a.id
"#;

/// Daily classification report
#[utoipa::path(
    get,
    path = "/api/v1/report/daily",
    params(DailyReportQuery),
    responses(
        (status = 200, description = "Report with the four deviation buckets", body = ClassificationReport),
        (status = 404, description = "No punch data for the requested date", body = Object, example = json!({
            "message": "No attendance data found for 2025-10-14"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Report"
)]
pub async fn daily_report(
    query: web::Query<DailyReportQuery>,
    pool: web::Data<MySqlPool>,
    roster: web::Data<ShiftRoster>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let date = query.date;

    tracing::info!(%date, "Executing attendance query");
    let rows = sqlx::query_as::<_, RawPunchRow>(PUNCH_QUERY)
        .bind(date)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %date, "Failed to fetch attendance data");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if rows.is_empty() {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": format!("No attendance data found for {date}")
        })));
    }

    // Unparsable rows are skipped, never fatal to the batch.
    let records: Vec<AttendanceRecord> = rows
        .into_iter()
        .filter_map(|row| {
            let code = row.employee_code;
            row.into_record()
                .map_err(|e| {
                    tracing::error!(employee_code = code, error = %e, "Time format error, record skipped")
                })
                .ok()
        })
        .collect();

    let report = build_daily_report(date, &records, roster.get_ref(), &config.engine());
    Ok(HttpResponse::Ok().json(report))
}
