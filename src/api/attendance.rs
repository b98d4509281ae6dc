use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::model::attendance::AttendanceStatus;
use crate::payroll::week::week_of;

#[derive(Deserialize, ToSchema)]
pub struct AttendanceEntry {
    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "present")]
    pub status: AttendanceStatus,

    #[schema(example = "arrived after noon", nullable = true)]
    pub notes: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct BulkAttendance {
    #[schema(example = "2025-06-02", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub entries: Vec<AttendanceEntry>,
}

/// Bulk attendance entry for one date
///
/// One row per (employee, date): re-submitting the same day overwrites that
/// day's status and notes instead of duplicating the row. The week key is
/// derived from the date once, at write time.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/bulk",
    request_body = BulkAttendance,
    responses(
        (status = 200, description = "Attendance recorded", body = Object, example = json!({
            "message": "Attendance recorded",
            "date": "2025-06-02",
            "week_number": 23,
            "year": 2025,
            "recorded": 12
        })),
        (status = 400, description = "Unknown employee in entries"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn bulk_attendance(
    pool: web::Data<MySqlPool>,
    payload: web::Json<BulkAttendance>,
) -> actix_web::Result<impl Responder> {
    let (week_number, year) = week_of(payload.date);

    let mut tx = pool.begin().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to start attendance transaction");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    for entry in &payload.entries {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance_records (employee_id, date, status, week_number, year, notes)
            VALUES (?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE status = VALUES(status), notes = VALUES(notes)
            "#,
        )
        .bind(entry.employee_id)
        .bind(payload.date)
        .bind(entry.status.as_ref())
        .bind(week_number)
        .bind(year)
        .bind(&entry.notes)
        .execute(&mut *tx)
        .await;

        if let Err(e) = result {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                        "message": "Unknown employee in entries",
                        "employee_id": entry.employee_id
                    })));
                }
            }

            tracing::error!(error = %e, employee_id = entry.employee_id, "Failed to record attendance");
            return Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ));
        }
    }

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to commit attendance");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Attendance recorded",
        "date": payload.date,
        "week_number": week_number,
        "year": year,
        "recorded": payload.entries.len()
    })))
}
