use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::model::overtime::OvertimeType;
use crate::payroll::week::week_of;

#[derive(Deserialize, ToSchema)]
pub struct OvertimeEntry {
    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "hourly")]
    pub overtime_type: OvertimeType,

    #[schema(example = 3.0)]
    pub quantity: f64,

    #[schema(nullable = true)]
    pub notes: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct BulkOvertime {
    #[schema(example = "2025-06-06", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub entries: Vec<OvertimeEntry>,
}

/// Bulk overtime entry for one date
///
/// Pure append: several entries per employee per week are allowed and the
/// payroll run sums them per type.
#[utoipa::path(
    post,
    path = "/api/v1/overtime/bulk",
    request_body = BulkOvertime,
    responses(
        (status = 200, description = "Overtime recorded", body = Object, example = json!({
            "message": "Overtime recorded",
            "date": "2025-06-06",
            "week_number": 23,
            "year": 2025,
            "recorded": 4
        })),
        (status = 400, description = "Non-positive quantity or unknown employee"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Overtime"
)]
pub async fn bulk_overtime(
    pool: web::Data<MySqlPool>,
    payload: web::Json<BulkOvertime>,
) -> actix_web::Result<impl Responder> {
    // Validate the whole batch before writing anything.
    for entry in &payload.entries {
        if entry.quantity <= 0.0 {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Overtime quantity must be positive",
                "employee_id": entry.employee_id
            })));
        }
    }

    let (week_number, year) = week_of(payload.date);

    let mut tx = pool.begin().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to start overtime transaction");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    for entry in &payload.entries {
        let result = sqlx::query(
            r#"
            INSERT INTO overtime_records
            (employee_id, date, overtime_type, quantity, week_number, year, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.employee_id)
        .bind(payload.date)
        .bind(entry.overtime_type.as_ref())
        .bind(entry.quantity)
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

            tracing::error!(error = %e, employee_id = entry.employee_id, "Failed to record overtime");
            return Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ));
        }
    }

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to commit overtime");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Overtime recorded",
        "date": payload.date,
        "week_number": week_number,
        "year": year,
        "recorded": payload.entries.len()
    })))
}
