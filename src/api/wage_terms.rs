use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::wage_terms::WageTerms;

#[derive(Deserialize, ToSchema)]
pub struct UpsertWageTerms {
    #[schema(example = 2600.0, nullable = true)]
    pub base_salary: Option<f64>,

    #[schema(example = 100.0, nullable = true)]
    pub daily_wage: Option<f64>,

    #[schema(example = 15.0, nullable = true)]
    pub hourly_wage: Option<f64>,

    #[schema(nullable = true)]
    pub notes: Option<String>,
}

/// Set an employee's wage terms
///
/// One row per employee; re-submitting replaces all four fields.
#[utoipa::path(
    put,
    path = "/api/v1/employees/{employee_id}/wage-terms",
    params(
        ("employee_id", description = "Employee ID")
    ),
    request_body = UpsertWageTerms,
    responses(
        (status = 200, description = "Wage terms stored", body = WageTerms),
        (status = 400, description = "Negative wage value"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Wages"
)]
pub async fn put_wage_terms(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpsertWageTerms>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    for value in [payload.base_salary, payload.daily_wage, payload.hourly_wage] {
        if value.is_some_and(|v| v < 0.0) {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": "Wage values cannot be negative"
            })));
        }
    }

    let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to look up employee");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if exists == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    sqlx::query(
        r#"
        INSERT INTO employee_wage_terms (employee_id, base_salary, daily_wage, hourly_wage, notes)
        VALUES (?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            base_salary = VALUES(base_salary),
            daily_wage = VALUES(daily_wage),
            hourly_wage = VALUES(hourly_wage),
            notes = VALUES(notes)
        "#,
    )
    .bind(employee_id)
    .bind(payload.base_salary)
    .bind(payload.daily_wage)
    .bind(payload.hourly_wage)
    .bind(&payload.notes)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to store wage terms");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let terms = sqlx::query_as::<_, WageTerms>(
        "SELECT * FROM employee_wage_terms WHERE employee_id = ?",
    )
    .bind(employee_id)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch stored wage terms");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(terms))
}

/// Get an employee's wage terms
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/wage-terms",
    params(
        ("employee_id", description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Wage terms found", body = WageTerms),
        (status = 404, description = "No wage terms for this employee", body = Object, example = json!({
            "message": "No wage terms for this employee"
        }))
    ),
    tag = "Wages"
)]
pub async fn get_wage_terms(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let terms = sqlx::query_as::<_, WageTerms>(
        "SELECT * FROM employee_wage_terms WHERE employee_id = ?",
    )
    .bind(employee_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch wage terms");
        ErrorInternalServerError("Internal Server Error")
    })?;

    match terms {
        Some(t) => Ok(HttpResponse::Ok().json(t)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "No wage terms for this employee"
        }))),
    }
}
