use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::wage_policy::WagePolicy;

#[derive(Deserialize, ToSchema)]
pub struct UpsertWagePolicy {
    #[schema(example = 150.0)]
    pub overtime_daily_rate: f64,

    #[schema(example = 25.0)]
    pub overtime_hourly_rate: f64,
}

/// Set the organization-wide overtime rates
///
/// The policy is a single row; payroll runs are rejected until it exists.
#[utoipa::path(
    put,
    path = "/api/v1/wage-policy",
    request_body = UpsertWagePolicy,
    responses(
        (status = 200, description = "Policy stored", body = WagePolicy),
        (status = 400, description = "Negative rate")
    ),
    tag = "Wages"
)]
pub async fn put_wage_policy(
    pool: web::Data<MySqlPool>,
    payload: web::Json<UpsertWagePolicy>,
) -> actix_web::Result<impl Responder> {
    if payload.overtime_daily_rate < 0.0 || payload.overtime_hourly_rate < 0.0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Overtime rates cannot be negative"
        })));
    }

    sqlx::query(
        r#"
        INSERT INTO wage_policy (id, overtime_daily_rate, overtime_hourly_rate)
        VALUES (1, ?, ?)
        ON DUPLICATE KEY UPDATE
            overtime_daily_rate = VALUES(overtime_daily_rate),
            overtime_hourly_rate = VALUES(overtime_hourly_rate)
        "#,
    )
    .bind(payload.overtime_daily_rate)
    .bind(payload.overtime_hourly_rate)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to store wage policy");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let policy = sqlx::query_as::<_, WagePolicy>("SELECT * FROM wage_policy LIMIT 1")
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch stored wage policy");
            ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(policy))
}

/// Get the overtime rate policy
#[utoipa::path(
    get,
    path = "/api/v1/wage-policy",
    responses(
        (status = 200, description = "Policy found", body = WagePolicy),
        (status = 404, description = "Policy not configured", body = Object, example = json!({
            "message": "Wage policy is not configured"
        }))
    ),
    tag = "Wages"
)]
pub async fn get_wage_policy(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let policy = sqlx::query_as::<_, WagePolicy>("SELECT * FROM wage_policy LIMIT 1")
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch wage policy");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match policy {
        Some(p) => Ok(HttpResponse::Ok().json(p)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Wage policy is not configured"
        }))),
    }
}
