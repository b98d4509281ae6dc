use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::model::advance::AdvancePayment;

#[derive(Deserialize, ToSchema)]
pub struct AdvanceEntry {
    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = 300.0)]
    pub amount: f64,

    #[schema(example = "school fees", nullable = true)]
    pub reason: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct BulkAdvances {
    #[schema(example = "2025-05-20", value_type = String, format = "date")]
    pub payment_date: NaiveDate,

    pub entries: Vec<AdvanceEntry>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AdvanceQuery {
    #[schema(example = 1)]
    pub employee_id: Option<u64>,

    /// When true, only advances that have not been settled yet.
    #[schema(example = true)]
    pub outstanding: Option<bool>,

    #[schema(example = 1)]
    pub page: Option<u32>,

    #[schema(example = 10)]
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct AdvanceListResponse {
    pub data: Vec<AdvancePayment>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Bulk advance entry
///
/// Pure append; every entry starts outstanding and stays so until some
/// payroll record of its employee is marked paid.
#[utoipa::path(
    post,
    path = "/api/v1/advances/bulk",
    request_body = BulkAdvances,
    responses(
        (status = 200, description = "Advances recorded", body = Object, example = json!({
            "message": "Advances recorded",
            "recorded": 3
        })),
        (status = 400, description = "Non-positive amount or unknown employee"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Advances"
)]
pub async fn bulk_advances(
    pool: web::Data<MySqlPool>,
    payload: web::Json<BulkAdvances>,
) -> actix_web::Result<impl Responder> {
    for entry in &payload.entries {
        if entry.amount <= 0.0 {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Advance amount must be positive",
                "employee_id": entry.employee_id
            })));
        }
    }

    let mut tx = pool.begin().await.map_err(|e| {
        error!(error = %e, "Failed to start advances transaction");
        ErrorInternalServerError("Internal Server Error")
    })?;

    for entry in &payload.entries {
        let result = sqlx::query(
            r#"
            INSERT INTO advance_payments (employee_id, amount, payment_date, reason, is_paid)
            VALUES (?, ?, ?, ?, FALSE)
            "#,
        )
        .bind(entry.employee_id)
        .bind(entry.amount)
        .bind(payload.payment_date)
        .bind(&entry.reason)
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

            error!(error = %e, employee_id = entry.employee_id, "Failed to record advance");
            return Err(ErrorInternalServerError("Internal Server Error"));
        }
    }

    tx.commit().await.map_err(|e| {
        error!(error = %e, "Failed to commit advances");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Advances recorded",
        "recorded": payload.entries.len()
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/advances",
    params(AdvanceQuery),
    responses(
        (status = 200, description = "Paginated advance list", body = AdvanceListResponse)
    ),
    tag = "Advances"
)]
pub async fn list_advances(
    pool: web::Data<MySqlPool>,
    query: web::Query<AdvanceQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let offset = (page - 1) * per_page;

    let mut conditions = Vec::new();
    if query.employee_id.is_some() {
        conditions.push("employee_id = ?");
    }
    if let Some(true) = query.outstanding {
        conditions.push("is_paid = FALSE");
    }
    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM advance_payments {}", where_clause);
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(employee_id) = query.employee_id {
        count_query = count_query.bind(employee_id);
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to count advances");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let data_sql = format!(
        "SELECT * FROM advance_payments {} ORDER BY payment_date DESC, id DESC LIMIT ? OFFSET ?",
        where_clause
    );
    let mut data_query = sqlx::query_as::<_, AdvancePayment>(&data_sql);
    if let Some(employee_id) = query.employee_id {
        data_query = data_query.bind(employee_id);
    }
    data_query = data_query.bind(per_page as i64).bind(offset as i64);

    let advances = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch advances");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(AdvanceListResponse {
        data: advances,
        page,
        per_page,
        total,
    }))
}
