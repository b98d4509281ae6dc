use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::model::payroll::PayrollRecord;
use crate::payroll::calculator::{self, RunSummary};
use crate::payroll::error::PayrollError;
use crate::payroll::ledger;

#[derive(Deserialize, ToSchema)]
pub struct RunPayroll {
    #[schema(example = 23)]
    pub week_number: u32,

    #[schema(example = 2025)]
    pub year: i32,

    /// Restrict the run to one employee; all active employees otherwise.
    #[schema(example = 1, nullable = true)]
    pub employee_id: Option<u64>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct PayrollQuery {
    #[schema(example = 23)]
    pub week_number: Option<u32>,

    #[schema(example = 2025)]
    pub year: Option<i32>,

    #[schema(example = 1)]
    pub page: Option<u32>,

    #[schema(example = 10)]
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedPayrollResponse {
    pub data: Vec<PayrollRecord>,

    #[schema(example = 1)]
    pub page: u32,

    #[schema(example = 10)]
    pub per_page: u32,

    #[schema(example = 12)]
    pub total: i64,
}

fn payroll_error_response(err: PayrollError) -> actix_web::Result<HttpResponse> {
    match err {
        PayrollError::InvalidWeek(_) | PayrollError::InvalidYear(_) => {
            Ok(HttpResponse::BadRequest().json(json!({ "message": err.to_string() })))
        }
        PayrollError::EmployeeNotFound(_) | PayrollError::RecordNotFound(_) => {
            Ok(HttpResponse::NotFound().json(json!({ "message": err.to_string() })))
        }
        PayrollError::PolicyMissing | PayrollError::RunInProgress { .. } => {
            Ok(HttpResponse::Conflict().json(json!({ "message": err.to_string() })))
        }
        PayrollError::Db(e) => {
            error!(error = %e, "Payroll operation failed");
            Err(ErrorInternalServerError("Internal Server Error"))
        }
    }
}

/// Run the weekly payroll
///
/// Computes (or recomputes) one snapshot per employee in scope from the
/// current ledger state. Employees without wage terms, and employees whose
/// snapshot for this week is already paid, are listed under `skipped`
/// instead of aborting the batch.
#[utoipa::path(
    post,
    path = "/api/v1/payroll/run",
    request_body = RunPayroll,
    responses(
        (status = 200, description = "Run finished", body = RunSummary),
        (status = 400, description = "Invalid week or year"),
        (status = 404, description = "Employee filter does not match"),
        (status = 409, description = "Policy missing, or a run for this week is in progress"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn run_payroll(
    pool: web::Data<MySqlPool>,
    payload: web::Json<RunPayroll>,
) -> actix_web::Result<impl Responder> {
    match calculator::run(
        pool.get_ref(),
        payload.week_number,
        payload.year,
        payload.employee_id,
    )
    .await
    {
        Ok(summary) => Ok(HttpResponse::Ok().json(summary)),
        Err(err) => payroll_error_response(err),
    }
}

/// Pay a payroll record
///
/// Marks the record paid and settles the employee's entire outstanding
/// advance balance in the same transaction. Paying an already-paid record
/// is a no-op.
#[utoipa::path(
    post,
    path = "/api/v1/payroll/{record_id}/pay",
    params(
        ("record_id", description = "Payroll record ID")
    ),
    responses(
        (status = 200, description = "Record paid", body = PayrollRecord),
        (status = 404, description = "Payroll record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn pay_payroll(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let record_id = path.into_inner();

    match ledger::mark_paid(pool.get_ref(), record_id).await {
        Ok(record) => Ok(HttpResponse::Ok().json(record)),
        Err(err) => payroll_error_response(err),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll",
    params(PayrollQuery),
    responses(
        (status = 200, description = "Paginated payroll list", body = PaginatedPayrollResponse),
        (status = 400, description = "week_number and year must be given together")
    ),
    tag = "Payroll"
)]
pub async fn list_payroll(
    pool: web::Data<MySqlPool>,
    query: web::Query<PayrollQuery>,
) -> actix_web::Result<impl Responder> {
    let week_filter = match (query.week_number, query.year) {
        (Some(week), Some(year)) => Some((week, year)),
        (None, None) => None,
        _ => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": "week_number and year must be given together"
            })));
        }
    };

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let offset = (page - 1) * per_page;

    let where_clause = if week_filter.is_some() {
        "WHERE week_number = ? AND year = ?"
    } else {
        ""
    };

    let count_sql = format!("SELECT COUNT(*) FROM payroll_records {}", where_clause);
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some((week, year)) = week_filter {
        count_query = count_query.bind(week).bind(year);
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to count payroll records");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let data_sql = format!(
        "SELECT * FROM payroll_records {} ORDER BY year DESC, week_number DESC, employee_id LIMIT ? OFFSET ?",
        where_clause
    );
    let mut data_query = sqlx::query_as::<_, PayrollRecord>(&data_sql);
    if let Some((week, year)) = week_filter {
        data_query = data_query.bind(week).bind(year);
    }
    data_query = data_query.bind(per_page as i64).bind(offset as i64);

    let records = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch payroll records");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(PaginatedPayrollResponse {
        data: records,
        page,
        per_page,
        total,
    }))
}

/// Get a payroll record by ID
#[utoipa::path(
    get,
    path = "/api/v1/payroll/{record_id}",
    params(
        ("record_id", description = "Payroll record ID")
    ),
    responses(
        (status = 200, description = "Payroll record found", body = PayrollRecord),
        (status = 404, description = "Payroll record not found", body = Object, example = json!({
            "message": "Payroll record not found"
        }))
    ),
    tag = "Payroll"
)]
pub async fn get_payroll(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let record_id = path.into_inner();

    let record = sqlx::query_as::<_, PayrollRecord>("SELECT * FROM payroll_records WHERE id = ?")
        .bind(record_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, record_id, "Failed to fetch payroll record");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match record {
        Some(r) => Ok(HttpResponse::Ok().json(r)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Payroll record not found"
        }))),
    }
}
