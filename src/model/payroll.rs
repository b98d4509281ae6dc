use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Length of the work week recorded on every snapshot.
pub const WORK_WEEK_DAYS: i32 = 6;

/// One payroll snapshot per (employee, week, year). The row is a derived
/// aggregate over the time ledger: recomputing the same key overwrites every
/// derived field in place until the record is marked paid, after which it is
/// frozen.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 1,
        "week_number": 23,
        "year": 2025,
        "total_days": 6,
        "present_days": 5,
        "absent_days": 1,
        "half_days": 0,
        "overtime_days": 1.0,
        "overtime_hours": 0.0,
        "basic_salary": 500.0,
        "overtime_amount": 150.0,
        "deductions": 100.0,
        "advances_deduction": 0.0,
        "net_salary": 550.0,
        "paid": false,
        "paid_date": null,
        "created_at": "2025-06-07T00:00:00Z"
    })
)]
pub struct PayrollRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = 23)]
    pub week_number: u32,

    #[schema(example = 2025)]
    pub year: i32,

    #[schema(example = 6)]
    pub total_days: i32,

    #[schema(example = 5)]
    pub present_days: i32,

    #[schema(example = 1)]
    pub absent_days: i32,

    #[schema(example = 0)]
    pub half_days: i32,

    #[schema(example = 1.0)]
    pub overtime_days: f64,

    #[schema(example = 0.0)]
    pub overtime_hours: f64,

    #[schema(example = 500.0)]
    pub basic_salary: f64,

    #[schema(example = 150.0)]
    pub overtime_amount: f64,

    #[schema(example = 100.0)]
    pub deductions: f64,

    #[schema(example = 0.0)]
    pub advances_deduction: f64,

    #[schema(example = 550.0)]
    pub net_salary: f64,

    #[schema(example = false)]
    pub paid: bool,

    #[schema(example = "2025-06-07", value_type = String, format = "date", nullable = true)]
    pub paid_date: Option<NaiveDate>,

    #[schema(example = "2025-06-07T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}
