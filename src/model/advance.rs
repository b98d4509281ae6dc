use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An advance is not week-scoped: it stays outstanding (`is_paid = false`)
/// until some payroll record of its employee is marked paid, at which point
/// every outstanding advance of that employee is settled wholesale. The flag
/// flips false -> true exactly once and is never reversed.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 1,
        "amount": 300.0,
        "payment_date": "2025-05-20",
        "reason": "school fees",
        "is_paid": false,
        "paid_date": null,
        "created_at": "2025-05-20T00:00:00Z"
    })
)]
pub struct AdvancePayment {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = 300.0)]
    pub amount: f64,

    #[schema(example = "2025-05-20", value_type = String, format = "date")]
    pub payment_date: NaiveDate,

    #[schema(example = "school fees", nullable = true)]
    pub reason: Option<String>,

    #[schema(example = false)]
    pub is_paid: bool,

    #[schema(example = "2025-06-07", value_type = String, format = "date", nullable = true)]
    pub paid_date: Option<NaiveDate>,

    #[schema(example = "2025-05-20T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}
