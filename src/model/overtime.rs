use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[derive(Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OvertimeType {
    Daily,
    Hourly,
}

/// Overtime entries are append-only: several rows per employee per week are
/// allowed and the calculator sums them per type.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 1,
        "date": "2025-06-06",
        "overtime_type": "hourly",
        "quantity": 3.0,
        "week_number": 23,
        "year": 2025,
        "notes": null,
        "created_at": "2025-06-06T00:00:00Z"
    })
)]
pub struct OvertimeRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "2025-06-06", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "hourly")]
    pub overtime_type: String,

    #[schema(example = 3.0)]
    pub quantity: f64,

    #[schema(example = 23)]
    pub week_number: u32,

    #[schema(example = 2025)]
    pub year: i32,

    #[schema(nullable = true)]
    pub notes: Option<String>,

    #[schema(example = "2025-06-06T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}
