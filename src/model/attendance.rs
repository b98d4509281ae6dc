use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[derive(Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    HalfDay,
}

/// One attendance row per employee per date. `week_number`/`year` are
/// derived from `date` at write time and trusted verbatim by the payroll
/// calculator; they are never re-derived at read time.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 1,
        "date": "2025-06-02",
        "status": "present",
        "week_number": 23,
        "year": 2025,
        "notes": null,
        "created_at": "2025-06-02T00:00:00Z"
    })
)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "2025-06-02", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "present")]
    pub status: String,

    #[schema(example = 23)]
    pub week_number: u32,

    #[schema(example = 2025)]
    pub year: i32,

    #[schema(nullable = true)]
    pub notes: Option<String>,

    #[schema(example = "2025-06-02T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}
