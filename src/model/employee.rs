use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_code": "EMP-2025-0001",
        "full_name": "Ahmad Saleh",
        "phone": "+9647712345678",
        "hire_date": "2024-03-01",
        "status": "active",
        "created_at": "2025-01-01T00:00:00Z"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "EMP-2025-0001")]
    pub employee_code: String,

    #[schema(example = "Ahmad Saleh")]
    pub full_name: String,

    #[schema(example = "+9647712345678", nullable = true)]
    pub phone: Option<String>,

    #[schema(
        example = "2024-03-01",
        value_type = String,
        format = "date"
    )]
    pub hire_date: Option<NaiveDate>,

    #[schema(example = "active")]
    pub status: String,

    #[schema(example = "2025-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}

pub const STATUS_ACTIVE: &str = "active";
