use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Organization-wide overtime rates. Stored as a single row and loaded once
/// per payroll run; a run is rejected outright when the row is missing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "overtime_daily_rate": 150.0,
        "overtime_hourly_rate": 25.0,
        "updated_at": "2025-01-01T00:00:00Z"
    })
)]
pub struct WagePolicy {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 150.0)]
    pub overtime_daily_rate: f64,

    #[schema(example = 25.0)]
    pub overtime_hourly_rate: f64,

    #[schema(example = "2025-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub updated_at: Option<DateTime<Utc>>,
}
