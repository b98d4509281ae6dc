use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Divisor turning a monthly base salary into a daily rate.
pub const WORKING_DAYS_PER_MONTH: f64 = 26.0;

/// Per-employee wage terms. One row per employee; the row may not exist at
/// all, in which case payroll cannot be computed for that employee.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 1,
        "base_salary": 2600.0,
        "daily_wage": null,
        "hourly_wage": null,
        "notes": null,
        "created_at": "2025-01-01T00:00:00Z"
    })
)]
pub struct WageTerms {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = 2600.0, nullable = true)]
    pub base_salary: Option<f64>,

    #[schema(example = 100.0, nullable = true)]
    pub daily_wage: Option<f64>,

    #[schema(example = 15.0, nullable = true)]
    pub hourly_wage: Option<f64>,

    #[schema(nullable = true)]
    pub notes: Option<String>,

    #[schema(example = "2025-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}

impl WageTerms {
    /// Wage basis used for both earnings and the absence deduction.
    ///
    /// A positive daily wage takes precedence over the monthly base salary;
    /// the base salary is spread over a fixed 26-day working month. Zero and
    /// missing values are both treated as "not set", so an employee whose
    /// row carries neither yields a zero rate.
    pub fn daily_rate(&self) -> f64 {
        match (self.daily_wage, self.base_salary) {
            (Some(wage), _) if wage > 0.0 => wage,
            (_, Some(base)) if base > 0.0 => base / WORKING_DAYS_PER_MONTH,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(daily_wage: Option<f64>, base_salary: Option<f64>) -> WageTerms {
        WageTerms {
            id: 1,
            employee_id: 1,
            base_salary,
            daily_wage,
            hourly_wage: None,
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn daily_wage_takes_precedence_over_base_salary() {
        assert_eq!(terms(Some(120.0), Some(2600.0)).daily_rate(), 120.0);
    }

    #[test]
    fn base_salary_is_spread_over_26_days() {
        assert_eq!(terms(None, Some(2600.0)).daily_rate(), 100.0);
    }

    #[test]
    fn zero_daily_wage_falls_back_to_base_salary() {
        assert_eq!(terms(Some(0.0), Some(2600.0)).daily_rate(), 100.0);
    }

    #[test]
    fn no_wage_basis_yields_zero_rate() {
        assert_eq!(terms(None, None).daily_rate(), 0.0);
        assert_eq!(terms(Some(0.0), Some(0.0)).daily_rate(), 0.0);
    }
}
