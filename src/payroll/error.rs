use thiserror::Error;

/// Failure modes of the payroll engine. Validation and configuration
/// variants reject a request before the ledger is touched; `Db` wraps
/// anything that went wrong underneath.
#[derive(Debug, Error)]
pub enum PayrollError {
    #[error("week number {0} is outside the ISO range 1..=53")]
    InvalidWeek(u32),

    #[error("year {0} is not a four-digit year")]
    InvalidYear(i32),

    #[error("employee {0} not found")]
    EmployeeNotFound(u64),

    #[error("wage rate policy is not configured")]
    PolicyMissing,

    #[error("a payroll run for week {week_number}/{year} is already in progress")]
    RunInProgress { week_number: u32, year: i32 },

    #[error("payroll record {0} not found")]
    RecordNotFound(u64),

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}
