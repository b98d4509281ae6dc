//! Weekly payroll computation.
//!
//! `run` turns the time ledger of a (week, year) into one payroll snapshot
//! per employee in scope: gather the week's attendance and overtime plus the
//! employee's outstanding advances, price them against the wage terms and
//! the overtime policy, and upsert the result into the payroll ledger. The
//! arithmetic lives in [`compute_pay`] and [`WeekTotals`], which are pure so
//! the business rules can be tested without a database.

use serde::Serialize;
use sqlx::{Connection, MySqlConnection, MySqlPool};
use strum_macros::Display;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::model::advance::AdvancePayment;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::{Employee, STATUS_ACTIVE};
use crate::model::overtime::{OvertimeRecord, OvertimeType};
use crate::model::payroll::PayrollRecord;
use crate::model::wage_policy::WagePolicy;
use crate::model::wage_terms::WageTerms;
use crate::payroll::error::PayrollError;
use crate::payroll::ledger::{self, PayrollDraft};
use crate::payroll::week::WeekKey;

/// Attendance and overtime counts for one employee's week.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WeekTotals {
    pub present_days: i32,
    pub absent_days: i32,
    pub half_days: i32,
    pub overtime_days: f64,
    pub overtime_hours: f64,
}

impl WeekTotals {
    pub fn collect(attendance: &[AttendanceRecord], overtime: &[OvertimeRecord]) -> Self {
        let mut totals = Self::default();
        for record in attendance {
            match record.status.parse::<AttendanceStatus>() {
                Ok(AttendanceStatus::Present) => totals.present_days += 1,
                Ok(AttendanceStatus::Absent) => totals.absent_days += 1,
                Ok(AttendanceStatus::HalfDay) => totals.half_days += 1,
                Err(_) => {}
            }
        }
        for record in overtime {
            match record.overtime_type.parse::<OvertimeType>() {
                Ok(OvertimeType::Daily) => totals.overtime_days += record.quantity,
                Ok(OvertimeType::Hourly) => totals.overtime_hours += record.quantity,
                Err(_) => {}
            }
        }
        totals
    }
}

/// The priced side of a payroll snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayLines {
    pub basic_salary: f64,
    pub overtime_amount: f64,
    pub deductions: f64,
    pub advances_deduction: f64,
    pub net_salary: f64,
}

/// Price one employee's week.
///
/// Present days earn the full daily rate, half days half of it, absent days
/// deduct it. Overtime is priced by the organization-wide policy rates, and
/// the employee's whole outstanding advance balance is deducted in one go.
/// Net is not floored: advances can push it below zero.
pub fn compute_pay(
    terms: &WageTerms,
    policy: &WagePolicy,
    totals: &WeekTotals,
    outstanding_advances: f64,
) -> PayLines {
    let daily_rate = terms.daily_rate();
    let basic_salary =
        totals.present_days as f64 * daily_rate + totals.half_days as f64 * (daily_rate / 2.0);
    let overtime_amount = totals.overtime_days * policy.overtime_daily_rate
        + totals.overtime_hours * policy.overtime_hourly_rate;
    let deductions = totals.absent_days as f64 * daily_rate;
    let net_salary = basic_salary + overtime_amount - deductions - outstanding_advances;

    PayLines {
        basic_salary,
        overtime_amount,
        deductions,
        advances_deduction: outstanding_advances,
        net_salary,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingWageTerms,
    AlreadyPaid,
}

/// An employee the run could not compute, surfaced to the operator instead
/// of aborting the batch.
#[derive(Debug, Serialize, ToSchema)]
pub struct SkippedEmployee {
    #[schema(example = 7)]
    pub employee_id: u64,

    #[schema(example = "Ahmad Saleh")]
    pub full_name: String,

    #[schema(example = "missing_wage_terms")]
    pub reason: SkipReason,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RunSummary {
    pub records: Vec<PayrollRecord>,
    pub skipped: Vec<SkippedEmployee>,
}

/// Compute (or recompute) the payroll snapshots for one week.
///
/// Scope is every active employee, or a single employee when a filter is
/// given. The whole batch runs in one transaction on one connection, guarded
/// by a per-(week, year) advisory lock so two concurrent runs for the same
/// key cannot interleave their upserts.
pub async fn run(
    pool: &MySqlPool,
    week_number: u32,
    year: i32,
    employee_filter: Option<u64>,
) -> Result<RunSummary, PayrollError> {
    let week = WeekKey::new(week_number, year)?;

    let mut conn = pool.acquire().await?;

    let policy = load_policy(&mut conn)
        .await?
        .ok_or(PayrollError::PolicyMissing)?;

    let lock_name = format!("wagebook:payroll:{}:{}", week.year, week.week_number);
    let acquired: Option<i64> = sqlx::query_scalar("SELECT GET_LOCK(?, 0)")
        .bind(&lock_name)
        .fetch_one(&mut *conn)
        .await?;
    if acquired != Some(1) {
        return Err(PayrollError::RunInProgress {
            week_number: week.week_number,
            year: week.year,
        });
    }

    let outcome = run_locked(&mut conn, week, employee_filter, &policy).await;

    // The lock dies with the connection anyway, so a failed release only
    // costs us the connection.
    if let Err(e) = sqlx::query("SELECT RELEASE_LOCK(?)")
        .bind(&lock_name)
        .execute(&mut *conn)
        .await
    {
        warn!(error = %e, lock = %lock_name, "Failed to release payroll run lock");
    }

    outcome
}

async fn run_locked(
    conn: &mut MySqlConnection,
    week: WeekKey,
    employee_filter: Option<u64>,
    policy: &WagePolicy,
) -> Result<RunSummary, PayrollError> {
    let employees = match employee_filter {
        Some(id) => {
            let employee = employee_by_id(&mut *conn, id)
                .await?
                .ok_or(PayrollError::EmployeeNotFound(id))?;
            vec![employee]
        }
        None => active_employees(&mut *conn).await?,
    };

    let mut tx = conn.begin().await?;
    let mut records = Vec::with_capacity(employees.len());
    let mut skipped = Vec::new();

    for employee in &employees {
        let Some(terms) = wage_terms_for(&mut tx, employee.id).await? else {
            warn!(
                employee_id = employee.id,
                full_name = %employee.full_name,
                "Skipping employee without wage terms"
            );
            skipped.push(SkippedEmployee {
                employee_id: employee.id,
                full_name: employee.full_name.clone(),
                reason: SkipReason::MissingWageTerms,
            });
            continue;
        };

        let existing = ledger::find_by_key(&mut tx, employee.id, week).await?;
        if let Some(existing) = &existing {
            // A paid snapshot is frozen; recomputing it would silently
            // rewrite an audited payout.
            if existing.paid {
                warn!(
                    employee_id = employee.id,
                    record_id = existing.id,
                    "Skipping recompute of a paid payroll record"
                );
                skipped.push(SkippedEmployee {
                    employee_id: employee.id,
                    full_name: employee.full_name.clone(),
                    reason: SkipReason::AlreadyPaid,
                });
                continue;
            }
        }

        let attendance = week_attendance(&mut tx, employee.id, week).await?;
        let overtime = week_overtime(&mut tx, employee.id, week).await?;
        let advances = outstanding_advances(&mut tx, employee.id).await?;

        let totals = WeekTotals::collect(&attendance, &overtime);
        let outstanding: f64 = advances.iter().map(|a| a.amount).sum();
        let lines = compute_pay(&terms, policy, &totals, outstanding);

        let draft = PayrollDraft {
            employee_id: employee.id,
            week,
            totals,
            lines,
        };
        let record = ledger::upsert(&mut tx, existing.as_ref().map(|r| r.id), &draft).await?;
        records.push(record);
    }

    tx.commit().await?;

    info!(
        week_number = week.week_number,
        year = week.year,
        computed = records.len(),
        skipped = skipped.len(),
        "Payroll run finished"
    );

    Ok(RunSummary { records, skipped })
}

async fn load_policy(conn: &mut MySqlConnection) -> sqlx::Result<Option<WagePolicy>> {
    sqlx::query_as::<_, WagePolicy>("SELECT * FROM wage_policy LIMIT 1")
        .fetch_optional(conn)
        .await
}

async fn active_employees(conn: &mut MySqlConnection) -> sqlx::Result<Vec<Employee>> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE status = ? ORDER BY id")
        .bind(STATUS_ACTIVE)
        .fetch_all(conn)
        .await
}

async fn employee_by_id(conn: &mut MySqlConnection, id: u64) -> sqlx::Result<Option<Employee>> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await
}

async fn wage_terms_for(
    conn: &mut MySqlConnection,
    employee_id: u64,
) -> sqlx::Result<Option<WageTerms>> {
    sqlx::query_as::<_, WageTerms>("SELECT * FROM employee_wage_terms WHERE employee_id = ?")
        .bind(employee_id)
        .fetch_optional(conn)
        .await
}

async fn week_attendance(
    conn: &mut MySqlConnection,
    employee_id: u64,
    week: WeekKey,
) -> sqlx::Result<Vec<AttendanceRecord>> {
    sqlx::query_as::<_, AttendanceRecord>(
        "SELECT * FROM attendance_records WHERE employee_id = ? AND week_number = ? AND year = ?",
    )
    .bind(employee_id)
    .bind(week.week_number)
    .bind(week.year)
    .fetch_all(conn)
    .await
}

async fn week_overtime(
    conn: &mut MySqlConnection,
    employee_id: u64,
    week: WeekKey,
) -> sqlx::Result<Vec<OvertimeRecord>> {
    sqlx::query_as::<_, OvertimeRecord>(
        "SELECT * FROM overtime_records WHERE employee_id = ? AND week_number = ? AND year = ?",
    )
    .bind(employee_id)
    .bind(week.week_number)
    .bind(week.year)
    .fetch_all(conn)
    .await
}

/// Every unsettled advance of the employee, regardless of week. The full
/// outstanding balance is deducted from whichever run happens next.
async fn outstanding_advances(
    conn: &mut MySqlConnection,
    employee_id: u64,
) -> sqlx::Result<Vec<AdvancePayment>> {
    sqlx::query_as::<_, AdvancePayment>(
        "SELECT * FROM advance_payments WHERE employee_id = ? AND is_paid = FALSE",
    )
    .bind(employee_id)
    .fetch_all(conn)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

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

    fn policy(daily: f64, hourly: f64) -> WagePolicy {
        WagePolicy {
            id: 1,
            overtime_daily_rate: daily,
            overtime_hourly_rate: hourly,
            updated_at: None,
        }
    }

    fn attendance(id: u64, status: &str) -> AttendanceRecord {
        AttendanceRecord {
            id,
            employee_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            status: status.to_string(),
            week_number: 23,
            year: 2025,
            notes: None,
            created_at: None,
        }
    }

    fn overtime(id: u64, overtime_type: &str, quantity: f64) -> OvertimeRecord {
        OvertimeRecord {
            id,
            employee_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 6, 6).unwrap(),
            overtime_type: overtime_type.to_string(),
            quantity,
            week_number: 23,
            year: 2025,
            notes: None,
            created_at: None,
        }
    }

    fn week(present: i32, absent: i32, half: i32) -> WeekTotals {
        WeekTotals {
            present_days: present,
            absent_days: absent,
            half_days: half,
            overtime_days: 0.0,
            overtime_hours: 0.0,
        }
    }

    #[test]
    fn collect_counts_attendance_by_status() {
        let rows = vec![
            attendance(1, "present"),
            attendance(2, "present"),
            attendance(3, "absent"),
            attendance(4, "half_day"),
        ];
        let totals = WeekTotals::collect(&rows, &[]);
        assert_eq!(totals.present_days, 2);
        assert_eq!(totals.absent_days, 1);
        assert_eq!(totals.half_days, 1);
    }

    #[test]
    fn collect_ignores_unknown_status_strings() {
        let rows = vec![attendance(1, "present"), attendance(2, "vacation")];
        let totals = WeekTotals::collect(&rows, &[]);
        assert_eq!(totals.present_days, 1);
        assert_eq!(totals.absent_days, 0);
        assert_eq!(totals.half_days, 0);
    }

    #[test]
    fn collect_sums_overtime_per_type() {
        let rows = vec![
            overtime(1, "daily", 1.0),
            overtime(2, "daily", 0.5),
            overtime(3, "hourly", 3.0),
            overtime(4, "hourly", 2.0),
        ];
        let totals = WeekTotals::collect(&[], &rows);
        assert_eq!(totals.overtime_days, 1.5);
        assert_eq!(totals.overtime_hours, 5.0);
    }

    #[test]
    fn daily_wage_week_with_overtime_and_one_absence() {
        // 5 present + 1 half day at 100/day, 1 absent, 1 extra day at 150.
        let mut totals = week(5, 1, 1);
        totals.overtime_days = 1.0;

        let lines = compute_pay(&terms(Some(100.0), None), &policy(150.0, 25.0), &totals, 0.0);
        assert_eq!(lines.basic_salary, 550.0);
        assert_eq!(lines.overtime_amount, 150.0);
        assert_eq!(lines.deductions, 100.0);
        assert_eq!(lines.advances_deduction, 0.0);
        assert_eq!(lines.net_salary, 600.0);
    }

    #[test]
    fn base_salary_is_priced_through_the_derived_daily_rate() {
        let lines = compute_pay(
            &terms(None, Some(2600.0)),
            &policy(150.0, 25.0),
            &week(20, 0, 0),
            0.0,
        );
        assert_eq!(lines.basic_salary, 2000.0);
        assert_eq!(lines.net_salary, 2000.0);
    }

    #[test]
    fn absence_deduction_uses_the_same_derived_rate_as_earnings() {
        let lines = compute_pay(
            &terms(None, Some(2600.0)),
            &policy(150.0, 25.0),
            &week(4, 2, 0),
            0.0,
        );
        assert_eq!(lines.basic_salary, 400.0);
        assert_eq!(lines.deductions, 200.0);
        assert_eq!(lines.net_salary, 200.0);
    }

    #[test]
    fn outstanding_advances_are_deducted_in_full() {
        let lines = compute_pay(
            &terms(None, Some(2600.0)),
            &policy(150.0, 25.0),
            &week(26, 0, 0),
            300.0,
        );
        assert_eq!(lines.basic_salary, 2600.0);
        assert_eq!(lines.advances_deduction, 300.0);
        assert_eq!(lines.net_salary, 2300.0);
    }

    #[test]
    fn net_salary_is_not_floored_at_zero() {
        let lines = compute_pay(
            &terms(Some(100.0), None),
            &policy(150.0, 25.0),
            &week(1, 0, 0),
            500.0,
        );
        assert_eq!(lines.net_salary, -400.0);
    }

    #[test]
    fn hourly_overtime_is_priced_by_the_policy_rate() {
        let mut totals = week(0, 0, 0);
        totals.overtime_hours = 4.0;

        let lines = compute_pay(&terms(Some(100.0), None), &policy(150.0, 25.0), &totals, 0.0);
        assert_eq!(lines.overtime_amount, 100.0);
        assert_eq!(lines.net_salary, 100.0);
    }

    #[test]
    fn missing_wage_basis_still_produces_zeroed_lines() {
        let mut totals = week(5, 2, 1);
        totals.overtime_hours = 2.0;

        let lines = compute_pay(&terms(None, None), &policy(150.0, 25.0), &totals, 0.0);
        assert_eq!(lines.basic_salary, 0.0);
        assert_eq!(lines.deductions, 0.0);
        // Overtime is policy-priced, so it survives a missing wage basis.
        assert_eq!(lines.overtime_amount, 50.0);
        assert_eq!(lines.net_salary, 50.0);
    }

    #[test]
    fn identical_inputs_price_identically() {
        let totals = week(5, 1, 1);
        let first = compute_pay(&terms(Some(100.0), None), &policy(150.0, 25.0), &totals, 50.0);
        let second = compute_pay(&terms(Some(100.0), None), &policy(150.0, 25.0), &totals, 50.0);
        assert_eq!(first, second);
    }
}
