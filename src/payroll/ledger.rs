//! The persisted payroll ledger: snapshot upserts and the pay operation.

use sqlx::{MySqlConnection, MySqlPool};
use tracing::info;

use crate::model::payroll::{PayrollRecord, WORK_WEEK_DAYS};
use crate::payroll::calculator::{PayLines, WeekTotals};
use crate::payroll::error::PayrollError;
use crate::payroll::week::WeekKey;

/// A computed snapshot waiting to be persisted.
#[derive(Debug)]
pub struct PayrollDraft {
    pub employee_id: u64,
    pub week: WeekKey,
    pub totals: WeekTotals,
    pub lines: PayLines,
}

pub async fn find_by_key(
    conn: &mut MySqlConnection,
    employee_id: u64,
    week: WeekKey,
) -> sqlx::Result<Option<PayrollRecord>> {
    sqlx::query_as::<_, PayrollRecord>(
        "SELECT * FROM payroll_records WHERE employee_id = ? AND week_number = ? AND year = ?",
    )
    .bind(employee_id)
    .bind(week.week_number)
    .bind(week.year)
    .fetch_optional(conn)
    .await
}

pub async fn fetch(
    conn: &mut MySqlConnection,
    record_id: u64,
) -> sqlx::Result<Option<PayrollRecord>> {
    sqlx::query_as::<_, PayrollRecord>("SELECT * FROM payroll_records WHERE id = ?")
        .bind(record_id)
        .fetch_optional(conn)
        .await
}

/// Write a draft into the ledger: overwrite every derived field of an
/// existing (employee, week, year) row in place, or insert a fresh unpaid
/// one. Returns the stored row.
pub async fn upsert(
    conn: &mut MySqlConnection,
    existing_id: Option<u64>,
    draft: &PayrollDraft,
) -> Result<PayrollRecord, PayrollError> {
    let record_id = match existing_id {
        Some(id) => {
            sqlx::query(
                r#"
                UPDATE payroll_records
                SET present_days = ?, absent_days = ?, half_days = ?,
                    overtime_days = ?, overtime_hours = ?,
                    basic_salary = ?, overtime_amount = ?, deductions = ?,
                    advances_deduction = ?, net_salary = ?
                WHERE id = ?
                "#,
            )
            .bind(draft.totals.present_days)
            .bind(draft.totals.absent_days)
            .bind(draft.totals.half_days)
            .bind(draft.totals.overtime_days)
            .bind(draft.totals.overtime_hours)
            .bind(draft.lines.basic_salary)
            .bind(draft.lines.overtime_amount)
            .bind(draft.lines.deductions)
            .bind(draft.lines.advances_deduction)
            .bind(draft.lines.net_salary)
            .bind(id)
            .execute(&mut *conn)
            .await?;
            id
        }
        None => {
            let result = sqlx::query(
                r#"
                INSERT INTO payroll_records
                (employee_id, week_number, year, total_days,
                 present_days, absent_days, half_days,
                 overtime_days, overtime_hours,
                 basic_salary, overtime_amount, deductions,
                 advances_deduction, net_salary, paid)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, FALSE)
                "#,
            )
            .bind(draft.employee_id)
            .bind(draft.week.week_number)
            .bind(draft.week.year)
            .bind(WORK_WEEK_DAYS)
            .bind(draft.totals.present_days)
            .bind(draft.totals.absent_days)
            .bind(draft.totals.half_days)
            .bind(draft.totals.overtime_days)
            .bind(draft.totals.overtime_hours)
            .bind(draft.lines.basic_salary)
            .bind(draft.lines.overtime_amount)
            .bind(draft.lines.deductions)
            .bind(draft.lines.advances_deduction)
            .bind(draft.lines.net_salary)
            .execute(&mut *conn)
            .await?;
            result.last_insert_id()
        }
    };

    fetch(conn, record_id)
        .await?
        .ok_or(PayrollError::RecordNotFound(record_id))
}

/// Mark a payroll record paid and settle the employee's advances.
///
/// Paying one week settles the employee's entire outstanding advance
/// balance, including advances taken after the computed week. Both writes
/// happen in one transaction. Invoking this on an already-paid record is a
/// no-op that returns the record unchanged.
pub async fn mark_paid(pool: &MySqlPool, record_id: u64) -> Result<PayrollRecord, PayrollError> {
    let mut tx = pool.begin().await?;

    let record = sqlx::query_as::<_, PayrollRecord>(
        "SELECT * FROM payroll_records WHERE id = ? FOR UPDATE",
    )
    .bind(record_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(PayrollError::RecordNotFound(record_id))?;

    if record.paid {
        tx.commit().await?;
        return Ok(record);
    }

    sqlx::query("UPDATE payroll_records SET paid = TRUE, paid_date = CURDATE() WHERE id = ?")
        .bind(record_id)
        .execute(&mut *tx)
        .await?;

    let settled = sqlx::query(
        r#"
        UPDATE advance_payments
        SET is_paid = TRUE, paid_date = CURDATE()
        WHERE employee_id = ? AND is_paid = FALSE
        "#,
    )
    .bind(record.employee_id)
    .execute(&mut *tx)
    .await?;

    let record = fetch(&mut tx, record_id)
        .await?
        .ok_or(PayrollError::RecordNotFound(record_id))?;

    tx.commit().await?;

    info!(
        record_id,
        employee_id = record.employee_id,
        advances_settled = settled.rows_affected(),
        "Payroll record paid"
    );

    Ok(record)
}
