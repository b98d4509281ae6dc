use crate::api::advance::{AdvanceEntry, AdvanceListResponse, AdvanceQuery, BulkAdvances};
use crate::api::attendance::{AttendanceEntry, BulkAttendance};
use crate::api::employee::{CreateEmployee, EmployeeListResponse, EmployeeQuery};
use crate::api::overtime::{BulkOvertime, OvertimeEntry};
use crate::api::payroll::{PaginatedPayrollResponse, PayrollQuery, RunPayroll};
use crate::api::wage_policy::UpsertWagePolicy;
use crate::api::wage_terms::UpsertWageTerms;
use crate::model::advance::AdvancePayment;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;
use crate::model::overtime::{OvertimeRecord, OvertimeType};
use crate::model::payroll::PayrollRecord;
use crate::model::wage_policy::WagePolicy;
use crate::model::wage_terms::WageTerms;
use crate::payroll::calculator::{RunSummary, SkipReason, SkippedEmployee};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wagebook Payroll API",
        version = "1.0.0",
        description = r#"
## Weekly payroll service

Tracks per-employee wage terms, an organization-wide overtime policy, and a
weekly time ledger (attendance, overtime, advances), and turns them into
idempotent weekly payroll snapshots.

### Key operations
- **Time ledger entry**
  - Bulk attendance per date (upsert per employee/day)
  - Bulk overtime per date (append, summed per week)
  - Bulk advances (outstanding until a payroll is paid)
- **Payroll**
  - Run the weekly computation for all active employees or one employee
  - Pay a record, settling the employee's outstanding advances
  - List and inspect snapshots per week

### Response format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,

        crate::api::wage_terms::put_wage_terms,
        crate::api::wage_terms::get_wage_terms,

        crate::api::wage_policy::put_wage_policy,
        crate::api::wage_policy::get_wage_policy,

        crate::api::attendance::bulk_attendance,
        crate::api::overtime::bulk_overtime,

        crate::api::advance::bulk_advances,
        crate::api::advance::list_advances,

        crate::api::payroll::run_payroll,
        crate::api::payroll::pay_payroll,
        crate::api::payroll::list_payroll,
        crate::api::payroll::get_payroll
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            EmployeeQuery,
            EmployeeListResponse,
            WageTerms,
            UpsertWageTerms,
            WagePolicy,
            UpsertWagePolicy,
            AttendanceStatus,
            AttendanceRecord,
            AttendanceEntry,
            BulkAttendance,
            OvertimeType,
            OvertimeRecord,
            OvertimeEntry,
            BulkOvertime,
            AdvancePayment,
            AdvanceEntry,
            BulkAdvances,
            AdvanceQuery,
            AdvanceListResponse,
            PayrollRecord,
            RunPayroll,
            RunSummary,
            SkippedEmployee,
            SkipReason,
            PayrollQuery,
            PaginatedPayrollResponse
        )
    ),
    tags(
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Wages", description = "Wage terms and overtime policy APIs"),
        (name = "Attendance", description = "Attendance ledger APIs"),
        (name = "Overtime", description = "Overtime ledger APIs"),
        (name = "Advances", description = "Advance payment APIs"),
        (name = "Payroll", description = "Weekly payroll APIs"),
    )
)]
pub struct ApiDoc;
