pub mod advance;
pub mod attendance;
pub mod employee;
pub mod overtime;
pub mod payroll;
pub mod wage_policy;
pub mod wage_terms;
