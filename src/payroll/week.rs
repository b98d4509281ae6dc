use chrono::{Datelike, NaiveDate};

use crate::payroll::error::PayrollError;

/// Derive the (week_number, year) pair stored on time-ledger rows from a
/// date, using ISO-8601 week numbering (weeks start Monday, week 1 holds
/// the year's first Thursday). The year is the ISO week-year, so the days
/// around New Year land in the same key as the rest of their week.
///
/// Bulk entry calls this at write time; the calculator filters on the
/// stored pair verbatim and never re-derives it from `date`.
pub fn week_of(date: NaiveDate) -> (u32, i32) {
    let iso = date.iso_week();
    (iso.week(), iso.year())
}

/// A validated (week_number, year) payroll key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekKey {
    pub week_number: u32,
    pub year: i32,
}

impl WeekKey {
    pub fn new(week_number: u32, year: i32) -> Result<Self, PayrollError> {
        if !(1..=53).contains(&week_number) {
            return Err(PayrollError::InvalidWeek(week_number));
        }
        if !(1000..=9999).contains(&year) {
            return Err(PayrollError::InvalidYear(year));
        }
        Ok(Self { week_number, year })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn mid_year_date_maps_to_its_iso_week() {
        assert_eq!(week_of(date(2025, 6, 2)), (23, 2025));
    }

    #[test]
    fn late_december_can_belong_to_week_one_of_the_next_year() {
        // 2024-12-30 is the Monday of ISO week 1, 2025.
        assert_eq!(week_of(date(2024, 12, 30)), (1, 2025));
    }

    #[test]
    fn early_january_can_belong_to_the_previous_iso_year() {
        // 2021-01-01 is a Friday inside ISO week 53, 2020.
        assert_eq!(week_of(date(2021, 1, 1)), (53, 2020));
    }

    #[test]
    fn week_key_accepts_the_iso_range() {
        assert!(WeekKey::new(1, 2025).is_ok());
        assert!(WeekKey::new(53, 2025).is_ok());
    }

    #[test]
    fn week_key_rejects_out_of_range_weeks() {
        assert!(matches!(
            WeekKey::new(0, 2025),
            Err(PayrollError::InvalidWeek(0))
        ));
        assert!(matches!(
            WeekKey::new(54, 2025),
            Err(PayrollError::InvalidWeek(54))
        ));
    }

    #[test]
    fn week_key_rejects_non_four_digit_years() {
        assert!(matches!(
            WeekKey::new(23, 999),
            Err(PayrollError::InvalidYear(999))
        ));
        assert!(matches!(
            WeekKey::new(23, 10000),
            Err(PayrollError::InvalidYear(10000))
        ));
    }
}
