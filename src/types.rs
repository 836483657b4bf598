use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{LoanError, Result};

/// how often scheduled repayments fall due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentFrequency {
    Weekly,
    Fortnightly,
    Monthly,
}

impl RepaymentFrequency {
    /// calendar periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            RepaymentFrequency::Weekly => 52,
            RepaymentFrequency::Fortnightly => 26,
            RepaymentFrequency::Monthly => 12,
        }
    }

    /// date on which repayment `index` (zero based) falls due.
    ///
    /// each repayment is dated at the end of its period, so index 0 lands one
    /// step after `start`. monthly steps are counted from `start` rather than
    /// chained, which keeps the day of month stable after short months.
    pub fn due_date(&self, start: NaiveDate, index: u32) -> Result<NaiveDate> {
        let steps = index.saturating_add(1);
        let date = match self {
            RepaymentFrequency::Weekly => start.checked_add_signed(Duration::weeks(steps as i64)),
            RepaymentFrequency::Fortnightly => {
                start.checked_add_signed(Duration::weeks(2 * steps as i64))
            }
            RepaymentFrequency::Monthly => start.checked_add_months(Months::new(steps)),
        };

        date.ok_or(LoanError::DateOutOfRange {
            start,
            periods: steps,
        })
    }
}

/// what the scheduled repayment covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentType {
    /// each repayment covers interest and part of the principal
    PrincipalAndInterest,
    /// repayments cover accrued interest only
    InterestOnly,
}

/// what happens to the schedule after extra repayments move the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentStrategy {
    /// keep the repayment amount, finish earlier
    ReduceTerm,
    /// lower the repayment, finish on the original term
    ReduceRepayment,
}

/// direction of an extra cash flow against the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// reduces the balance
    #[default]
    Deposit,
    /// increases the balance (offset-style redraw)
    Withdraw,
}

/// calendar months between two dates, positive when `to` is later
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    use chrono::Datelike;

    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}
