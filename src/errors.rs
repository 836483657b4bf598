use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::RepaymentFrequency;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid principal: {amount} (must be above zero and the balance epsilon)")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid interest rate: {rate} (must not be negative)")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid term: {years} years (must be greater than zero)")]
    InvalidTerm {
        years: u32,
    },

    #[error("invalid extra repayment rule #{index}: {message}")]
    InvalidExtraRepayment {
        index: usize,
        message: String,
    },

    #[error("invalid rate change #{index}: {message}")]
    InvalidRateChange {
        index: usize,
        message: String,
    },

    #[error("scenarios fund different totals: single {single}, split {split}")]
    MismatchedFunding {
        single: Money,
        split: Money,
    },

    #[error("loans in one scenario must share a repayment frequency: {expected:?} vs {found:?}")]
    MismatchedFrequency {
        expected: RepaymentFrequency,
        found: RepaymentFrequency,
    },

    #[error("loans in one scenario must start on the same date: {expected} vs {found}")]
    MismatchedStartDate {
        expected: NaiveDate,
        found: NaiveDate,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("date out of range: {start} plus {periods} periods")]
    DateOutOfRange {
        start: NaiveDate,
        periods: u32,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LoanError>;
