pub mod rates;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{compound_factor, Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::RepaymentType;

pub use rates::{RateChange, RateChangeResolver};

/// how one period's scheduled repayment divides between interest and principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSplit {
    pub interest: Money,
    pub principal: Money,
    /// interest the repayment did not cover, added back onto the balance
    pub capitalized: Money,
}

/// fixed periodic repayment for the given balance and remaining term
///
/// principal and interest loans use the annuity formula
/// `P * r * (1 + r)^n / ((1 + r)^n - 1)`, falling back to `P / n` when the
/// periodic rate is zero. interest-only loans pay `P * r`. the result is
/// never negative.
pub fn calculate_repayment(
    balance: Money,
    annual_rate: Rate,
    remaining_periods: u32,
    periods_per_year: u32,
    repayment_type: RepaymentType,
) -> Result<Money> {
    if !balance.is_positive() {
        return Ok(Money::ZERO);
    }

    let r = annual_rate.periodic(periods_per_year);

    if repayment_type == RepaymentType::InterestOnly {
        return Ok(balance.interest_at(r).max(Money::ZERO));
    }

    if remaining_periods == 0 {
        return Ok(balance);
    }

    if r.is_zero() {
        return Ok(balance / Decimal::from(remaining_periods));
    }

    let compound = compound_factor(r, remaining_periods).ok_or_else(|| LoanError::CalculationError {
        message: format!(
            "compound factor overflow for rate {} over {} periods",
            annual_rate, remaining_periods
        ),
    })?;

    let numerator = balance.as_decimal() * r * compound;
    let denominator = compound - Decimal::ONE;

    Ok(Money::from_decimal(numerator / denominator).max(Money::ZERO))
}

/// split a scheduled repayment against the opening balance of a period
///
/// the principal portion is capped at the balance; a repayment smaller than
/// the interest charged leaves the shortfall capitalized.
pub fn split_repayment(balance: Money, periodic_rate: Decimal, repayment: Money) -> PeriodSplit {
    let interest = balance.interest_at(periodic_rate).max(Money::ZERO);

    if repayment >= interest {
        PeriodSplit {
            interest,
            principal: (repayment - interest).min(balance.max(Money::ZERO)),
            capitalized: Money::ZERO,
        }
    } else {
        PeriodSplit {
            interest,
            principal: Money::ZERO,
            capitalized: interest - repayment,
        }
    }
}
