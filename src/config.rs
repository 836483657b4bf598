use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::{RepaymentFrequency, RepaymentStrategy, RepaymentType};

/// immutable description of one loan to simulate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    /// nominal annual rate as a fraction, so 6% is `0.06` (serialized as the
    /// string `"0.06"`); build it from a percent figure with
    /// [`Rate::from_percent`]
    pub annual_rate: Rate,
    pub term_years: u32,
    pub frequency: RepaymentFrequency,
    pub repayment_type: RepaymentType,
    pub strategy: RepaymentStrategy,
    pub start_date: NaiveDate,
}

impl LoanInput {
    /// owner-occupier style mortgage: monthly principal and interest, extra
    /// repayments shorten the term
    pub fn mortgage(
        principal: Money,
        annual_rate: Rate,
        term_years: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            principal,
            annual_rate,
            term_years,
            frequency: RepaymentFrequency::Monthly,
            repayment_type: RepaymentType::PrincipalAndInterest,
            strategy: RepaymentStrategy::ReduceTerm,
            start_date,
        }
    }

    /// unsecured personal loan, same repayment shape as a mortgage but
    /// normally on a much shorter term
    pub fn personal_loan(
        principal: Money,
        annual_rate: Rate,
        term_years: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self::mortgage(principal, annual_rate, term_years, start_date)
    }

    pub fn with_frequency(mut self, frequency: RepaymentFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_repayment_type(mut self, repayment_type: RepaymentType) -> Self {
        self.repayment_type = repayment_type;
        self
    }

    pub fn with_strategy(mut self, strategy: RepaymentStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn periods_per_year(&self) -> u32 {
        self.frequency.periods_per_year()
    }

    /// number of scheduled repayments over the full term
    pub fn total_periods(&self) -> u32 {
        self.term_years * self.periods_per_year()
    }

    /// reject inputs that cannot be simulated
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(LoanError::InvalidPrincipal {
                amount: self.principal,
            });
        }

        if self.annual_rate.is_negative() {
            return Err(LoanError::InvalidInterestRate {
                rate: self.annual_rate,
            });
        }

        let total_periods = self
            .term_years
            .checked_mul(self.periods_per_year())
            .filter(|periods| *periods > 0)
            .ok_or(LoanError::InvalidTerm {
                years: self.term_years,
            })?;

        // the last repayment date must be representable
        self.frequency.due_date(self.start_date, total_periods - 1)?;

        Ok(())
    }
}

/// knobs that shape the simulation itself rather than the loan
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// balances at or below this are treated as repaid
    pub balance_epsilon: Money,
    /// repay an interest-only balance as a balloon in the final scheduled period
    pub interest_only_balloon: bool,
    /// years a reduce-term loan may run past its scheduled term when its held
    /// repayment no longer clears the balance in time (e.g. after a rate rise)
    pub term_overrun_years: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            balance_epsilon: Money::CENT,
            interest_only_balloon: false,
            term_overrun_years: 30,
        }
    }
}

impl SimulationConfig {
    pub fn with_balloon(mut self) -> Self {
        self.interest_only_balloon = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.balance_epsilon.is_negative() || self.balance_epsilon > Money::ONE {
            return Err(LoanError::InvalidConfiguration {
                message: format!(
                    "balance epsilon must be between 0 and 1, got {}",
                    self.balance_epsilon
                ),
            });
        }
        Ok(())
    }

    /// hard upper bound on the number of simulated periods for `loan`.
    ///
    /// only principal and interest loans that reduce their term can outrun the
    /// schedule; everything else stops at `term x periods per year`.
    pub fn period_limit(&self, loan: &LoanInput) -> Result<u32> {
        let overrun_years = match (loan.repayment_type, loan.strategy) {
            (RepaymentType::PrincipalAndInterest, RepaymentStrategy::ReduceTerm) => {
                self.term_overrun_years
            }
            _ => 0,
        };

        let limit = loan
            .term_years
            .checked_add(overrun_years)
            .and_then(|years| years.checked_mul(loan.periods_per_year()))
            .ok_or(LoanError::InvalidConfiguration {
                message: format!(
                    "term of {} years plus {} overrun years is too long",
                    loan.term_years, overrun_years
                ),
            })?;

        // the last possible repayment date must be representable
        loan.frequency.due_date(loan.start_date, limit.saturating_sub(1))?;

        Ok(limit)
    }
}
