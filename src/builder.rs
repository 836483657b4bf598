use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;

use crate::config::LoanInput;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::{RepaymentFrequency, RepaymentStrategy, RepaymentType};

/// incremental construction of a [`LoanInput`]
///
/// amount, rate and term are required. everything else falls back to a
/// monthly principal and interest loan that reduces its term, starting
/// today.
#[derive(Debug, Clone, Default)]
pub struct LoanInputBuilder {
    amount: Option<Money>,
    rate: Option<Rate>,
    term_years: Option<u32>,
    frequency: Option<RepaymentFrequency>,
    repayment_type: Option<RepaymentType>,
    strategy: Option<RepaymentStrategy>,
    start_date: Option<NaiveDate>,
}

impl LoanInputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn term_years(mut self, years: u32) -> Self {
        self.term_years = Some(years);
        self
    }

    pub fn frequency(mut self, frequency: RepaymentFrequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn repayment_type(mut self, repayment_type: RepaymentType) -> Self {
        self.repayment_type = Some(repayment_type);
        self
    }

    pub fn interest_only(self) -> Self {
        self.repayment_type(RepaymentType::InterestOnly)
    }

    pub fn strategy(mut self, strategy: RepaymentStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// build with system time as the default start date
    pub fn build(self) -> Result<LoanInput> {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.build_with_time(&time)
    }

    /// build with an explicit time provider for the default start date
    pub fn build_with_time(self, time_provider: &SafeTimeProvider) -> Result<LoanInput> {
        let amount = self.amount.ok_or(LoanError::InvalidConfiguration {
            message: "Amount required".to_string(),
        })?;

        let rate = self.rate.ok_or(LoanError::InvalidConfiguration {
            message: "Rate required".to_string(),
        })?;

        let term_years = self.term_years.ok_or(LoanError::InvalidConfiguration {
            message: "Term required".to_string(),
        })?;

        let start_date = self
            .start_date
            .unwrap_or_else(|| time_provider.now().date_naive());

        let mut loan = LoanInput::mortgage(amount, rate, term_years, start_date);
        if let Some(frequency) = self.frequency {
            loan = loan.with_frequency(frequency);
        }
        if let Some(repayment_type) = self.repayment_type {
            loan = loan.with_repayment_type(repayment_type);
        }
        if let Some(strategy) = self.strategy {
            loan = loan.with_strategy(strategy);
        }

        loan.validate()?;
        Ok(loan)
    }
}

impl LoanInput {
    pub fn builder() -> LoanInputBuilder {
        LoanInputBuilder::new()
    }
}
