//! multi-loan scenarios
//!
//! a scenario is a set of loans running side by side from the same period
//! index, e.g. a mortgage plus a personal loan that together fund one
//! purchase. each loan is simulated on its own and the results are laid
//! over one another period by period.

pub mod comparison;
pub mod what_if;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{LoanInput, SimulationConfig};
use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::interest::RateChange;
use crate::payments::{generate_schedule_with_config, ExtraRepaymentRule, Schedule};

pub use comparison::{
    compare_scenarios, compare_scenarios_with_config, compare_schedules, extra_repayment_impact,
    ComparisonResult, ExtraRepaymentImpact, ScenarioRules, ScheduleComparison, SplitScenario,
};
pub use what_if::{simulate_what_if, WhatIfResult};

/// extra repayments and rate changes attached to one loan
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct LoanAdjustments {
    #[serde(default)]
    pub extra_repayments: Vec<ExtraRepaymentRule>,
    #[serde(default)]
    pub rate_changes: Vec<RateChange>,
}

/// a loan together with everything that happens to it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanPlan {
    pub loan: LoanInput,
    #[serde(flatten)]
    pub adjustments: LoanAdjustments,
}

impl LoanPlan {
    pub fn new(loan: LoanInput) -> Self {
        Self {
            loan,
            adjustments: LoanAdjustments::default(),
        }
    }

    pub fn with_adjustments(loan: LoanInput, adjustments: LoanAdjustments) -> Self {
        Self { loan, adjustments }
    }

    pub fn extra_repayment(mut self, rule: ExtraRepaymentRule) -> Self {
        self.adjustments.extra_repayments.push(rule);
        self
    }

    pub fn rate_change(mut self, change: RateChange) -> Self {
        self.adjustments.rate_changes.push(change);
        self
    }

    pub fn simulate(&self, config: &SimulationConfig) -> Result<Schedule> {
        generate_schedule_with_config(
            &self.loan,
            &self.adjustments.extra_repayments,
            &self.adjustments.rate_changes,
            config,
        )
    }
}

/// all loans of a scenario at one period index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedPeriod {
    pub index: u32,
    /// due date shared by the loans still running
    pub date: NaiveDate,
    /// sum of what every running loan is paid this period
    pub payment: Money,
    pub interest: Money,
    pub opening_balance: Money,
    pub closing_balance: Money,
    pub active_loans: u32,
}

/// several schedules laid over one another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedSchedule {
    pub loans: Vec<Schedule>,
    pub periods: Vec<CombinedPeriod>,
    pub total_interest: Money,
    pub total_paid: Money,
    pub total_principal: Money,
    /// payoff date of the slowest loan
    pub payoff_date: NaiveDate,
    pub payoff_period: u32,
    pub paid_off: bool,
}

impl CombinedSchedule {
    /// combined payment at `index`, zero once every loan has finished
    pub fn payment_at(&self, index: u32) -> Money {
        self.periods
            .get(index as usize)
            .map(|p| p.payment)
            .unwrap_or(Money::ZERO)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// simulate every plan and combine the results
pub fn run_scenario(plans: &[LoanPlan], config: &SimulationConfig) -> Result<CombinedSchedule> {
    let schedules = plans
        .iter()
        .map(|plan| plan.simulate(config))
        .collect::<Result<Vec<_>>>()?;

    combine_schedules(schedules)
}

/// loans combined period by period must fall due on the same dates
pub(crate) fn ensure_aligned(expected: &LoanInput, loan: &LoanInput) -> Result<()> {
    if loan.frequency != expected.frequency {
        return Err(LoanError::MismatchedFrequency {
            expected: expected.frequency,
            found: loan.frequency,
        });
    }

    if loan.start_date != expected.start_date {
        return Err(LoanError::MismatchedStartDate {
            expected: expected.start_date,
            found: loan.start_date,
        });
    }

    Ok(())
}

/// align schedules by period index.
///
/// a loan contributes to a period only while it still has a row there, so
/// its repayment drops out of the combined figure once it is paid off.
pub fn combine_schedules(schedules: Vec<Schedule>) -> Result<CombinedSchedule> {
    let first = schedules.first().ok_or_else(|| LoanError::InvalidConfiguration {
        message: "a scenario needs at least one loan".to_string(),
    })?;

    for schedule in &schedules[1..] {
        ensure_aligned(&first.loan, &schedule.loan)?;
    }

    let length = schedules.iter().map(|s| s.periods.len()).max().unwrap_or(0);
    let mut periods = Vec::with_capacity(length);

    for index in 0..length as u32 {
        let rows: Vec<_> = schedules.iter().filter_map(|s| s.period(index)).collect();
        let date = rows.iter().map(|row| row.date).min();
        let Some(date) = date else { continue };

        periods.push(CombinedPeriod {
            index,
            date,
            payment: rows.iter().map(|row| row.total_payment).sum(),
            interest: rows.iter().map(|row| row.interest_charged).sum(),
            opening_balance: rows.iter().map(|row| row.opening_balance).sum(),
            // finished loans sit at their final balance
            closing_balance: schedules.iter().map(|s| s.balance_after(index)).sum(),
            active_loans: rows.len() as u32,
        });
    }

    let slowest = schedules
        .iter()
        .max_by_key(|s| s.summary.payoff_date)
        .unwrap_or(first);

    let combined = CombinedSchedule {
        total_interest: schedules.iter().map(|s| s.summary.total_interest).sum(),
        total_paid: schedules.iter().map(|s| s.summary.total_paid).sum(),
        total_principal: schedules.iter().map(|s| s.loan.principal).sum(),
        payoff_date: slowest.summary.payoff_date,
        payoff_period: slowest.summary.payoff_period,
        paid_off: schedules.iter().all(|s| s.summary.paid_off),
        periods,
        loans: schedules,
    };

    log::debug!(
        "combined {} loans over {} periods, interest {}",
        combined.loans.len(),
        combined.periods.len(),
        combined.total_interest
    );

    Ok(combined)
}
