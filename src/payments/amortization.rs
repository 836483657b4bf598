use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{LoanInput, SimulationConfig};
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::events::{EventStore, ScheduleEvent};
use crate::interest::{RateChange, RateChangeResolver};
use crate::payments::extra::{ExtraRepaymentEvaluator, ExtraRepaymentRule};
use crate::payments::strategy::adjuster_for;
use crate::state::{SimulationState, StepContext};

/// one simulated repayment period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPeriod {
    pub index: u32,
    /// date the repayment for this period falls due
    pub date: NaiveDate,
    pub opening_balance: Money,
    pub closing_balance: Money,
    /// principal covered by the scheduled repayment
    pub principal_paid: Money,
    /// net extra cash flow actually applied (negative for redraws)
    pub extra_repayment: Money,
    pub interest_charged: Money,
    /// unpaid interest added to the balance
    pub capitalized_interest: Money,
    pub total_payment: Money,
    /// scheduled repayment in force for this period
    pub scheduled_repayment: Money,
    pub annual_rate: Rate,
}

/// aggregate view of a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// steady-state repayment before any extras
    pub regular_payment: Money,
    pub total_interest: Money,
    /// cash actually paid: principal + extra + interest, less any interest
    /// that was capitalized rather than paid
    pub total_paid: Money,
    pub total_principal: Money,
    pub total_extra: Money,
    /// date of the last simulated period
    pub payoff_date: NaiveDate,
    pub payoff_period: u32,
    pub periods: u32,
    pub scheduled_periods: u32,
    pub final_balance: Money,
    pub paid_off: bool,
}

/// a full amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub loan: LoanInput,
    pub periods: Vec<LoanPeriod>,
    pub summary: ScheduleSummary,
    pub events: Vec<ScheduleEvent>,
}

impl Schedule {
    /// get a period by zero-based index
    pub fn period(&self, index: u32) -> Option<&LoanPeriod> {
        self.periods.get(index as usize)
    }

    /// total cash paid in `index`, zero once the loan has been repaid
    pub fn payment_at(&self, index: u32) -> Money {
        self.period(index).map(|p| p.total_payment).unwrap_or(Money::ZERO)
    }

    /// balance after `index`; the final balance once the schedule has ended
    pub fn balance_after(&self, index: u32) -> Money {
        self.period(index)
            .map(|p| p.closing_balance)
            .unwrap_or(self.summary.final_balance)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// simulate a loan with the default simulation settings
pub fn generate_schedule(
    loan: &LoanInput,
    extra_repayments: &[ExtraRepaymentRule],
    rate_changes: &[RateChange],
) -> Result<Schedule> {
    generate_schedule_with_config(
        loan,
        extra_repayments,
        rate_changes,
        &SimulationConfig::default(),
    )
}

/// simulate a loan period by period.
///
/// every input is validated before the first period runs, so a caller never
/// receives a partially computed schedule. the loop is bounded by
/// [`SimulationConfig::period_limit`] and stops early once the balance is
/// repaid.
pub fn generate_schedule_with_config(
    loan: &LoanInput,
    extra_repayments: &[ExtraRepaymentRule],
    rate_changes: &[RateChange],
    config: &SimulationConfig,
) -> Result<Schedule> {
    loan.validate()?;
    config.validate()?;
    // anything at or below the epsilon would count as repaid before period 0
    if loan.principal <= config.balance_epsilon {
        return Err(LoanError::InvalidPrincipal {
            amount: loan.principal,
        });
    }
    let extras = ExtraRepaymentEvaluator::new(extra_repayments, loan.frequency)?;
    let rates = RateChangeResolver::new(rate_changes)?;

    let total_periods = loan.total_periods();
    let period_limit = config.period_limit(loan)?;
    log::debug!(
        "simulating {} {:?} periods: principal {}, rate {}, {} extra rules, {} rate changes",
        total_periods,
        loan.frequency,
        loan.principal,
        loan.annual_rate,
        extra_repayments.len(),
        rate_changes.len()
    );

    let ctx = StepContext {
        loan,
        config,
        total_periods,
        rates: &rates,
        extras: &extras,
        adjust: adjuster_for(loan.strategy),
    };

    let mut state = SimulationState::initial(loan, total_periods)?;
    let mut periods = Vec::with_capacity(total_periods as usize);
    let mut events = EventStore::new();

    while state.period < period_limit && !state.is_settled(config) {
        let outcome = state.step(&ctx)?;
        for event in outcome.events {
            events.emit(event);
        }
        periods.push(outcome.row);
        state = outcome.state;
    }

    let summary = summarize(&periods, total_periods)?;
    log::debug!(
        "schedule complete: {} of {} periods, interest {}, paid off {}",
        summary.periods,
        total_periods,
        summary.total_interest,
        summary.paid_off
    );

    Ok(Schedule {
        loan: loan.clone(),
        periods,
        summary,
        events: events.take_events(),
    })
}

fn summarize(periods: &[LoanPeriod], scheduled_periods: u32) -> Result<ScheduleSummary> {
    // principal above the epsilon and a positive term always yield a row
    let last = periods.last().ok_or_else(|| LoanError::CalculationError {
        message: "simulation produced no periods".to_string(),
    })?;
    let (payoff_date, payoff_period, final_balance) = (last.date, last.index, last.closing_balance);

    Ok(ScheduleSummary {
        regular_payment: periods
            .first()
            .map(|p| p.scheduled_repayment)
            .unwrap_or(Money::ZERO),
        total_interest: periods.iter().map(|p| p.interest_charged).sum(),
        total_paid: periods.iter().map(|p| p.total_payment).sum(),
        total_principal: periods.iter().map(|p| p.principal_paid).sum(),
        total_extra: periods.iter().map(|p| p.extra_repayment).sum(),
        payoff_date,
        payoff_period,
        periods: periods.len() as u32,
        scheduled_periods,
        final_balance,
        paid_off: final_balance.is_zero(),
    })
}
