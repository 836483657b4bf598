use serde::{Deserialize, Serialize};

use crate::config::{LoanInput, SimulationConfig};
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::events::ScheduleEvent;
use crate::interest::{calculate_repayment, split_repayment, RateChangeResolver};
use crate::payments::extra::ExtraRepaymentEvaluator;
use crate::payments::strategy::RepaymentAdjuster;
use crate::payments::LoanPeriod;
use crate::types::RepaymentType;

/// everything the period loop carries from one period to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    /// index of the next period to simulate
    pub period: u32,
    pub balance: Money,
    pub annual_rate: Rate,
    /// scheduled repayment currently in force
    pub repayment: Money,
    /// position reached in the sorted rate change list
    pub rate_cursor: usize,
}

/// read-only inputs shared by every step of one simulation
pub struct StepContext<'a> {
    pub loan: &'a LoanInput,
    pub config: &'a SimulationConfig,
    pub total_periods: u32,
    pub rates: &'a RateChangeResolver,
    pub extras: &'a ExtraRepaymentEvaluator<'a>,
    pub adjust: RepaymentAdjuster,
}

/// result of simulating one period
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub state: SimulationState,
    pub row: LoanPeriod,
    pub events: Vec<ScheduleEvent>,
}

impl SimulationState {
    /// state before the first period: full principal at the contract rate
    pub fn initial(loan: &LoanInput, total_periods: u32) -> Result<Self> {
        let repayment = calculate_repayment(
            loan.principal,
            loan.annual_rate,
            total_periods,
            loan.periods_per_year(),
            loan.repayment_type,
        )?;

        Ok(Self {
            period: 0,
            balance: loan.principal,
            annual_rate: loan.annual_rate,
            repayment,
            rate_cursor: 0,
        })
    }

    /// nothing meaningful left to repay
    pub fn is_settled(&self, config: &SimulationConfig) -> bool {
        self.balance <= config.balance_epsilon
    }

    /// simulate `self.period` and produce the state for the following one
    pub fn step(&self, ctx: &StepContext<'_>) -> Result<StepOutcome> {
        let loan = ctx.loan;
        let period = self.period;
        let periods_per_year = loan.periods_per_year();
        let mut events = Vec::new();

        // 1. rate changes due at the start of this period; the strategy decides
        // whether the repayment follows the new rate or the payoff date moves
        let (rate_cursor, change) = ctx.rates.resolve(self.rate_cursor, period);
        let (annual_rate, repayment) = match change {
            Some(change) => {
                let remaining = ctx.total_periods.saturating_sub(period);
                let repayment = match loan.repayment_type {
                    RepaymentType::PrincipalAndInterest => (ctx.adjust)(
                        loan,
                        self.balance,
                        change.annual_rate,
                        remaining,
                        self.repayment,
                    )?,
                    RepaymentType::InterestOnly => calculate_repayment(
                        self.balance,
                        change.annual_rate,
                        remaining,
                        periods_per_year,
                        loan.repayment_type,
                    )?,
                };
                events.push(ScheduleEvent::RateChanged {
                    period,
                    old_rate: self.annual_rate,
                    new_rate: change.annual_rate,
                    new_repayment: repayment,
                });
                (change.annual_rate, repayment)
            }
            None => (self.annual_rate, self.repayment),
        };

        // 2-3. interest and the scheduled principal portion
        let periodic_rate = annual_rate.periodic(periods_per_year);
        let is_final_period = period + 1 >= ctx.total_periods;
        let scheduled = match loan.repayment_type {
            RepaymentType::PrincipalAndInterest => repayment,
            RepaymentType::InterestOnly => {
                let interest = self.balance.interest_at(periodic_rate);
                if is_final_period && ctx.config.interest_only_balloon {
                    interest + self.balance
                } else {
                    interest
                }
            }
        };
        let split = split_repayment(self.balance, periodic_rate, scheduled);
        let mut principal_paid = split.principal;

        if split.capitalized.is_positive() {
            events.push(ScheduleEvent::InterestCapitalized {
                period,
                amount: split.capitalized,
                new_balance: self.balance + split.capitalized,
            });
        }

        // 4-5. extra cash flow, clamped so the balance never goes negative
        let requested = ctx.extras.net_extra(period);
        let after_schedule = (self.balance - principal_paid + split.capitalized).max(Money::ZERO);
        let applied = if requested.is_positive() {
            requested.min(after_schedule)
        } else {
            requested
        };
        if !requested.is_zero() {
            events.push(ScheduleEvent::ExtraRepaymentApplied {
                period,
                requested,
                applied,
                surplus: requested - applied,
            });
        }

        let mut closing = (after_schedule - applied).max(Money::ZERO);

        // sweep rounding dust into the principal so the loan closes at exactly zero
        if closing.is_positive() && closing <= ctx.config.balance_epsilon {
            principal_paid += closing;
            closing = Money::ZERO;
        }

        let date = loan.frequency.due_date(loan.start_date, period)?;
        if closing.is_zero() {
            events.push(ScheduleEvent::PaidOff { period, date });
        }

        // 7. strategy decides the repayment once extras move the balance
        let is_amortizing = loan.repayment_type == RepaymentType::PrincipalAndInterest;
        let next_repayment = if !applied.is_zero() && is_amortizing {
            let remaining = ctx.total_periods.saturating_sub(period + 1);
            let adjusted = (ctx.adjust)(loan, closing, annual_rate, remaining, repayment)?;
            if adjusted != repayment {
                events.push(ScheduleEvent::RepaymentRecalculated {
                    period,
                    old_repayment: repayment,
                    new_repayment: adjusted,
                    remaining_periods: remaining,
                });
            }
            adjusted
        } else {
            repayment
        };

        let row = LoanPeriod {
            index: period,
            date,
            opening_balance: self.balance,
            closing_balance: closing,
            principal_paid,
            extra_repayment: applied,
            interest_charged: split.interest,
            capitalized_interest: split.capitalized,
            total_payment: principal_paid + applied + split.interest - split.capitalized,
            scheduled_repayment: scheduled,
            annual_rate,
        };

        let state = SimulationState {
            period: period + 1,
            balance: closing,
            annual_rate,
            repayment: next_repayment,
            rate_cursor,
        };

        Ok(StepOutcome { state, row, events })
    }
}
