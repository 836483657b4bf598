use crate::config::LoanInput;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::calculate_repayment;
use crate::types::RepaymentStrategy;

/// decides the repayment for the next period once an extra cash flow has
/// moved the balance off its scheduled path
pub type RepaymentAdjuster = fn(
    loan: &LoanInput,
    balance: Money,
    annual_rate: Rate,
    remaining_periods: u32,
    current: Money,
) -> Result<Money>;

/// keep paying the same amount; the loan finishes earlier (or later, after a redraw)
pub fn reduce_term(
    _loan: &LoanInput,
    _balance: Money,
    _annual_rate: Rate,
    _remaining_periods: u32,
    current: Money,
) -> Result<Money> {
    Ok(current)
}

/// re-amortize the new balance over what is left of the original term
pub fn reduce_repayment(
    loan: &LoanInput,
    balance: Money,
    annual_rate: Rate,
    remaining_periods: u32,
    _current: Money,
) -> Result<Money> {
    calculate_repayment(
        balance,
        annual_rate,
        remaining_periods,
        loan.periods_per_year(),
        loan.repayment_type,
    )
}

/// pick the adjuster once per simulation
pub fn adjuster_for(strategy: RepaymentStrategy) -> RepaymentAdjuster {
    match strategy {
        RepaymentStrategy::ReduceTerm => reduce_term,
        RepaymentStrategy::ReduceRepayment => reduce_repayment,
    }
}
