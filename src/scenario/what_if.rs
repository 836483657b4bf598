//! counterfactual for a split comparison
//!
//! instead of taking out the second loan, the borrower keeps the single loan
//! and pays whatever extra the split scenario would have cost them each
//! period straight into it.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::{ExtraRepaymentRule, ScheduleSummary};
use crate::types::months_between;

use super::{CombinedSchedule, LoanPlan};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatIfResult {
    pub summary: ScheduleSummary,
    /// total cash moved into the single loan as extra repayments
    pub redirected_cash: Money,
    pub periods_redirected: u32,
    /// positive when the single loan with redirected cash pays less interest
    pub interest_saved_vs_split: Money,
    /// positive when it is also repaid before the split scenario
    pub months_earlier_than_split: i32,
}

/// re-run the single loan with the split scenario's excess cash as extras.
///
/// the excess at period `i` is the split scenario's combined payment minus
/// the single loan's payment at `i`; only positive excesses are redirected.
pub fn simulate_what_if(
    single_plan: &LoanPlan,
    single: &CombinedSchedule,
    split: &CombinedSchedule,
    config: &SimulationConfig,
) -> Result<WhatIfResult> {
    let mut plan = single_plan.clone();
    let mut redirected_cash = Money::ZERO;
    let mut periods_redirected = 0;

    for period in &split.periods {
        let excess = period.payment - single.payment_at(period.index);
        if excess.is_positive() {
            plan = plan.extra_repayment(ExtraRepaymentRule::one_off(period.index, excess));
            redirected_cash += excess;
            periods_redirected += 1;
        }
    }

    let schedule = plan.simulate(config)?;
    log::debug!(
        "what-if redirected {} over {} periods, interest {} against split {}",
        redirected_cash,
        periods_redirected,
        schedule.summary.total_interest,
        split.total_interest
    );

    Ok(WhatIfResult {
        interest_saved_vs_split: split.total_interest - schedule.summary.total_interest,
        months_earlier_than_split: months_between(schedule.summary.payoff_date, split.payoff_date),
        redirected_cash,
        periods_redirected,
        summary: schedule.summary,
    })
}
