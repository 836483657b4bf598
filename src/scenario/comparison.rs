use serde::{Deserialize, Serialize};

use crate::config::{LoanInput, SimulationConfig};
use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::interest::RateChange;
use crate::payments::{generate_schedule_with_config, ExtraRepaymentRule, Schedule, ScheduleSummary};
use crate::types::months_between;

use super::what_if::{simulate_what_if, WhatIfResult};
use super::{ensure_aligned, run_scenario, CombinedSchedule, LoanAdjustments, LoanPlan};

/// difference between two schedules, measured as `alternative - baseline`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleComparison {
    /// negative when the alternative pays less interest
    pub interest_delta: Money,
    pub total_paid_delta: Money,
    /// positive when the alternative needs fewer periods
    pub periods_saved: i64,
    /// positive when the alternative is paid off earlier
    pub months_earlier_payoff: i32,
}

/// compare two schedules of the same loan shape
pub fn compare_schedules(baseline: &Schedule, alternative: &Schedule) -> ScheduleComparison {
    ScheduleComparison {
        interest_delta: alternative.summary.total_interest - baseline.summary.total_interest,
        total_paid_delta: alternative.summary.total_paid - baseline.summary.total_paid,
        periods_saved: baseline.summary.periods as i64 - alternative.summary.periods as i64,
        months_earlier_payoff: months_between(
            alternative.summary.payoff_date,
            baseline.summary.payoff_date,
        ),
    }
}

/// what a set of extra repayment rules is worth on one loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraRepaymentImpact {
    pub baseline: ScheduleSummary,
    pub with_extras: ScheduleSummary,
    pub interest_saved: Money,
    pub periods_saved: i64,
    pub months_saved: i32,
}

/// simulate a loan with and without its extra repayments; rate changes
/// apply to both runs
pub fn extra_repayment_impact(
    loan: &LoanInput,
    extra_repayments: &[ExtraRepaymentRule],
    rate_changes: &[RateChange],
    config: &SimulationConfig,
) -> Result<ExtraRepaymentImpact> {
    let baseline = generate_schedule_with_config(loan, &[], rate_changes, config)?;
    let with_extras = generate_schedule_with_config(loan, extra_repayments, rate_changes, config)?;
    let diff = compare_schedules(&baseline, &with_extras);

    Ok(ExtraRepaymentImpact {
        interest_saved: -diff.interest_delta,
        periods_saved: diff.periods_saved,
        months_saved: diff.months_earlier_payoff,
        baseline: baseline.summary,
        with_extras: with_extras.summary,
    })
}

/// the competing configuration: a smaller main loan plus a second loan
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplitScenario {
    pub primary: LoanInput,
    pub secondary: LoanInput,
}

/// adjustments per loan; the single-loan scenario uses the primary's
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ScenarioRules {
    #[serde(default)]
    pub primary: LoanAdjustments,
    #[serde(default)]
    pub secondary: LoanAdjustments,
}

/// single loan versus split loans funding the same total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub single: CombinedSchedule,
    pub split: CombinedSchedule,
    /// split minus single; positive when splitting costs more interest
    pub interest_delta: Money,
    pub total_paid_delta: Money,
    /// positive when the split scenario is fully repaid earlier
    pub months_earlier_payoff: i32,
    pub what_if: WhatIfResult,
}

impl ComparisonResult {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn compare_scenarios(
    single: &LoanInput,
    split: &SplitScenario,
    rules: &ScenarioRules,
) -> Result<ComparisonResult> {
    compare_scenarios_with_config(single, split, rules, &SimulationConfig::default())
}

/// run both scenarios, align them and derive the differentials
pub fn compare_scenarios_with_config(
    single: &LoanInput,
    split: &SplitScenario,
    rules: &ScenarioRules,
    config: &SimulationConfig,
) -> Result<ComparisonResult> {
    let split_total = split.primary.principal + split.secondary.principal;
    if split_total != single.principal {
        return Err(LoanError::MismatchedFunding {
            single: single.principal,
            split: split_total,
        });
    }

    for loan in [&split.primary, &split.secondary] {
        ensure_aligned(single, loan)?;
    }

    log::debug!(
        "comparing single loan of {} against {} + {}",
        single.principal,
        split.primary.principal,
        split.secondary.principal
    );

    let single_plan = LoanPlan::with_adjustments(single.clone(), rules.primary.clone());
    let single_run = run_scenario(std::slice::from_ref(&single_plan), config)?;
    let split_run = run_scenario(
        &[
            LoanPlan::with_adjustments(split.primary.clone(), rules.primary.clone()),
            LoanPlan::with_adjustments(split.secondary.clone(), rules.secondary.clone()),
        ],
        config,
    )?;

    let what_if = simulate_what_if(&single_plan, &single_run, &split_run, config)?;

    Ok(ComparisonResult {
        interest_delta: split_run.total_interest - single_run.total_interest,
        total_paid_delta: split_run.total_paid - single_run.total_paid,
        months_earlier_payoff: months_between(split_run.payoff_date, single_run.payoff_date),
        single: single_run,
        split: split_run,
        what_if,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::{RepaymentFrequency, RepaymentStrategy};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    fn single() -> LoanInput {
        mortgage(480_000)
    }

    fn mortgage(amount: i64) -> LoanInput {
        LoanInput::mortgage(Money::from_major(amount), Rate::from_percent(dec!(5.85)), 30, start())
    }

    fn split() -> SplitScenario {
        SplitScenario {
            primary: mortgage(440_000),
            secondary: LoanInput::personal_loan(
                Money::from_major(40_000),
                Rate::from_percent(dec!(8.5)),
                5,
                start(),
            ),
        }
    }

    #[test]
    fn test_split_payoff_no_later_than_single() {
        let result = compare_scenarios(&single(), &split(), &ScenarioRules::default()).unwrap();

        assert!(result.split.payoff_date <= result.single.payoff_date);
        assert!(result.months_earlier_payoff >= 0);
    }

    #[test]
    fn test_split_early_payment_is_sum_of_both_loans() {
        let result = compare_scenarios(&single(), &split(), &ScenarioRules::default()).unwrap();
        let mortgage = result.split.loans[0].summary.regular_payment;
        let personal = result.split.loans[1].summary.regular_payment;

        for index in 0..59 {
            assert_eq!(result.split.payment_at(index), mortgage + personal);
        }
        // the final personal loan period only differs by rounding dust
        let last = result.split.payment_at(59) - (mortgage + personal);
        assert!(last.abs() < Money::CENT);
        assert_eq!(result.split.payment_at(60), mortgage);
    }

    #[test]
    fn test_deltas() {
        let result = compare_scenarios(&single(), &split(), &ScenarioRules::default()).unwrap();

        assert_eq!(
            result.interest_delta,
            result.split.total_interest - result.single.total_interest
        );
        assert_eq!(result.total_paid_delta, result.split.total_paid - result.single.total_paid);
        // both fully repay the same principal, so the paid delta is all interest
        assert_eq!(result.total_paid_delta, result.interest_delta);
        // the personal loan clears quickly, so splitting pays less interest overall
        assert!(result.interest_delta.is_negative());
    }

    #[test]
    fn test_primary_rules_apply_to_both_mortgages() {
        let rules = ScenarioRules {
            primary: LoanAdjustments {
                extra_repayments: vec![ExtraRepaymentRule::one_off(12, Money::from_major(30_000))],
                rate_changes: vec![RateChange::new(24, Rate::from_percent(dec!(6.25)))],
            },
            secondary: LoanAdjustments::default(),
        };
        let result = compare_scenarios(&single(), &split(), &rules).unwrap();

        assert_eq!(result.single.loans[0].periods[12].extra_repayment, Money::from_major(30_000));
        assert_eq!(result.split.loans[0].periods[12].extra_repayment, Money::from_major(30_000));
        assert!(result.split.loans[1].periods.iter().all(|p| p.extra_repayment.is_zero()));
        assert_eq!(result.single.loans[0].periods[24].annual_rate, Rate::from_percent(dec!(6.25)));
    }

    #[test]
    fn test_mismatched_funding_rejected() {
        let mut scenario = split();
        scenario.secondary.principal = Money::from_major(30_000);

        let result = compare_scenarios(&single(), &scenario, &ScenarioRules::default());
        assert!(matches!(result, Err(LoanError::MismatchedFunding { .. })));
    }

    #[test]
    fn test_mismatched_frequency_rejected() {
        let mut scenario = split();
        scenario.primary.frequency = RepaymentFrequency::Fortnightly;

        let result = compare_scenarios(&single(), &scenario, &ScenarioRules::default());
        assert!(matches!(result, Err(LoanError::MismatchedFrequency { .. })));
    }

    #[test]
    fn test_later_secondary_start_rejected() {
        let mut scenario = split();
        scenario.secondary.start_date = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();

        let result = compare_scenarios(&single(), &scenario, &ScenarioRules::default());
        assert!(matches!(result, Err(LoanError::MismatchedStartDate { .. })));
    }

    #[test]
    fn test_compare_schedules() {
        let loan = single();
        let config = SimulationConfig::default();
        let baseline = generate_schedule_with_config(&loan, &[], &[], &config).unwrap();
        let faster = generate_schedule_with_config(
            &loan,
            &[ExtraRepaymentRule::one_off(0, Money::from_major(100_000))],
            &[],
            &config,
        )
        .unwrap();

        let diff = compare_schedules(&baseline, &faster);
        assert!(diff.interest_delta.is_negative());
        assert!(diff.periods_saved > 0);
        assert!(diff.months_earlier_payoff > 0);
        assert_eq!(diff.months_earlier_payoff as i64, diff.periods_saved);
    }

    #[test]
    fn test_extra_repayment_impact() {
        let loan = single().with_strategy(RepaymentStrategy::ReduceRepayment);
        let impact = extra_repayment_impact(
            &loan,
            &[ExtraRepaymentRule::one_off(36, Money::from_major(50_000))],
            &[],
            &SimulationConfig::default(),
        )
        .unwrap();

        assert!(impact.interest_saved.is_positive());
        // reduce-repayment keeps the original term
        assert_eq!(impact.periods_saved, 0);
        assert_eq!(impact.months_saved, 0);
        assert_eq!(impact.baseline.regular_payment, impact.with_extras.regular_payment);
    }
}
