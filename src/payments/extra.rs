use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::types::{Direction, RepaymentFrequency};

/// cadence of an extra repayment rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtraRepaymentKind {
    /// a single lump sum at `start_period`
    OneOff,
    Weekly,
    Fortnightly,
    Monthly,
    Annual,
    /// every `interval_months` periods counted from `start_period`
    Custom { interval_months: u32 },
}

impl ExtraRepaymentKind {
    /// calendar occurrences per year for the recurring kinds
    fn occurrences_per_year(&self) -> Option<u32> {
        match self {
            ExtraRepaymentKind::Weekly => Some(52),
            ExtraRepaymentKind::Fortnightly => Some(26),
            ExtraRepaymentKind::Monthly => Some(12),
            ExtraRepaymentKind::Annual => Some(1),
            ExtraRepaymentKind::OneOff | ExtraRepaymentKind::Custom { .. } => None,
        }
    }
}

/// additional cash flow against a loan, evaluated purely from the period index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtraRepaymentRule {
    #[serde(flatten)]
    pub kind: ExtraRepaymentKind,
    pub start_period: u32,
    /// inclusive; open-ended when absent (ignored for one-off rules)
    #[serde(default)]
    pub end_period: Option<u32>,
    pub amount: Money,
    #[serde(default)]
    pub direction: Direction,
}

impl ExtraRepaymentRule {
    pub fn one_off(period: u32, amount: Money) -> Self {
        Self {
            kind: ExtraRepaymentKind::OneOff,
            start_period: period,
            end_period: None,
            amount,
            direction: Direction::Deposit,
        }
    }

    pub fn recurring(
        kind: ExtraRepaymentKind,
        start_period: u32,
        end_period: Option<u32>,
        amount: Money,
    ) -> Self {
        Self {
            kind,
            start_period,
            end_period,
            amount,
            direction: Direction::Deposit,
        }
    }

    pub fn custom(
        interval_months: u32,
        start_period: u32,
        end_period: Option<u32>,
        amount: Money,
    ) -> Self {
        Self::recurring(
            ExtraRepaymentKind::Custom { interval_months },
            start_period,
            end_period,
            amount,
        )
    }

    /// turn the rule into a redraw that increases the balance
    pub fn withdraw(mut self) -> Self {
        self.direction = Direction::Withdraw;
        self
    }

    /// reject rules that would silently do the wrong thing
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.amount.is_negative() {
            return Err(LoanError::InvalidExtraRepayment {
                index,
                message: format!(
                    "amount {} is negative, use a withdraw direction instead",
                    self.amount
                ),
            });
        }

        if let ExtraRepaymentKind::Custom { interval_months: 0 } = self.kind {
            return Err(LoanError::InvalidExtraRepayment {
                index,
                message: "custom interval must be at least one period".to_string(),
            });
        }

        Ok(())
    }

    /// signed contribution of this rule for `period` on a loan repaid at `frequency`
    pub fn contribution(&self, period: u32, frequency: RepaymentFrequency) -> Money {
        if !self.amount.is_positive() {
            return Money::ZERO;
        }

        let amount = match self.kind {
            ExtraRepaymentKind::OneOff => one_off(self, period),
            ExtraRepaymentKind::Custom { interval_months } => {
                custom_interval(self, period, interval_months)
            }
            ExtraRepaymentKind::Weekly
            | ExtraRepaymentKind::Fortnightly
            | ExtraRepaymentKind::Monthly
            | ExtraRepaymentKind::Annual => recurring(self, period, frequency),
        };

        match self.direction {
            Direction::Deposit => amount,
            Direction::Withdraw => -amount,
        }
    }

    fn in_window(&self, period: u32) -> bool {
        match self.end_period {
            Some(end) => end >= self.start_period && period >= self.start_period && period <= end,
            None => period >= self.start_period,
        }
    }
}

fn one_off(rule: &ExtraRepaymentRule, period: u32) -> Money {
    if period == rule.start_period {
        rule.amount
    } else {
        Money::ZERO
    }
}

/// recurring amounts are restated per loan period using the ratio of
/// calendar occurrences per year, e.g. a weekly $100 on a monthly loan adds
/// $100 * 52 / 12 each month
fn recurring(rule: &ExtraRepaymentRule, period: u32, frequency: RepaymentFrequency) -> Money {
    if !rule.in_window(period) {
        return Money::ZERO;
    }

    match rule.kind.occurrences_per_year() {
        Some(per_year) => Money::from_decimal(
            rule.amount.as_decimal() * Decimal::from(per_year)
                / Decimal::from(frequency.periods_per_year()),
        ),
        None => Money::ZERO,
    }
}

fn custom_interval(rule: &ExtraRepaymentRule, period: u32, interval: u32) -> Money {
    if interval == 0 || !rule.in_window(period) {
        return Money::ZERO;
    }

    if (period - rule.start_period) % interval == 0 {
        rule.amount
    } else {
        Money::ZERO
    }
}

/// sums the contributions of every rule for a period
#[derive(Debug, Clone)]
pub struct ExtraRepaymentEvaluator<'a> {
    rules: &'a [ExtraRepaymentRule],
    frequency: RepaymentFrequency,
}

impl<'a> ExtraRepaymentEvaluator<'a> {
    /// validate every rule up front so the simulation never starts on a
    /// malformed rule set
    pub fn new(rules: &'a [ExtraRepaymentRule], frequency: RepaymentFrequency) -> Result<Self> {
        for (index, rule) in rules.iter().enumerate() {
            rule.validate(index)?;
        }

        Ok(Self { rules, frequency })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// deposits positive, withdrawals negative
    pub fn net_extra(&self, period: u32) -> Money {
        self.rules
            .iter()
            .map(|rule| rule.contribution(period, self.frequency))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const MONTHLY: RepaymentFrequency = RepaymentFrequency::Monthly;

    fn every(
        kind: ExtraRepaymentKind,
        start: u32,
        end: Option<u32>,
        amount: i64,
    ) -> ExtraRepaymentRule {
        ExtraRepaymentRule::recurring(kind, start, end, Money::from_major(amount))
    }

    #[test]
    fn test_one_off_only_at_start() {
        let rule = ExtraRepaymentRule::one_off(12, Money::from_major(10_000));

        assert_eq!(rule.contribution(11, MONTHLY), Money::ZERO);
        assert_eq!(rule.contribution(12, MONTHLY), Money::from_major(10_000));
        assert_eq!(rule.contribution(13, MONTHLY), Money::ZERO);
    }

    #[test]
    fn test_recurring_window_inclusive() {
        let rule = every(ExtraRepaymentKind::Monthly, 3, Some(5), 200);

        assert_eq!(rule.contribution(2, MONTHLY), Money::ZERO);
        assert_eq!(rule.contribution(3, MONTHLY), Money::from_major(200));
        assert_eq!(rule.contribution(5, MONTHLY), Money::from_major(200));
        assert_eq!(rule.contribution(6, MONTHLY), Money::ZERO);
    }

    #[test]
    fn test_recurring_open_ended() {
        let rule = every(ExtraRepaymentKind::Monthly, 0, None, 50);
        assert_eq!(rule.contribution(359, MONTHLY), Money::from_major(50));
    }

    #[test]
    fn test_recurring_scaled_to_loan_frequency() {
        let weekly = every(ExtraRepaymentKind::Weekly, 0, None, 120);
        assert_eq!(weekly.contribution(0, MONTHLY), Money::from_major(520));

        let annual = every(ExtraRepaymentKind::Annual, 0, None, 1_200);
        assert_eq!(annual.contribution(4, MONTHLY), Money::from_major(100));

        let monthly = every(ExtraRepaymentKind::Monthly, 0, None, 52);
        assert_eq!(monthly.contribution(0, RepaymentFrequency::Weekly), Money::from_major(12));

        let fortnightly = every(ExtraRepaymentKind::Fortnightly, 0, None, 100);
        let same_cadence = fortnightly.contribution(0, RepaymentFrequency::Fortnightly);
        assert_eq!(same_cadence, Money::from_major(100));
    }

    #[test]
    fn test_custom_interval() {
        let rule = ExtraRepaymentRule::custom(6, 2, Some(20), Money::from_major(1_000));

        let hits: Vec<u32> = (0..30)
            .filter(|p| rule.contribution(*p, MONTHLY).is_positive())
            .collect();
        assert_eq!(hits, vec![2, 8, 14, 20]);
    }

    #[test]
    fn test_inverted_window_and_zero_amount_contribute_nothing() {
        let inverted = every(ExtraRepaymentKind::Monthly, 10, Some(5), 100);
        assert!((0..20).all(|p| inverted.contribution(p, MONTHLY).is_zero()));

        let zero = ExtraRepaymentRule::one_off(3, Money::ZERO);
        assert!(zero.contribution(3, MONTHLY).is_zero());
    }

    #[test]
    fn test_withdrawal_is_negative() {
        let redraw = ExtraRepaymentRule::one_off(4, Money::from_major(5_000)).withdraw();
        assert_eq!(redraw.contribution(4, MONTHLY), -Money::from_major(5_000));
    }

    #[test]
    fn test_evaluator_sums_overlapping_rules() {
        let rules = vec![
            every(ExtraRepaymentKind::Monthly, 0, Some(11), 100),
            ExtraRepaymentRule::one_off(6, Money::from_major(2_000)),
            ExtraRepaymentRule::one_off(6, Money::from_major(500)).withdraw(),
        ];
        let evaluator = ExtraRepaymentEvaluator::new(&rules, MONTHLY).unwrap();

        assert_eq!(evaluator.net_extra(5), Money::from_major(100));
        assert_eq!(evaluator.net_extra(6), Money::from_major(1_600));
        assert_eq!(evaluator.net_extra(12), Money::ZERO);
    }

    #[test]
    fn test_malformed_rules_fail_fast() {
        let negative = vec![
            ExtraRepaymentRule::one_off(1, Money::from_major(10)),
            ExtraRepaymentRule::one_off(2, Money::from_decimal(dec!(-10))),
        ];
        let result = ExtraRepaymentEvaluator::new(&negative, MONTHLY);
        assert!(matches!(result, Err(LoanError::InvalidExtraRepayment { index: 1, .. })));

        let zero_interval = vec![ExtraRepaymentRule::custom(0, 0, None, Money::from_major(10))];
        assert!(ExtraRepaymentEvaluator::new(&zero_interval, MONTHLY).is_err());
    }

    #[test]
    fn test_rule_json_shape() {
        let rule: ExtraRepaymentRule = serde_json::from_str(
            r#"{"kind": "custom", "interval_months": 3, "start_period": 0,
                "amount": "250", "direction": "withdraw"}"#,
        )
        .unwrap();
        assert_eq!(rule.kind, ExtraRepaymentKind::Custom { interval_months: 3 });
        assert_eq!(rule.direction, Direction::Withdraw);
        assert_eq!(rule.end_period, None);

        let unknown = serde_json::from_str::<ExtraRepaymentRule>(
            r#"{"kind": "quarterly", "start_period": 0, "amount": "250"}"#,
        );
        assert!(unknown.is_err());
    }
}
