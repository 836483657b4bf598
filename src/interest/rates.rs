use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{LoanError, Result};

/// a new annual rate taking effect from the start of `period`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateChange {
    pub period: u32,
    pub annual_rate: Rate,
}

impl RateChange {
    pub fn new(period: u32, annual_rate: Rate) -> Self {
        Self { period, annual_rate }
    }
}

/// walks a sorted list of rate changes alongside the period loop
///
/// the resolver itself is immutable; the position reached so far is a
/// cursor owned by the caller's simulation state.
#[derive(Debug, Clone, Default)]
pub struct RateChangeResolver {
    changes: Vec<RateChange>,
}

impl RateChangeResolver {
    /// validate and sort changes by period.
    ///
    /// the sort is stable, so among changes sharing a period the one supplied
    /// last stays last and is the one that wins.
    pub fn new(changes: &[RateChange]) -> Result<Self> {
        for (index, change) in changes.iter().enumerate() {
            if change.annual_rate.is_negative() {
                return Err(LoanError::InvalidRateChange {
                    index,
                    message: format!("rate {} is negative", change.annual_rate),
                });
            }
        }

        let mut sorted = changes.to_vec();
        sorted.sort_by_key(|change| change.period);

        Ok(Self { changes: sorted })
    }

    pub fn changes(&self) -> &[RateChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// consume every change due at or before `period`, starting from `cursor`.
    ///
    /// returns the advanced cursor and the change that ends up in effect, if
    /// any was consumed.
    pub fn resolve(&self, cursor: usize, period: u32) -> (usize, Option<RateChange>) {
        let mut next = cursor;
        let mut applied = None;

        while let Some(change) = self.changes.get(next) {
            if change.period > period {
                break;
            }
            applied = Some(*change);
            next += 1;
        }

        (next, applied)
    }

    /// annual rate in effect during `period` for a loan starting at `initial`
    pub fn rate_at(&self, initial: Rate, period: u32) -> Rate {
        let (_, applied) = self.resolve(0, period);
        applied.map(|change| change.annual_rate).unwrap_or(initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pct(p: rust_decimal::Decimal) -> Rate {
        Rate::from_percent(p)
    }

    #[test]
    fn test_changes_sorted_by_period() {
        let resolver = RateChangeResolver::new(&[
            RateChange::new(24, pct(dec!(6.5))),
            RateChange::new(12, pct(dec!(6.0))),
        ])
        .unwrap();

        let periods: Vec<u32> = resolver.changes().iter().map(|c| c.period).collect();
        assert_eq!(periods, vec![12, 24]);
    }

    #[test]
    fn test_resolve_walks_forward() {
        let resolver = RateChangeResolver::new(&[
            RateChange::new(12, pct(dec!(6.0))),
            RateChange::new(24, pct(dec!(6.5))),
        ])
        .unwrap();

        let (cursor, change) = resolver.resolve(0, 11);
        assert_eq!(cursor, 0);
        assert!(change.is_none());

        let (cursor, change) = resolver.resolve(cursor, 12);
        assert_eq!(cursor, 1);
        assert_eq!(change.unwrap().annual_rate, pct(dec!(6.0)));

        // nothing new until period 24
        let (cursor, change) = resolver.resolve(cursor, 13);
        assert_eq!(cursor, 1);
        assert!(change.is_none());

        let (cursor, change) = resolver.resolve(cursor, 30);
        assert_eq!(cursor, 2);
        assert_eq!(change.unwrap().annual_rate, pct(dec!(6.5)));
    }

    #[test]
    fn test_same_period_last_supplied_wins() {
        let resolver = RateChangeResolver::new(&[
            RateChange::new(6, pct(dec!(7.0))),
            RateChange::new(3, pct(dec!(5.0))),
            RateChange::new(6, pct(dec!(4.0))),
        ])
        .unwrap();

        let (cursor, change) = resolver.resolve(1, 6);
        assert_eq!(cursor, 3);
        assert_eq!(change.unwrap().annual_rate, pct(dec!(4.0)));
    }

    #[test]
    fn test_rate_at() {
        let resolver = RateChangeResolver::new(&[RateChange::new(10, pct(dec!(3.0)))]).unwrap();
        let initial = pct(dec!(5.0));

        assert_eq!(resolver.rate_at(initial, 9), initial);
        assert_eq!(resolver.rate_at(initial, 10), pct(dec!(3.0)));
        assert_eq!(resolver.rate_at(initial, 500), pct(dec!(3.0)));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = RateChangeResolver::new(&[
            RateChange::new(1, pct(dec!(5.0))),
            RateChange::new(2, Rate::from_decimal(dec!(-0.01))),
        ]);

        assert!(matches!(result, Err(LoanError::InvalidRateChange { index: 1, .. })));
    }
}
