//! json request envelopes for driving the engine from another process
use serde::{Deserialize, Serialize};

use crate::config::{LoanInput, SimulationConfig};
use crate::errors::Result;
use crate::interest::RateChange;
use crate::payments::{generate_schedule_with_config, ExtraRepaymentRule, Schedule};
use crate::scenario::{
    compare_scenarios_with_config, ComparisonResult, ScenarioRules, SplitScenario,
};

/// one loan plus everything needed to simulate it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub loan: LoanInput,
    #[serde(default)]
    pub extra_repayments: Vec<ExtraRepaymentRule>,
    #[serde(default)]
    pub rate_changes: Vec<RateChange>,
    #[serde(default)]
    pub config: SimulationConfig,
}

impl ScheduleRequest {
    pub fn new(loan: LoanInput) -> Self {
        Self {
            loan,
            extra_repayments: Vec::new(),
            rate_changes: Vec::new(),
            config: SimulationConfig::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn run(&self) -> Result<Schedule> {
        generate_schedule_with_config(
            &self.loan,
            &self.extra_repayments,
            &self.rate_changes,
            &self.config,
        )
    }
}

/// single loan against a split of the same total
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub single: LoanInput,
    pub split: SplitScenario,
    #[serde(default)]
    pub rules: ScenarioRules,
    #[serde(default)]
    pub config: SimulationConfig,
}

impl ComparisonRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn run(&self) -> Result<ComparisonResult> {
        compare_scenarios_with_config(&self.single, &self.split, &self.rules, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::errors::LoanError;
    use crate::payments::ExtraRepaymentKind;
    use crate::types::{Direction, RepaymentFrequency};
    use rust_decimal_macros::dec;

    const SCHEDULE_JSON: &str = r#"{
        "loan": {
            "principal": "500000",
            "annual_rate": "0.06",
            "term_years": 30,
            "frequency": "monthly",
            "repayment_type": "principal_and_interest",
            "strategy": "reduce_term",
            "start_date": "2024-01-01"
        },
        "extra_repayments": [
            {"kind": "fortnightly", "start_period": 0, "end_period": 119, "amount": "200"},
            {"kind": "custom", "interval_months": 6, "start_period": 6, "amount": "1500"},
            {"kind": "one_off", "start_period": 30, "amount": "5000", "direction": "withdraw"}
        ],
        "rate_changes": [
            {"period": 24, "annual_rate": "0.065"}
        ]
    }"#;

    #[test]
    fn test_schedule_request_from_json() {
        let request = ScheduleRequest::from_json(SCHEDULE_JSON).unwrap();

        assert_eq!(request.loan.principal, Money::from_major(500_000));
        assert_eq!(request.loan.frequency, RepaymentFrequency::Monthly);
        assert_eq!(request.extra_repayments.len(), 3);
        assert_eq!(request.extra_repayments[0].kind, ExtraRepaymentKind::Fortnightly);
        assert_eq!(
            request.extra_repayments[1].kind,
            ExtraRepaymentKind::Custom { interval_months: 6 }
        );
        assert_eq!(request.extra_repayments[2].direction, Direction::Withdraw);
        assert_eq!(request.rate_changes[0].annual_rate, Rate::from_percent(dec!(6.5)));
        assert_eq!(request.config, SimulationConfig::default());

        let schedule = request.run().unwrap();
        assert!(schedule.summary.paid_off);
        assert!(schedule.periods[30].extra_repayment.is_negative());
    }

    #[test]
    fn test_unknown_rule_kind_fails_fast() {
        let json = SCHEDULE_JSON.replace("\"fortnightly\"", "\"quarterly\"");
        let result = ScheduleRequest::from_json(&json);

        assert!(matches!(result, Err(LoanError::Json(_))));
    }

    #[test]
    fn test_invalid_request_rejected_on_run() {
        let json = SCHEDULE_JSON.replace("\"interval_months\": 6", "\"interval_months\": 0");
        let request = ScheduleRequest::from_json(&json).unwrap();

        assert!(matches!(request.run(), Err(LoanError::InvalidExtraRepayment { index: 1, .. })));
    }

    #[test]
    fn test_request_round_trip() {
        let request = ScheduleRequest::from_json(SCHEDULE_JSON).unwrap();
        let json = request.to_json_pretty().unwrap();

        assert_eq!(ScheduleRequest::from_json(&json).unwrap(), request);
    }

    #[test]
    fn test_comparison_request() {
        let request = ComparisonRequest::from_json(
            r#"{
                "single": {
                    "principal": "480000", "annual_rate": "0.0585", "term_years": 30,
                    "frequency": "monthly", "repayment_type": "principal_and_interest",
                    "strategy": "reduce_term", "start_date": "2025-07-01"
                },
                "split": {
                    "primary": {
                        "principal": "440000", "annual_rate": "0.0585", "term_years": 30,
                        "frequency": "monthly", "repayment_type": "principal_and_interest",
                        "strategy": "reduce_term", "start_date": "2025-07-01"
                    },
                    "secondary": {
                        "principal": "40000", "annual_rate": "0.085", "term_years": 5,
                        "frequency": "monthly", "repayment_type": "principal_and_interest",
                        "strategy": "reduce_term", "start_date": "2025-07-01"
                    }
                },
                "config": {"balance_epsilon": "0.005"}
            }"#,
        )
        .unwrap();

        assert_eq!(request.rules, ScenarioRules::default());
        assert_eq!(request.config.balance_epsilon, Money::from_decimal(dec!(0.005)));
        assert!(!request.config.interest_only_balloon);

        let result = request.run().unwrap();
        assert_eq!(result.split.loans.len(), 2);
        assert!(result.split.payoff_date <= result.single.payoff_date);
        assert!(result.to_json_pretty().unwrap().contains("what_if"));
    }
}
