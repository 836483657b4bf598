pub mod builder;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod payments;
pub mod scenario;
pub mod serialization;
pub mod state;
pub mod types;

// re-export key types
pub use builder::LoanInputBuilder;
pub use config::{LoanInput, SimulationConfig};
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use events::{EventStore, ScheduleEvent};
pub use interest::{calculate_repayment, RateChange, RateChangeResolver};
pub use payments::{
    generate_schedule, generate_schedule_with_config, ExtraRepaymentEvaluator, ExtraRepaymentKind,
    ExtraRepaymentRule, LoanPeriod, Schedule, ScheduleSummary,
};
pub use scenario::{
    compare_scenarios, compare_scenarios_with_config, compare_schedules, extra_repayment_impact,
    run_scenario, CombinedPeriod, CombinedSchedule, ComparisonResult, ExtraRepaymentImpact,
    LoanAdjustments, LoanPlan, ScenarioRules, ScheduleComparison, SplitScenario, WhatIfResult,
};
pub use serialization::{ComparisonRequest, ScheduleRequest};
pub use state::SimulationState;
pub use types::{Direction, RepaymentFrequency, RepaymentStrategy, RepaymentType};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
