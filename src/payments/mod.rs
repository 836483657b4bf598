pub mod amortization;
pub mod extra;
pub mod strategy;

pub use amortization::{
    generate_schedule, generate_schedule_with_config, LoanPeriod, Schedule, ScheduleSummary,
};
pub use extra::{ExtraRepaymentEvaluator, ExtraRepaymentKind, ExtraRepaymentRule};
pub use strategy::{adjuster_for, reduce_repayment, reduce_term, RepaymentAdjuster};
