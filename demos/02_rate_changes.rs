/// rate changes - a rising then falling rate cycle under both strategies
use loan_scenario_rs::chrono::NaiveDate;
use loan_scenario_rs::{
    generate_schedule, LoanInput, Money, Rate, RateChange, RepaymentStrategy, ScheduleEvent,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(2024, 7, 1).ok_or("bad start date")?;
    let loan =
        LoanInput::mortgage(Money::from_major(450_000), Rate::from_percent(dec!(5.5)), 25, start);

    let changes = vec![
        RateChange::new(6, Rate::from_percent(dec!(6.0))),
        RateChange::new(12, Rate::from_percent(dec!(6.35))),
        RateChange::new(36, Rate::from_percent(dec!(5.1))),
    ];

    // reduce-term holds the repayment and moves the payoff date;
    // reduce-repayment re-amortizes over the periods left
    for strategy in [RepaymentStrategy::ReduceTerm, RepaymentStrategy::ReduceRepayment] {
        let loan = loan.clone().with_strategy(strategy);
        let baseline = generate_schedule(&loan, &[], &[])?;
        let schedule = generate_schedule(&loan, &[], &changes)?;

        println!("=== {:?} ===", strategy);
        for event in &schedule.events {
            if let ScheduleEvent::RateChanged { period, old_rate, new_rate, new_repayment } = event
            {
                println!(
                    "period {:>3}: {} -> {}, repayment now {}",
                    period,
                    old_rate,
                    new_rate,
                    new_repayment.round_dp(2)
                );
            }
        }

        let extra_interest = schedule.summary.total_interest - baseline.summary.total_interest;
        println!("interest versus a flat rate: {}", extra_interest.round_dp(2));
        println!(
            "paid off on {} instead of {}\n",
            schedule.summary.payoff_date, baseline.summary.payoff_date
        );
    }

    Ok(())
}
