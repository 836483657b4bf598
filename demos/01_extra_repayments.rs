/// extra repayments - lump sums, regular top-ups and redraws
use loan_scenario_rs::chrono::NaiveDate;
use loan_scenario_rs::{
    extra_repayment_impact, ExtraRepaymentKind, ExtraRepaymentRule, LoanInput, Money, Rate,
    RepaymentStrategy, SimulationConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("bad start date")?;
    let loan = LoanInput::mortgage(Money::from_major(600_000), Rate::from_percentage(6), 30, start);

    let rules = vec![
        // $250 every fortnight for the first ten years
        ExtraRepaymentRule::recurring(
            ExtraRepaymentKind::Fortnightly,
            0,
            Some(119),
            Money::from_major(250),
        ),
        // annual bonus paid in from year two
        ExtraRepaymentRule::recurring(
            ExtraRepaymentKind::Annual,
            12,
            None,
            Money::from_major(5_000),
        ),
        // inheritance in year five
        ExtraRepaymentRule::one_off(60, Money::from_major(40_000)),
        // car purchase redrawn from the loan in year three
        ExtraRepaymentRule::one_off(36, Money::from_major(25_000)).withdraw(),
    ];

    let config = SimulationConfig::default();
    for strategy in [RepaymentStrategy::ReduceTerm, RepaymentStrategy::ReduceRepayment] {
        let loan = loan.clone().with_strategy(strategy);
        let impact = extra_repayment_impact(&loan, &rules, &[], &config)?;

        println!("=== {:?} ===", strategy);
        println!("interest saved: {}", impact.interest_saved.round_dp(2));
        println!("months saved:   {}", impact.months_saved);
        println!("paid off on:    {}\n", impact.with_extras.payoff_date);
    }

    Ok(())
}
