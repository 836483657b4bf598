/// split comparison - one big mortgage or a mortgage plus a personal loan
use loan_scenario_rs::chrono::NaiveDate;
use loan_scenario_rs::{compare_scenarios, LoanInput, Money, Rate, ScenarioRules, SplitScenario};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(2025, 7, 1).ok_or("bad start date")?;
    let mortgage_rate = Rate::from_percent(dec!(5.85));
    let single = LoanInput::mortgage(Money::from_major(480_000), mortgage_rate, 30, start);
    let split = SplitScenario {
        primary: LoanInput::mortgage(Money::from_major(440_000), mortgage_rate, 30, start),
        secondary: LoanInput::personal_loan(
            Money::from_major(40_000),
            Rate::from_percent(dec!(8.5)),
            5,
            start,
        ),
    };

    let result = compare_scenarios(&single, &split, &ScenarioRules::default())?;

    for (label, run) in [("single loan", &result.single), ("split loans", &result.split)] {
        println!(
            "{}: interest {}, paid off {}",
            label,
            run.total_interest.round_dp(2),
            run.payoff_date
        );
    }
    println!("interest difference (split - single): {}", result.interest_delta.round_dp(2));

    println!("\nfirst year of combined repayments:");
    for period in result.split.periods.iter().take(12) {
        println!(
            "  {}  {:>10}  ({} loans)",
            period.date,
            period.payment.round_dp(2),
            period.active_loans
        );
    }

    let what_if = &result.what_if;
    println!("\nwhat if the extra cash went into the single loan instead?");
    println!("  redirected:          {}", what_if.redirected_cash.round_dp(2));
    println!("  interest vs split:   {} saved", what_if.interest_saved_vs_split.round_dp(2));
    println!("  months earlier:      {}", what_if.months_earlier_than_split);

    Ok(())
}
