/// quick start - one mortgage, no surprises
use loan_scenario_rs::{generate_schedule, LoanInputBuilder, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // $500,000 over 30 years at 6%, starting today
    let loan = LoanInputBuilder::new()
        .amount(Money::from_major(500_000))
        .rate(Rate::from_percentage(6))
        .term_years(30)
        .build()?;

    let schedule = generate_schedule(&loan, &[], &[])?;
    let summary = &schedule.summary;

    println!("monthly repayment: {}", summary.regular_payment.round_dp(2));
    println!("total interest:    {}", summary.total_interest.round_dp(2));
    println!("paid off on:       {}", summary.payoff_date);

    for period in schedule.periods.iter().take(3) {
        println!(
            "#{:<3} {}  interest {:>10}  principal {:>10}  balance {:>12}",
            period.index,
            period.date,
            period.interest_charged.round_dp(2),
            period.principal_paid.round_dp(2),
            period.closing_balance.round_dp(2)
        );
    }

    Ok(())
}
