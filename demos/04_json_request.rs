/// json request - drive the engine from a json document
use loan_scenario_rs::ScheduleRequest;

const REQUEST: &str = r#"{
    "loan": {
        "principal": "350000",
        "annual_rate": "0.0549",
        "term_years": 30,
        "frequency": "fortnightly",
        "repayment_type": "principal_and_interest",
        "strategy": "reduce_repayment",
        "start_date": "2025-02-01"
    },
    "extra_repayments": [
        {"kind": "monthly", "start_period": 0, "amount": "300"},
        {"kind": "custom", "interval_months": 26, "start_period": 26, "amount": "2000"}
    ],
    "rate_changes": [
        {"period": 52, "annual_rate": "0.0599"}
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let request = ScheduleRequest::from_json(REQUEST)?;
    let schedule = request.run()?;

    println!("{}", serde_json::to_string_pretty(&schedule.summary)?);
    println!("{} events recorded", schedule.events.len());

    Ok(())
}
