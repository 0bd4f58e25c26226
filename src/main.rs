use cluster_address_plan::get_address_plan;
use cluster_address_plan::output::{plan_to_json, print_plan};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let config_file = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ADDRESS_PLAN_CONFIG").ok());

    let plan = get_address_plan(config_file.as_deref()).map_err(|e| {
        log::error!("Address plan resolution failed: {e}");
        e
    })?;

    match std::env::var("ADDRESS_PLAN_OUTPUT").as_deref() {
        Ok("json") => println!("{}", plan_to_json(&plan)?),
        _ => print_plan(&plan),
    }

    Ok(())
}
