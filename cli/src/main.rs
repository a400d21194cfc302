use anyhow::{Context, Result};
use clap::{arg, ArgMatches, Command};
use delivery_simulator_core_rs::{
    ErrorClass, JsonFileStore, RecordStore, SimulationError, SimulationRequest, SimulationRules,
    Simulator,
};
use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("fleet-sim")
        .about("Simulates delivery fleet allocation and economics")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("simulate")
                .about("Runs a simulation and writes final driver hours back to the dataset")
                .arg(
                    arg!(<DATA> "Path to the dataset json file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--drivers [N] "Number of drivers to use")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(arg!(--"start-time" [HHMM] "Shift start time, HH:MM"))
                .arg(
                    arg!(--"max-hours" [HOURS] "Per-driver hour cap, 0 < hours <= 24")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--rules [PATH] "Optional rules json file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(arg!(--"dry-run" "Compute KPIs without writing driver hours")),
        )
        .subcommand(
            Command::new("validate")
                .about("Loads every record of a dataset and reports counts")
                .arg(
                    arg!(<DATA> "Path to the dataset json file")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let outcome = match matches.subcommand() {
        Some(("simulate", sub)) => simulate(sub),
        Some(("validate", sub)) => validate(sub).map_err(Failure::Other),
        _ => unreachable!("subcommand required"),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Simulation(err)) => {
            let body = serde_json::to_string_pretty(&err.to_response())
                .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err));
            println!("{body}");
            ExitCode::from(exit_code(err.class()))
        }
        Err(Failure::Other(err)) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn exit_code(class: ErrorClass) -> u8 {
    match class {
        ErrorClass::BadRequest => 2,
        ErrorClass::NotFound => 3,
        ErrorClass::Internal => 1,
    }
}

enum Failure {
    Simulation(SimulationError),
    Other(anyhow::Error),
}

fn simulate(matches: &ArgMatches) -> Result<(), Failure> {
    let request = SimulationRequest {
        drivers: matches.get_one::<f64>("drivers").copied(),
        start_time: matches.get_one::<String>("start-time").cloned(),
        max_hours: matches.get_one::<f64>("max-hours").copied(),
    };
    // Reject bad parameters before touching the dataset
    request.validate().map_err(Failure::Simulation)?;

    let rules = match matches.get_one::<PathBuf>("rules") {
        Some(path) => load_rules(path).map_err(Failure::Other)?,
        None => SimulationRules::default(),
    };

    let data = matches
        .get_one::<PathBuf>("DATA")
        .ok_or_else(|| Failure::Other(anyhow::anyhow!("DATA is required")))?;
    let store = JsonFileStore::open(data).map_err(|e| Failure::Simulation(e.into()))?;
    tracing::debug!(path = %data.display(), "dataset opened");
    let simulator = Simulator::with_rules(store, rules).map_err(Failure::Simulation)?;

    let report = if matches.get_flag("dry-run") {
        simulator.preview(&request)
    } else {
        simulator.run(&request)
    }
    .map_err(Failure::Simulation)?;

    let body = serde_json::to_string_pretty(&report.result)
        .map_err(|e| Failure::Other(e.into()))?;
    println!("{body}");
    Ok(())
}

fn load_rules(path: &Path) -> Result<SimulationRules> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse rules file {}", path.display()))
}

fn validate(matches: &ArgMatches) -> Result<()> {
    let data = matches
        .get_one::<PathBuf>("DATA")
        .context("DATA is required")?;
    let store = JsonFileStore::open(data)?;
    let orders = store.fetch_orders()?;
    let drivers = store.fetch_drivers()?;
    let routes = store.fetch_routes()?;
    println!(
        "{}",
        serde_json::json!({
            "orders": orders.len(),
            "drivers": drivers.len(),
            "routes": routes.len(),
        })
    );
    Ok(())
}
