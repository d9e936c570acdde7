//! Energy savings simulator entry point: CLI wiring, config and catalog loading.

use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use energy_savings::catalog::Catalog;
use energy_savings::config::ServiceConfig;
use energy_savings::io::export::export_csv;
use energy_savings::report::{SimulationReport, StateRecord};
use energy_savings::simulation::simulate;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    state: Option<String>,
    consumption_kwh: Option<Decimal>,
    out: Option<PathBuf>,
    list_states: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: Option<u16>,
}

fn print_help() {
    eprintln!("energy-savings — regulated tariff vs. GD / free-market savings simulator");
    eprintln!();
    eprintln!("Usage: energy-savings [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load service configuration from TOML");
    eprintln!("  --catalog <path>         Load states and suppliers from a TOML catalog");
    eprintln!("  --list-states            Print the available states and tariffs");
    eprintln!("  --state <UF>             State to simulate (requires --consumption)");
    eprintln!("  --consumption <kWh>      Monthly consumption to simulate");
    eprintln!("  --out <path>             Export the simulated offers to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start the HTTP query API");
        eprintln!("  --port <u16>             API server port (default: from config, 8000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("Set RUST_LOG to control log verbosity (default: info).");
}

fn next_value<'a>(args: &'a [String], i: usize, flag: &str, expected: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v,
        None => {
            eprintln!("error: {flag} requires {expected}");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        catalog_path: None,
        state: None,
        consumption_kwh: None,
        out: None,
        list_states: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                let path = next_value(&args, i, "--config", "a path argument");
                cli.config_path = Some(PathBuf::from(path));
            }
            "--catalog" => {
                i += 1;
                let path = next_value(&args, i, "--catalog", "a path argument");
                cli.catalog_path = Some(PathBuf::from(path));
            }
            "--state" => {
                i += 1;
                cli.state = Some(next_value(&args, i, "--state", "a state code").to_string());
            }
            "--consumption" => {
                i += 1;
                let raw = next_value(&args, i, "--consumption", "a decimal argument");
                if let Ok(c) = Decimal::from_str(raw) {
                    cli.consumption_kwh = Some(c);
                } else {
                    eprintln!("error: --consumption value \"{raw}\" is not a valid decimal");
                    process::exit(1);
                }
            }
            "--out" => {
                i += 1;
                let path = next_value(&args, i, "--out", "a path argument");
                cli.out = Some(PathBuf::from(path));
            }
            "--list-states" => {
                cli.list_states = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = next_value(&args, i, "--port", "a u16 argument");
                if let Ok(p) = raw.parse::<u16>() {
                    cli.port = Some(p);
                } else {
                    eprintln!("error: --port value \"{raw}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.state.is_some() != cli.consumption_kwh.is_some() {
        eprintln!("error: --state and --consumption must be given together");
        process::exit(1);
    }
    if cli.out.is_some() && cli.state.is_none() {
        eprintln!("error: --out requires --state and --consumption");
        process::exit(1);
    }

    cli
}

fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: failed to install log subscriber: {e}");
    }
}

/// Runs one simulation, prints the report and optionally exports CSV.
fn run_simulation(
    catalog: &Catalog,
    config: &ServiceConfig,
    state: &str,
    consumption: Decimal,
    out: Option<&Path>,
) {
    if consumption > config.simulation.max_consumption_kwh {
        error!(
            "consumption {consumption} kWh exceeds the configured maximum of {} kWh",
            config.simulation.max_consumption_kwh
        );
        process::exit(1);
    }

    let Some(result) = simulate(catalog, state, consumption) else {
        println!("No savings simulation available for state \"{state}\" with {consumption} kWh.");
        return;
    };

    println!("{}", SimulationReport::from(&result));

    if let Some(path) = out {
        if let Err(e) = export_csv(&result, path) {
            error!("failed to write CSV: {e}");
            process::exit(1);
        }
        info!("offers written to {}", path.display());
    }
}

fn main() {
    init_logging();
    let cli = parse_args();

    // Load config: --config file, then built-in defaults
    let mut config = if let Some(ref path) = cli.config_path {
        match ServiceConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        }
    } else {
        ServiceConfig::default()
    };

    // Apply CLI overrides
    if let Some(path) = cli.catalog_path {
        config.catalog.path = Some(path);
    }
    #[cfg(feature = "api")]
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        process::exit(1);
    }

    let catalog = match config.load_catalog() {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };
    info!(
        states = catalog.list_states().len(),
        suppliers = catalog.suppliers().len(),
        "catalog loaded"
    );

    if cli.list_states {
        for s in catalog.list_states().iter().map(StateRecord::from) {
            println!("{}  {:<22} {} per kWh", s.code, s.name, s.base_tariff_per_kwh);
        }
    }

    if let (Some(state), Some(consumption)) = (cli.state.as_deref(), cli.consumption_kwh) {
        run_simulation(&catalog, &config, state, consumption, cli.out.as_deref());
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::{IpAddr, SocketAddr};
        use std::sync::Arc;

        let ip: IpAddr = match config.server.host.parse() {
            Ok(ip) => ip,
            Err(e) => {
                error!("invalid server.host \"{}\": {e}", config.server.host);
                process::exit(1);
            }
        };
        let addr = SocketAddr::new(ip, config.server.port);
        let state = Arc::new(energy_savings::api::AppState {
            catalog,
            max_consumption_kwh: config.simulation.max_consumption_kwh,
        });
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            error!("failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(energy_savings::api::serve(
            state,
            addr,
            config.server.permissive_cors,
        )) {
            error!("server error: {e}");
            process::exit(1);
        }
    }
}
