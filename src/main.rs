use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use atmoshield::{
    model::SimulationInput,
    neo,
    scenario::{Scenario, ScenarioLoader},
    web::{self, WebServerConfig},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Asteroid airburst impact simulator")]
struct Cli {
    /// Logging verbosity (overrides the scenario's logging.level)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct ScenarioArgs {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/impactor_2025.yaml")]
    scenario: PathBuf,

    /// Directory for JSON run reports
    #[arg(long, default_value = "reports")]
    report_dir: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Simulate the scenario impactor once and print the summary
    Run {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Override impactor diameter (m)
        #[arg(long)]
        diameter: Option<f64>,

        /// Override entry velocity (km/s)
        #[arg(long)]
        velocity: Option<f64>,

        /// Override entry angle (degrees)
        #[arg(long)]
        angle: Option<f64>,

        /// Print the full report as JSON instead of the share text
        #[arg(long)]
        json: bool,
    },
    /// Simulate every hazardous candidate in a saved NEO feed document
    Neo {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// NeoWs feed JSON file
        #[arg(long)]
        feed: PathBuf,

        /// Entry angle used for every candidate (degrees)
        #[arg(long, default_value_t = 45.0)]
        angle: f64,
    },
    /// Print the date windows a NEO feed should be fetched for
    Windows {
        /// First day of the first window (defaults to today)
        #[arg(long)]
        from: Option<NaiveDate>,
    },
    /// Serve the simulation over HTTP
    Serve {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Optional NeoWs feed JSON file exposed as candidates
        #[arg(long)]
        feed: Option<PathBuf>,

        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");

    match cli.command {
        Commands::Run {
            scenario: args,
            diameter,
            velocity,
            angle,
            json,
        } => {
            let scenario = loader.load(&args.scenario)?;
            init_logging(cli.log_level.as_deref(), &scenario)?;

            let base = &scenario.impactor;
            let input = SimulationInput::new(
                diameter.unwrap_or(base.diameter_m),
                velocity.unwrap_or(base.velocity_km_s),
                angle.unwrap_or(base.angle_deg),
            )?;
            let mut engine = scenario.build_engine(args.report_dir);
            let report = engine.run(&input, &base.identity())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.share_text());
                println!(
                    "{}",
                    report.summary.headline(engine.config().damage_threshold_psi)
                );
            }
        }
        Commands::Neo {
            scenario: args,
            feed,
            angle,
        } => {
            let scenario = loader.load(&args.scenario)?;
            init_logging(cli.log_level.as_deref(), &scenario)?;

            let records = load_candidates(&feed)?;
            if records.is_empty() {
                info!("no hazardous candidates between 10 and 100 m in feed");
                return Ok(());
            }

            let mut runs = Vec::with_capacity(records.len());
            for record in &records {
                match record.simulation_input(angle) {
                    Ok(input) => runs.push((input, record.identity())),
                    Err(err) => warn!(id = %record.id, error = %err, "candidate rejected"),
                }
            }

            let mut engine = scenario.build_engine(args.report_dir);
            engine.run_with_hook(runs, |report| {
                println!(
                    "{:<28} {:>6.1} m {:>5.1} km/s  {:>8.2} Mt  torino {}  ≈{}  {}±",
                    report.impactor.name,
                    report.input.diameter_m(),
                    report.input.velocity_km_s(),
                    report.outcome.airburst.energy_megatons,
                    report.outcome.hazard.level,
                    atmoshield::report::format_usd(report.outcome.impact.estimated_damage_usd),
                    report.outcome.impact.estimated_fatalities,
                );
            })?;
        }
        Commands::Windows { from } => {
            let today = from.unwrap_or_else(|| chrono::Local::now().date_naive());
            for window in neo::search_windows(today) {
                println!("{} {}", window.start_date, window.end_date);
            }
        }
        Commands::Serve {
            scenario: args,
            feed,
            host,
            port,
        } => {
            let scenario = loader.load(&args.scenario)?;
            init_logging(cli.log_level.as_deref(), &scenario)?;

            let candidates = match feed {
                Some(path) => load_candidates(&path)?,
                None => Vec::new(),
            };
            let engine = scenario.build_engine(args.report_dir);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(web::run(WebServerConfig {
                engine,
                candidates,
                host,
                port,
            }))?;
        }
    }

    Ok(())
}

fn load_candidates(path: &Path) -> Result<Vec<neo::NeoRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read NEO feed {}", path.display()))?;
    let records = neo::dedup(neo::parse_feed(&text)?);
    info!(count = records.len(), "loaded NEO candidates");
    Ok(records)
}

fn init_logging(cli_level: Option<&str>, scenario: &Scenario) -> Result<()> {
    let requested = cli_level.unwrap_or(scenario.logging.level.as_str());
    let level = match requested.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
