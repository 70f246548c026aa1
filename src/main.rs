use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use u_tsp::aco::sweep::{sweep, SweepParameter};
use u_tsp::aco::{AcoConfig, AcoRunner, Graph, DEFAULT_WEIGHTS};
use u_tsp::dataset::{self, DEFAULT_MAX_COORDINATE};
use u_tsp::geometry::{explain_tour, polyline};
use u_tsp::partition::Partition;
use u_tsp::random::rng_from;
use u_tsp::report::{format_path, write_polyline, ReportLog};
use u_tsp::sa::{InitialTour, SaConfig, SaRunner, TemperatureSchedule};
use u_tsp::telemetry::LogTelemetry;
use u_tsp::City;

#[derive(Parser, Debug)]
#[command(about, version, author)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulated annealing over a city set, optionally split across trucks.
    Sa(SaArgs),
    /// Ant colony optimization over a weighted graph.
    Aco(AcoArgs),
    /// Colony confidence while varying one parameter.
    Sweep(SweepArgs),
    /// Write a random dataset file.
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug)]
struct SaArgs {
    /// Dataset file; cities are generated when omitted.
    #[arg(short = 'd', long)]
    dataset: Option<PathBuf>,
    /// Run the finite schedule instead of annealing until Ctrl+C.
    #[arg(short = 'n', long)]
    non_interactive: bool,
    /// Number of trucks sharing the tour.
    #[arg(short = 'k', long, default_value_t = 1)]
    trucks: usize,
    /// Number of generated cities.
    #[arg(short = 'r', long, default_value_t = 20)]
    cities: usize,
    /// Length of the finite schedule.
    #[arg(long, default_value_t = 100_000)]
    steps: usize,
    /// Random tours sampled to pick the starting tour.
    #[arg(long, default_value_t = 10_000)]
    samples: usize,
    /// Iterations between progress reports.
    #[arg(long, default_value_t = 5000)]
    report_interval: usize,
    #[arg(long)]
    seed: Option<u64>,
    /// CSV report log.
    #[arg(long, default_value = "report.csv")]
    report: PathBuf,
    /// Write the best tour as a closed x,y polyline.
    #[arg(long)]
    polyline: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct AcoArgs {
    /// Dataset file; Euclidean weights are used when given.
    #[arg(short = 'd', long)]
    dataset: Option<PathBuf>,
    /// Number of cities for a random-weight graph.
    #[arg(short = 'c', long, default_value_t = 5)]
    cities: usize,
    /// Edge count for a sparse random graph; complete graph when omitted.
    #[arg(long)]
    edges: Option<usize>,
    #[arg(short = 'a', long, default_value_t = 200)]
    ants: usize,
    #[arg(short = 'e', long, default_value_t = 0.7)]
    evaporation: f64,
    #[arg(short = 'i', long, default_value_t = 100)]
    iterations: usize,
    /// Probability of a random move.
    #[arg(long, default_value_t = 0.1)]
    eps: f64,
    /// Pheromone spread by each ant over its tour.
    #[arg(long, default_value_t = 100.0)]
    deposit: f64,
    #[arg(long)]
    seed: Option<u64>,
    /// CSV report log.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SweepKind {
    Ants,
    Evaporation,
    Cities,
    Edges,
    Iterations,
}

impl From<SweepKind> for SweepParameter {
    fn from(kind: SweepKind) -> Self {
        match kind {
            SweepKind::Ants => SweepParameter::Ants,
            SweepKind::Evaporation => SweepParameter::Evaporation,
            SweepKind::Cities => SweepParameter::Cities,
            SweepKind::Edges => SweepParameter::Edges,
            SweepKind::Iterations => SweepParameter::Iterations,
        }
    }
}

#[derive(clap::Args, Debug)]
struct SweepArgs {
    #[arg(value_enum)]
    parameter: SweepKind,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Number of cities.
    count: usize,
    #[arg(short = 'o', long, default_value = "dataset")]
    output: PathBuf,
    #[arg(long, default_value_t = DEFAULT_MAX_COORDINATE)]
    max_coordinate: u32,
    #[arg(long)]
    seed: Option<u64>,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Raises the returned flag on Ctrl+C.
fn stop_signal() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = flag.clone();
    ctrlc::set_handler(move || {
        warn!("interrupted, finishing the current iteration");
        handler_flag.store(true, Ordering::SeqCst);
    })
    .context("cannot install the Ctrl+C handler")?;
    Ok(flag)
}

fn load_or_generate(
    dataset: Option<&PathBuf>,
    count: usize,
    seed: Option<u64>,
) -> Result<Vec<City>> {
    match dataset {
        Some(path) => dataset::load_cities(path)
            .with_context(|| format!("cannot load dataset {}", path.display())),
        None => Ok(dataset::generate_cities(
            count,
            DEFAULT_MAX_COORDINATE,
            &mut rng_from(seed),
        )),
    }
}

fn run_sa(args: SaArgs) -> Result<()> {
    let cities = load_or_generate(args.dataset.as_ref(), args.cities, args.seed)?;

    let schedule = if args.non_interactive {
        info!("non-interactive run with a finite schedule");
        TemperatureSchedule::Finite { steps: args.steps }
    } else {
        info!("interactive run, press Ctrl+C when done");
        TemperatureSchedule::geometric()
    };
    let mut config = SaConfig::default()
        .with_schedule(schedule)
        .with_initial_tour(InitialTour::BestOfRandom {
            samples: args.samples,
        })
        .with_report_interval(args.report_interval);
    config.seed = args.seed;

    let cancel = stop_signal()?;
    let log = ReportLog::create_sa(&args.report)
        .with_context(|| format!("cannot create report {}", args.report.display()))?;
    let mut telemetry = (LogTelemetry, log);
    let result = SaRunner::run_with(&cities, &config, Some(cancel), &mut telemetry)?;
    telemetry.1.finish().context("cannot write the report")?;

    for leg in explain_tour(&result.best, &cities) {
        println!(
            "{} -> {}  \t(distance: {:10.4})\t From ({}, {}), To: ({}, {})",
            leg.from,
            leg.to,
            leg.distance,
            leg.from_point.x,
            leg.from_point.y,
            leg.to_point.x,
            leg.to_point.y
        );
    }
    println!("Best distance: {:.4}", result.best_length);

    if let Some(path) = &args.polyline {
        let file = File::create(path)
            .with_context(|| format!("cannot create polyline {}", path.display()))?;
        write_polyline(file, &polyline(&result.best, &cities))?;
    }

    if args.trucks > 1 {
        let partition = Partition::split(&result.best, &cities, args.trucks)?;
        let lengths = partition.route_lengths(&cities);
        for (truck, (route, length)) in partition.routes().iter().zip(lengths).enumerate() {
            println!(
                "Truck {}: {} (distance: {length:.4})",
                truck + 1,
                format_path(route)
            );
        }
    }
    Ok(())
}

fn run_aco(args: AcoArgs) -> Result<()> {
    let mut rng = rng_from(args.seed);
    let mut graph = match (&args.dataset, args.edges) {
        (Some(path), _) => Graph::from_cities(
            &dataset::load_cities(path)
                .with_context(|| format!("cannot load dataset {}", path.display()))?,
        ),
        (None, Some(m)) => Graph::random_sparse(args.cities, m, DEFAULT_WEIGHTS, &mut rng)?,
        (None, None) => Graph::complete_random(args.cities, DEFAULT_WEIGHTS, &mut rng)?,
    };

    let mut config = AcoConfig::default()
        .with_population(args.ants)
        .with_iterations(args.iterations)
        .with_evaporation_rate(args.evaporation)
        .with_eps(args.eps)
        .with_deposit(args.deposit);
    config.seed = args.seed;

    let cancel = stop_signal()?;
    let result = match &args.report {
        Some(path) => {
            let log = ReportLog::create_aco(path)
                .with_context(|| format!("cannot create report {}", path.display()))?;
            let mut telemetry = (LogTelemetry, log);
            let result =
                AcoRunner::run_with(&mut graph, &config, Some(cancel), &mut telemetry)?;
            telemetry.1.finish().context("cannot write the report")?;
            result
        }
        None => AcoRunner::run_with(&mut graph, &config, Some(cancel), &mut LogTelemetry)?,
    };

    println!(
        "Top Path = {} Confidence = {}",
        format_path(&result.path),
        result.confidence
    );
    if let Some(length) = result.length {
        println!("Path weight = {length}");
    }
    for view in graph.highlight(&result.path) {
        let e = view.edge;
        let mark = if view.on_path { "*" } else { " " };
        println!("{mark} ({}, {}) {} {:.6}", e.from, e.to, e.weight, e.pheromone);
    }
    Ok(())
}

fn run_sweep(args: SweepArgs) -> Result<()> {
    let mut base = AcoConfig::default();
    base.seed = args.seed;
    for point in sweep(args.parameter.into(), &base)? {
        println!(
            "{:>6} -> {:.3} ({})",
            point.value,
            point.confidence,
            format_path(&point.top_path)
        );
    }
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let cities =
        dataset::generate_cities(args.count, args.max_coordinate, &mut rng_from(args.seed));
    dataset::write_cities(&args.output, &cities)
        .with_context(|| format!("cannot write dataset {}", args.output.display()))?;
    info!(count = args.count, path = %args.output.display(), "dataset written");
    Ok(())
}

fn main() -> Result<()> {
    enable_tracing();
    match Cli::parse().command {
        Command::Sa(args) => run_sa(args),
        Command::Aco(args) => run_aco(args),
        Command::Sweep(args) => run_sweep(args),
        Command::Generate(args) => run_generate(args),
    }
}
