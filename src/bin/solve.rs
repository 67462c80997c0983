//! Command-line driver: load or generate an instance, run the requested
//! solvers, and report iterations, elapsed time, feasibility, objective, and
//! the route of each run.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};

use cvrp_search::constructive::random_route;
use cvrp_search::generator::{generate, GeneratorParams};
use cvrp_search::models::ProblemInstance;
use cvrp_search::persistence;
use cvrp_search::search::{SearchConfig, SearchEngine, Strategy};

#[derive(Parser)]
#[command(
    name = "solve",
    about = "Search for a minimum-distance delivery route on a CVRP instance"
)]
struct Args {
    /// Instance file to load; a fresh instance is generated when omitted.
    instance: Option<PathBuf>,

    /// Number of stores for a generated instance.
    #[arg(long, default_value_t = 6)]
    stores: usize,

    /// Vehicle capacity for a generated instance.
    #[arg(long, default_value_t = 50.0)]
    capacity: f64,

    /// Seed for instance generation and the random solver.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the instance (loaded or generated) to this path.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Solvers to run, in order. Defaults to all three strategies plus the
    /// random baseline.
    #[arg(long, value_enum, value_delimiter = ',')]
    solvers: Option<Vec<Solver>>,

    /// Cap on node expansions per search run.
    #[arg(long)]
    max_iterations: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Solver {
    DepthFirst,
    UniformCost,
    BestFirst,
    Random,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let instance = match obtain_instance(&args) {
        Ok(instance) => instance,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &args.save {
        if let Err(err) = persistence::save(&instance, path) {
            eprintln!("failed to save instance: {err}");
            return ExitCode::FAILURE;
        }
        println!("instance saved to {}", path.display());
    }

    println!(
        "instance: {} stores, capacity {}",
        instance.num_stores(),
        instance.capacity()
    );

    let solvers = args.solvers.clone().unwrap_or_else(|| {
        vec![
            Solver::DepthFirst,
            Solver::UniformCost,
            Solver::BestFirst,
            Solver::Random,
        ]
    });
    for solver in solvers {
        println!();
        run_solver(solver, &instance, &args);
    }

    ExitCode::SUCCESS
}

fn obtain_instance(args: &Args) -> Result<ProblemInstance, String> {
    match &args.instance {
        Some(path) => persistence::load(path)
            .map_err(|err| format!("failed to load {}: {err}", path.display())),
        None => {
            let params = GeneratorParams {
                number_of_stores: args.stores,
                vehicle_capacity: args.capacity,
                seed: args.seed,
                ..GeneratorParams::default()
            };
            generate(&params).map_err(|err| format!("failed to generate instance: {err}"))
        }
    }
}

fn run_solver(solver: Solver, instance: &ProblemInstance, args: &Args) {
    let strategy = match solver {
        Solver::DepthFirst => Strategy::DepthFirst,
        Solver::UniformCost => Strategy::UniformCost,
        Solver::BestFirst => Strategy::BestFirst,
        Solver::Random => {
            println!("random");
            let started = Instant::now();
            match random_route(instance, args.seed) {
                Ok(solution) => {
                    println!("  elapsed: {:?}", started.elapsed());
                    println!("  feasible: {}", instance.is_feasible(solution.route()));
                    println!("  objective: {}", instance.objective(solution.route()));
                    println!("  route: {solution}");
                }
                Err(err) => println!("  {err}"),
            }
            return;
        }
    };

    let config = SearchConfig {
        max_iterations: args.max_iterations,
        ..SearchConfig::default()
    };
    let engine = SearchEngine::with_config(strategy, config);

    println!("{}", strategy.name());
    let started = Instant::now();
    match engine.solve(instance) {
        Ok(outcome) => {
            println!("  iterations: {}", outcome.iterations);
            println!("  elapsed: {:?}", started.elapsed());
            if !outcome.complete {
                println!("  (stopped at the configured limit)");
            }
            let route = outcome.solution.route();
            println!("  feasible: {}", instance.is_feasible(route));
            println!("  objective: {}", instance.objective(route));
            println!("  route: {}", outcome.solution);
        }
        Err(err) => println!("  {err}"),
    }
}
