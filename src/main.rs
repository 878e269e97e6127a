//! Program search CLI - Run searches from JSON configuration.

use std::fs;
use std::path::PathBuf;

use stack_evolve::{
    schema::{RunConfig, sum_product_suite},
    search::{DEFAULT_RANDOM_ATTEMPTS, SearchEngine, SearchOutcome, SearchPhase, random_search},
    vm::disassemble,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [strategy] [attempts]", args[0]);
        eprintln!();
        eprintln!("Search for a stack program reproducing the configured test suite.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to run configuration file");
        eprintln!("  strategy     'mutation' (default) or 'random'");
        eprintln!(
            "  attempts     Attempt budget for the random strategy (default: {})",
            DEFAULT_RANDOM_ATTEMPTS
        );
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");

        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let strategy = args.get(2).map(String::as_str).unwrap_or("mutation");
    let attempts: usize = args
        .get(3)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RANDOM_ATTEMPTS);

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let run: RunConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    println!("Stack Program Search");
    println!("====================");
    println!("Test cases: {}", run.suite.len());
    println!("Population: {}", run.search.population_size);
    println!("Generations: {}", run.search.generation_count);
    println!("Max genome length: {}", run.search.genome.max_length);
    match run.search.random_seed {
        Some(seed) => println!("Seed: {}", seed),
        None => println!("Seed: entropy"),
    }
    println!();

    let report_every = (run.search.generation_count / 10).max(1);

    let result = match strategy {
        "mutation" => {
            let mut engine = SearchEngine::new(run.search, run.suite).unwrap_or_else(|e| {
                eprintln!("Invalid configuration: {}", e);
                std::process::exit(1);
            });

            println!("Running mutation search...");
            engine.run_with_callback(|progress| {
                if progress.phase == SearchPhase::Evaluating
                    && progress.generation % report_every == 0
                {
                    println!(
                        "  Generation {}/{}: {} evaluations",
                        progress.generation, progress.total_generations, progress.evaluations
                    );
                }
            })
        }
        "random" => {
            println!("Running random search ({} attempts)...", attempts);
            random_search(&run.search, &run.suite, attempts).unwrap_or_else(|e| {
                eprintln!("Invalid configuration: {}", e);
                std::process::exit(1);
            })
        }
        other => {
            eprintln!("Unknown strategy '{}', expected 'mutation' or 'random'", other);
            std::process::exit(1);
        }
    };

    println!();
    match &result.outcome {
        SearchOutcome::Found {
            program,
            generation,
        } => {
            println!("Program found at generation {}:", generation);
            println!("  {}", disassemble(program));
        }
        SearchOutcome::Exhausted => {
            println!("No program found within budget.");
        }
    }
    println!();
    println!("Generations run: {}", result.stats.generations);
    println!("Evaluations: {}", result.stats.evaluations);
    println!("Replacements: {}", result.stats.replacements);
    println!(
        "Time: {:.2}s ({:.0} evaluations/s)",
        result.stats.elapsed_seconds,
        result.stats.evaluations as f64 / result.stats.elapsed_seconds.max(1e-9)
    );
}

fn print_example_config() {
    let run = RunConfig {
        search: Default::default(),
        suite: sum_product_suite(),
    };

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&run).unwrap());
}
