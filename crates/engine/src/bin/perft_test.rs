use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use engine::{perft_divide, run_position_tests, Position, PERFT_POSITIONS};
use tracing_subscriber::EnvFilter;

/// Count legal move tree nodes to validate move generation.
#[derive(Parser, Debug)]
#[command(name = "perft_test")]
struct Args {
    /// Position to split by root move; runs the reference suite when omitted
    #[arg(long)]
    fen: Option<String>,

    /// Maximum depth
    #[arg(long, default_value_t = 3)]
    depth: u32,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.fen {
        Some(fen) => divide(&fen, args.depth),
        None => run_suite(args.depth),
    }
}

fn divide(fen: &str, depth: u32) -> ExitCode {
    let position = match Position::from_fen(fen) {
        Ok(position) => position,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let start_time = Instant::now();
    let divide = perft_divide(&position, depth);
    for (mv, nodes) in &divide {
        println!("{}: {}", mv, nodes);
    }
    let total: u64 = if depth == 0 { 1 } else { divide.iter().map(|(_, nodes)| nodes).sum() };
    println!();
    println!("Nodes searched: {}", total);
    println!("Time: {:.3}s", start_time.elapsed().as_secs_f64());
    ExitCode::SUCCESS
}

fn run_suite(depth: u32) -> ExitCode {
    let mut all_passed = true;

    for test_case in PERFT_POSITIONS {
        let start_time = Instant::now();
        match run_position_tests(test_case, Some(depth)) {
            Ok(failures) if failures.is_empty() => {
                println!("PASS {} ({:.3}s)", test_case.name, start_time.elapsed().as_secs_f64());
            }
            Ok(failures) => {
                all_passed = false;
                for (depth, expected, actual) in failures {
                    println!("FAIL {} depth {}: expected {}, got {}", test_case.name, depth, expected, actual);
                }
            }
            Err(err) => {
                all_passed = false;
                println!("FAIL {}: {}", test_case.name, err);
            }
        }
    }

    if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
