//! valuation-recon CLI
//!
//! Reconcile a valuation run from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Reconcile a run held in a JSON file
//! valuation-recon reconcile --input run.json
//!
//! # Output as JSON
//! valuation-recon reconcile --input run.json --format json
//!
//! # Supply external model prices for zero-priced corporate bonds
//! valuation-recon reconcile --input run.json --model prices.json
//!
//! # Generate a synthetic run for testing
//! valuation-recon generate --instruments 100 --output run.json
//! ```

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs;
use std::process;
use valuation_recon::core::isin::Isin;
use valuation_recon::core::run::ValuationRun;
use valuation_recon::recon::corporate::StaticPriceModel;
use valuation_recon::recon::orchestrator::{run_reconciliation, RunManifest};
use valuation_recon::simulation::synthetic::{generate_run, RunConfig};

fn print_usage() {
    eprintln!(
        r#"valuation-recon — market-data cross-checking for securities valuation runs

USAGE:
    valuation-recon <COMMAND> [OPTIONS]

COMMANDS:
    reconcile   Cross-check a valuation run against its market sources
    generate    Generate a synthetic valuation run (for testing)
    help        Show this message

OPTIONS (reconcile):
    --input <FILE>      Path to JSON valuation run file
    --format <FORMAT>   Output format: text (default) or json
    --model <FILE>      JSON map of ISIN to model price, used for
                        zero-priced corporate bonds

OPTIONS (generate):
    --instruments <N>      Reference rows per category (default: 50)
    --mismatch-rate <F>    Fraction priced out of tolerance (default: 0.05)
    --missing-rate <F>     Fraction left uncorroborated (default: 0.02)
    --output <FILE>        Write to file instead of stdout

EXAMPLES:
    valuation-recon reconcile --input run.json
    valuation-recon reconcile --input run.json --format json
    valuation-recon reconcile --input run.json --model prices.json
    valuation-recon generate --instruments 200 --output run.json
    valuation-recon generate --mismatch-rate 0.2 --missing-rate 0.1"#
    );
}

fn load_run(path: &str) -> ValuationRun {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "run_id": "00000000-0000-0000-0000-000000000000",
  "reference": [
    {{ "isin": "INE000A01001", "category": "EQUITY SHARES", "market_price": "101.25" }}
  ],
  "nse": [
    {{ "isin": "INE000A01001", "settlement_price": "101.10" }}
  ]
}}"#
        );
        process::exit(1);
    })
}

fn load_model(path: &str) -> StaticPriceModel {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let prices: HashMap<String, Decimal> = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(r#"{{ "INE001B07019": "96.85", "INE002C07024": "101.10" }}"#);
        process::exit(1);
    });

    prices
        .into_iter()
        .map(|(isin, price)| (Isin::new(isin), price))
        .collect()
}

fn cmd_reconcile(args: &[String]) {
    let mut input_path = None;
    let mut model_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--model" => {
                i += 1;
                model_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--model requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let run = load_run(&path);
    let model = match model_path {
        Some(path) => load_model(&path),
        None => StaticPriceModel::new(),
    };

    let manifest = RunManifest::from_store(&run).unwrap_or_else(|e| {
        eprintln!("Error reading run data: {}", e);
        process::exit(1);
    });
    let report = run_reconciliation(&run, &manifest, &model).unwrap_or_else(|e| {
        eprintln!("Error during reconciliation: {}", e);
        process::exit(1);
    });

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        println!("{}", report);
    }
}

fn cmd_generate(args: &[String]) {
    let mut instruments = 50usize;
    let mut mismatch_rate = 0.05f64;
    let mut missing_rate = 0.02f64;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--instruments" => {
                i += 1;
                instruments = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--instruments requires a number");
                    process::exit(1);
                });
            }
            "--mismatch-rate" => {
                i += 1;
                mismatch_rate = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--mismatch-rate requires a fraction between 0 and 1");
                    process::exit(1);
                });
            }
            "--missing-rate" => {
                i += 1;
                missing_rate = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--missing-rate requires a fraction between 0 and 1");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = RunConfig {
        instruments_per_category: instruments,
        mismatch_rate,
        missing_rate,
        ..RunConfig::default()
    };
    let run = generate_run(&config);
    let json = serde_json::to_string_pretty(&run).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated run {} with {} reference rows → {}",
            run.run_id(),
            run.reference().len(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "reconcile" => cmd_reconcile(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
