//! # Cadence Host Daemon
//!
//! Main entry point for the Cadence host runtime.

use cadenced::{Runtime, RuntimeConfig};
use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });

    let mut runtime = Runtime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    if let Err(e) = runtime.run() {
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    }

    for snapshot in runtime.snapshots() {
        println!(
            "{} state={} ticks={}",
            snapshot.key, snapshot.state, snapshot.call_count
        );
    }
}

fn parse_args(args: &[String]) -> Result<RuntimeConfig, String> {
    let mut config = RuntimeConfig::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--slots" | "-n" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --slots".to_string());
                }
                config.slots = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid slot count: {}", args[i]))?;
            }
            "--period-ms" | "-p" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --period-ms".to_string());
                }
                config.period_ms = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid period: {}", args[i]))?;
            }
            "--ticks" | "-t" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --ticks".to_string());
                }
                config.ticks = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid tick count: {}", args[i]))?;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_usage(program: &str) {
    println!("Usage: {} [OPTIONS]", program);
    println!();
    println!("Options:");
    println!("  -n, --slots <N>       Number of timer slots (default: 1)");
    println!("  -p, --period-ms <MS>  Tick period in milliseconds (default: 1000)");
    println!("  -t, --ticks <N>       Periods to simulate before exiting (default: 10)");
    println!("  -h, --help            Show this help message");
}
