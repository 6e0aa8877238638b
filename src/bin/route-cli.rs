//! Route table tooling that runs without a server.
//!
//! - `check <config>`: validate a route table and print the compiled routes
//! - `resolve <config> <method> <path>`: show which route a request would hit
//! - `test <pattern> <candidate>...`: match raw candidates against one pattern
//!
//! Exits non-zero when the route table is invalid or `resolve` finds no
//! route, so it can gate a deploy script.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use ant_router::config::{load_config, ConfigError};
use ant_router::pattern::Pattern;
use ant_router::routing::Router;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Offline tooling for Ant-style route tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a route table and print the compiled routes
    Check {
        config: PathBuf,
    },
    /// Resolve a request against a route table
    Resolve {
        config: PathBuf,
        method: String,
        path: String,
    },
    /// Test raw candidates against a single pattern
    Test {
        pattern: String,
        #[arg(required = true)]
        candidates: Vec<String>,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let Some(router) = load_router(&config) else {
                return Ok(ExitCode::FAILURE);
            };
            println!("{}", serde_json::to_string_pretty(router.routes())?);
        }
        Commands::Resolve {
            config,
            method,
            path,
        } => {
            let Some(router) = load_router(&config) else {
                return Ok(ExitCode::FAILURE);
            };
            match router.resolve(&method, &path) {
                Some(route) => println!("{}", serde_json::to_string_pretty(route)?),
                None => {
                    eprintln!("no route matched");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Test {
            pattern,
            candidates,
        } => {
            let pattern = Pattern::compile(pattern);
            for candidate in candidates {
                println!("{}\t{}", pattern.matches(&candidate), candidate);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_router(path: &Path) -> Option<Router> {
    match load_config(path) {
        Ok(config) => Some(Router::from_config(&config.routes)),
        Err(ConfigError::Validation(errors)) => {
            eprintln!("Error: {} invalid route table", path.display());
            for error in errors {
                eprintln!("  - {}", error);
            }
            None
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}
