//! TradeSignal CLI: execute strategy requests from JSON.
//!
//! Commands:
//! - `execute`: run one request (file or stdin) and print the result
//! - `batch`: run a JSONL file of requests in parallel, one result per line
//! - `strategies`: print the strategy catalog
//! - `status`: print the service status
//! - `portfolio value|return`: portfolio utilities
//!
//! Stdout carries JSON only; logs go to stderr (`RUST_LOG`, default `info`).
//! Request errors print `{error, message, details}` and exit with code 2.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde_json::{json, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tradesignal_core::{
    execute, portfolio_return, portfolio_value, service_status, strategy_catalog, EngineConfig,
    EngineError, ExecutionResult, PortfolioSnapshot, StrategyRequest,
};

/// Exit code for requests the engine rejected.
const EXIT_REQUEST_ERROR: i32 = 2;

#[derive(Parser)]
#[command(
    name = "tradesignal",
    about = "TradeSignal CLI: long-only signal generation and order sizing"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one strategy request and print the result as JSON.
    Execute {
        /// Request JSON file. Reads stdin when omitted or `-`.
        #[arg(long)]
        request: Option<PathBuf>,

        /// Engine config (TOML). Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also report portfolio value and return after the trade.
        #[arg(long, default_value_t = false)]
        portfolio: bool,
    },
    /// Execute every request in a JSONL file, in parallel, preserving order.
    Batch {
        /// One JSON request per line; blank lines are skipped.
        #[arg(long)]
        input: PathBuf,

        /// Engine config (TOML). Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the available strategies and their parameters.
    Strategies,
    /// Print the service status.
    Status,
    /// Portfolio utilities.
    Portfolio {
        #[command(subcommand)]
        action: PortfolioAction,
    },
}

#[derive(Subcommand)]
enum PortfolioAction {
    /// cash + position * price
    Value {
        #[arg(long)]
        position: f64,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        cash: f64,
    },
    /// (value - initial_capital) / initial_capital
    Return {
        #[arg(long)]
        position: f64,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        cash: f64,
        #[arg(long)]
        initial_capital: f64,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Execute {
            request,
            config,
            portfolio,
        } => run_execute(request.as_deref(), config.as_deref(), portfolio),
        Commands::Batch { input, config } => run_batch(&input, config.as_deref()),
        Commands::Strategies => print_json(&json!({ "strategies": strategy_catalog() })),
        Commands::Status => print_json(&serde_json::to_value(service_status())?),
        Commands::Portfolio { action } => match action {
            PortfolioAction::Value {
                position,
                price,
                cash,
            } => print_json(&json!({ "value": portfolio_value(position, price, cash) })),
            PortfolioAction::Return {
                position,
                price,
                cash,
                initial_capital,
            } => print_json(&json!({
                "return": portfolio_return(position, price, cash, initial_capital)
            })),
        },
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading engine config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    info!(fingerprint = %config.fingerprint(), "engine config loaded");
    Ok(config)
}

fn read_request_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading request from {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading request from stdin")?;
            Ok(text)
        }
    }
}

fn run_execute(request: Option<&Path>, config: Option<&Path>, portfolio: bool) -> Result<()> {
    let config = load_config(config)?;
    let text = read_request_text(request)?;

    match evaluate(&text, &config) {
        Ok((request, result)) => {
            let mut body = serde_json::to_value(&result)?;
            if portfolio {
                let market = request.market();
                let snapshot = PortfolioSnapshot::from_result(
                    &result,
                    market.current_price,
                    market.initial_capital,
                );
                body["portfolio"] = serde_json::to_value(snapshot)?;
            }
            print_json(&body)
        }
        Err(err) => {
            warn!(code = err.error_code(), "request rejected: {err}");
            print_json(&err.to_json())?;
            std::process::exit(EXIT_REQUEST_ERROR);
        }
    }
}

fn run_batch(input: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading batch input from {}", input.display()))?;

    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let outputs = evaluate_batch(&lines, &config);

    let failed = outputs.iter().filter(|v| v.get("error").is_some()).count();
    info!(requests = outputs.len(), failed, "batch complete");

    for output in &outputs {
        println!("{}", serde_json::to_string(output)?);
    }
    Ok(())
}

/// Decode and execute one request.
fn evaluate(
    text: &str,
    config: &EngineConfig,
) -> std::result::Result<(StrategyRequest, ExecutionResult), EngineError> {
    let request = StrategyRequest::from_json(text)?;
    let result = execute(&request, config)?;
    Ok((request, result))
}

/// Evaluate independent requests in parallel; output order matches input order.
fn evaluate_batch(lines: &[&str], config: &EngineConfig) -> Vec<Value> {
    lines
        .par_iter()
        .map(|line| match evaluate(line, config) {
            Ok((_, result)) => serde_json::to_value(&result)
                .unwrap_or_else(|e| json!({ "error": "SERIALIZATION_ERROR", "message": e.to_string() })),
            Err(err) => err.to_json(),
        })
        .collect()
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
