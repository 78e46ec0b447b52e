//! garagepay: command-line front end for the incentive and cost
//! calculation engine.
//!
//! Loads backend-shaped JSON records from files, runs the same pure
//! calculations the admin UI runs, and prints results as JSON. Errors go
//! to stderr with a non-zero exit code.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use garagepay_engine::{aggregate, run_incentive, IncentivePolicy, ServiceOrder, StaffMetrics};

/// Incentive and service-cost calculation toolkit.
#[derive(Parser)]
#[command(name = "garagepay", version, about = "Staff incentive & service cost calculations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a formula expression against ad-hoc bindings
    Eval {
        /// The formula text, e.g. "baseRate * totalCreditPoints"
        formula: String,
        /// Variable bindings as name=value, repeatable
        #[arg(long = "bind", value_name = "NAME=VALUE")]
        bindings: Vec<String>,
    },

    /// Select the applicable policy and compute an incentive
    Incentive {
        /// Path to a JSON array of incentive policies
        #[arg(long)]
        policies: PathBuf,
        /// Path to a staff metrics JSON object
        #[arg(long)]
        metrics: PathBuf,
        /// Staff category ID
        #[arg(long)]
        category: String,
        /// Service type ID for multiplier resolution
        #[arg(long)]
        service_type: String,
        /// Calculation date (YYYY-MM-DD); defaults to today (UTC)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Aggregate a service order's item and order totals
    Costs {
        /// Path to a service order JSON file
        #[arg(long)]
        order: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval { formula, bindings } => cmd_eval(&formula, &bindings),
        Commands::Incentive {
            policies,
            metrics,
            category,
            service_type,
            as_of,
        } => cmd_incentive(&policies, &metrics, &category, &service_type, as_of.as_deref()),
        Commands::Costs { order } => cmd_costs(&order),
    };

    if let Err(msg) = result {
        eprintln!("error: {}", msg);
        process::exit(1);
    }
}

fn cmd_eval(formula: &str, raw_bindings: &[String]) -> Result<(), String> {
    let mut bindings = BTreeMap::new();
    for raw in raw_bindings {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("binding '{}' is not NAME=VALUE", raw))?;
        let value = Decimal::from_str(value.trim())
            .map_err(|_| format!("binding '{}' has a non-numeric value", raw))?;
        bindings.insert(name.trim().to_string(), value);
    }
    let result = garagepay_formula::evaluate(formula, &bindings).map_err(|e| e.to_string())?;
    println!("{}", result);
    Ok(())
}

fn cmd_incentive(
    policies_path: &Path,
    metrics_path: &Path,
    category: &str,
    service_type: &str,
    as_of: Option<&str>,
) -> Result<(), String> {
    let policies: Vec<IncentivePolicy> = load_json(policies_path)?;
    for (i, policy) in policies.iter().enumerate() {
        policy
            .validate()
            .map_err(|e| format!("policy [{}] '{}': {}", i, policy.name, e))?;
    }
    let metrics: StaffMetrics = load_json(metrics_path)?;
    let as_of = match as_of {
        Some(s) => parse_date(s)?,
        None => OffsetDateTime::now_utc().date(),
    };

    let breakdown = run_incentive(&policies, category, as_of, &metrics, service_type)
        .map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&breakdown)
        .map_err(|e| format!("serialization error: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn cmd_costs(order_path: &Path) -> Result<(), String> {
    let order: ServiceOrder = load_json(order_path)?;
    order.validate().map_err(|e| e.to_string())?;
    let breakdown = aggregate(&order.service_items).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&breakdown)
        .map_err(|e| format!("serialization error: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid JSON in {}: {}", path.display(), e))
}

fn parse_date(s: &str) -> Result<Date, String> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(s, &format).map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", s))
}
