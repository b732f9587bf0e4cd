//! Voucher calculator
//!
//! Reads one voucher, or an array of vouchers, as form JSON and prints the
//! computed line taxes and document totals as JSON.
//!
//! Usage:
//!   voucher-calc --input voucher.json --pretty
//!   cat vouchers.json | voucher-calc --strict

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voucher_core::voucher::{ValidationRules, Voucher, VoucherEngine, VoucherForm, validate};
use voucher_shared::{AppConfig, AppError, LoggingConfig};

#[derive(Parser)]
#[command(name = "voucher-calc", version, about = "Compute GST and totals for vouchers")]
struct Cli {
    /// Voucher JSON file; reads stdin when omitted or "-".
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Reject invalid vouchers instead of computing them as entered.
    #[arg(long)]
    strict: bool,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,
}

/// A single voucher or a batch.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Batch(Vec<VoucherForm>),
    Single(Box<VoucherForm>),
}

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
        error!("{err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(code);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = AppConfig::load()
        .map_err(AppError::from)
        .context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let raw = read_input(cli.input.as_deref())?;
    let payload = parse_payload(&raw)?;

    let engine = VoucherEngine::new(config.engine.clone());
    let rules = ValidationRules::from(&config.validation);

    let output = match payload {
        Payload::Single(form) => {
            let voucher = (*form).into_voucher();
            if cli.strict {
                check(&voucher, &rules, None)?;
            }
            to_json(&engine.compute(&voucher))?
        }
        Payload::Batch(forms) => {
            let vouchers: Vec<Voucher> = forms.into_iter().map(VoucherForm::into_voucher).collect();
            if cli.strict {
                for (index, voucher) in vouchers.iter().enumerate() {
                    check(voucher, &rules, Some(index))?;
                }
            }
            info!(count = vouchers.len(), "Computing batch");
            to_json(&engine.compute_batch(&vouchers))?
        }
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .map_err(|err| AppError::Internal(err.to_string()))?;
    println!("{rendered}");

    Ok(())
}

fn parse_payload(raw: &str) -> anyhow::Result<Payload> {
    serde_json::from_str(raw)
        .map_err(AppError::from)
        .context("Input is neither a voucher nor an array of vouchers")
}

fn to_json<T: serde::Serialize>(value: &T) -> anyhow::Result<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|err| anyhow::Error::new(AppError::Internal(err.to_string())))
}

fn check(voucher: &Voucher, rules: &ValidationRules, index: Option<usize>) -> anyhow::Result<()> {
    validate(voucher, rules).map_err(|err| {
        warn!(voucher = ?index, line = ?err.line(), code = err.error_code(), "Rejected voucher");
        let err = anyhow::Error::new(AppError::from(err));
        match index {
            Some(index) => err.context(format!("Voucher {} is invalid", index + 1)),
            None => err.context("Voucher is invalid"),
        }
    })
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|err| AppError::Input(err.to_string()))
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .map_err(|err| AppError::Input(err.to_string()))
                .context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}

fn init_tracing(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.filter.as_str().into());

    let json = config
        .json
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr));
    let plain = (!config.json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();
}
