//! CLI command definitions for the giftcard tool

use clap::{Parser, Subcommand};
use giftcard_core::{check_count, CardEngine};
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;

use super::output::{self, OutputFormat};
use super::ExitCode;
use crate::config::{LogFormat, ServerConfig};

/// Gift card format tool
///
/// Generate synthetic gift card numbers that follow each product's public
/// format, validate a voucher and pin against those rules, or run the HTTP
/// server.
#[derive(Parser, Debug)]
#[command(name = "giftcard")]
#[command(about = "Gift card format tool - Generate and validate synthetic card numbers", long_about = None)]
#[command(version)]
pub struct GiftcardCli {
    #[command(subcommand)]
    pub command: GiftcardCommands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum GiftcardCommands {
    /// Run the HTTP server
    Serve {
        /// Path to a TOML configuration file
        #[arg(short, long, env = "GIFTCARD_CONFIG")]
        config: Option<PathBuf>,

        /// Address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Log output format
        #[arg(long, value_enum)]
        log_format: Option<LogFormat>,

        /// Default log filter when RUST_LOG is unset
        #[arg(long)]
        log_level: Option<String>,
    },

    /// List supported card products
    List {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one product's format rule
    Show {
        /// Exact product name, e.g. "Costco Shop Card"
        #[arg(short, long)]
        card: String,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Generate synthetic cards for a product
    Generate {
        /// Exact product name
        #[arg(short, long)]
        card: String,

        /// Number of cards (1 to 1000)
        #[arg(short = 'n', long, default_value_t = 1, allow_negative_numbers = true)]
        count: i64,

        /// Seed for a reproducible batch
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Validate a voucher and pin against a product's format
    ///
    /// Exits with code 1 when the card does not conform.
    Validate {
        /// Exact product name
        #[arg(short, long)]
        card: String,

        #[arg(long)]
        voucher: String,

        #[arg(long)]
        pin: String,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

/// Resolve server configuration from file, environment and flags
pub fn resolve_server_config(
    config: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    log_format: Option<LogFormat>,
    log_level: Option<String>,
) -> anyhow::Result<ServerConfig> {
    let mut resolved = ServerConfig::load(config.as_deref())?;

    if let Some(host) = host {
        resolved.host = host;
    }
    if let Some(port) = port {
        resolved.port = port;
    }
    if let Some(format) = log_format {
        resolved.log_format = format;
    }
    if let Some(level) = log_level {
        resolved.log_level = level;
    }

    Ok(resolved)
}

/// Execute the list command
pub fn execute_list(engine: &CardEngine<'_>, format: OutputFormat) -> anyhow::Result<ExitCode> {
    output::render_products(&engine.list_products(), format)?;
    Ok(ExitCode::Success)
}

/// Execute the show command
pub fn execute_show(
    engine: &CardEngine<'_>,
    card: &str,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let schema = engine.catalog().lookup(card)?;
    output::render_schema(schema, format)?;
    Ok(ExitCode::Success)
}

/// Execute the generate command
pub fn execute_generate(
    engine: &CardEngine<'_>,
    card: &str,
    count: i64,
    seed: Option<u64>,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let count = check_count(count)?;

    let cards = match seed {
        Some(seed) => engine.generate_with(card, count, &mut StdRng::seed_from_u64(seed))?,
        None => engine.generate(card, count)?,
    };

    output::render_cards(&cards, format)?;
    Ok(ExitCode::Success)
}

/// Execute the validate command
pub fn execute_validate(
    engine: &CardEngine<'_>,
    card: &str,
    voucher: &str,
    pin: &str,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let (result, report) = engine.validate_with_report(card, voucher, pin)?;

    output::render_validation(&result, &report, format)?;

    Ok(if result.valid {
        ExitCode::Success
    } else {
        ExitCode::ValidationFailed
    })
}
