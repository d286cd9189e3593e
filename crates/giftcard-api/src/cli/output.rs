//! Output formatting for the giftcard CLI
//!
//! Table output is for people and uses color; JSON output is the engine's
//! own result types, identical to the HTTP response bodies.

use clap::ValueEnum;
use colored::Colorize;
use giftcard_core::{CardSchema, FormatReport, GeneratedCard, ValidationResult};
use serde::Serialize;
use std::io::{self, Write};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

fn mark(ok: bool) -> colored::ColoredString {
    if ok {
        "yes".green()
    } else {
        "no".red()
    }
}

/// Render the supported product names
pub fn render_products(names: &[&str], format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return render_json(names);
    }

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", "Supported Cards".cyan().bold())?;
    writeln!(stdout, "{}", "=".repeat(60))?;
    for (i, name) in names.iter().enumerate() {
        writeln!(stdout, "{:>3}. {}", i + 1, name)?;
    }
    writeln!(stdout)?;
    writeln!(stdout, "{} products", names.len())?;
    Ok(())
}

/// Render one product's format rule
pub fn render_schema(schema: &CardSchema, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return render_json(schema);
    }

    let lengths = |lengths: &[usize]| {
        lengths
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" or ")
    };

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", schema.name.cyan().bold())?;
    writeln!(stdout, "{}", "=".repeat(60))?;
    writeln!(stdout, "  {:<18} {}", "Voucher length:", lengths(schema.voucher_length.lengths()))?;
    writeln!(stdout, "  {:<18} {}", "PIN length:", lengths(schema.pin_length.lengths()))?;
    let prefix = if schema.prefix.is_empty() { "-" } else { schema.prefix };
    writeln!(stdout, "  {:<18} {}", "Prefix:", prefix)?;
    writeln!(stdout, "  {:<18} {}", "Luhn checksum:", mark(schema.requires_checksum))?;
    writeln!(stdout, "  {:<18} {}", "Voucher pattern:", schema.voucher_pattern.as_str().dimmed())?;
    writeln!(stdout, "  {:<18} {}", "PIN pattern:", schema.pin_pattern.as_str().dimmed())?;
    Ok(())
}

/// Render a generated batch
pub fn render_cards(cards: &[GeneratedCard], format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return render_json(cards);
    }

    let mut stdout = io::stdout();
    if let Some(first) = cards.first() {
        writeln!(stdout, "{}", first.card_name.cyan().bold())?;
    }
    writeln!(stdout, "{}", "=".repeat(60))?;
    writeln!(stdout, "  {:<24} {:<10} {}", "VOUCHER".bold(), "PIN".bold(), "GENERATED".bold())?;
    for card in cards {
        writeln!(
            stdout,
            "  {:<24} {:<10} {}",
            card.voucher,
            card.pin,
            card.generated_at.format("%Y-%m-%d %H:%M:%S %:z")
        )?;
    }
    writeln!(stdout)?;
    writeln!(stdout, "{} card(s) generated", cards.len())?;
    Ok(())
}

/// Render a validation result with its per-check breakdown
pub fn render_validation(
    result: &ValidationResult,
    report: &FormatReport,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return render_json(result);
    }

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", result.card_name.cyan().bold())?;
    writeln!(stdout, "{}", "=".repeat(60))?;
    writeln!(stdout, "  {:<18} {}", "Voucher:", result.voucher)?;
    writeln!(stdout, "  {:<18} {}", "PIN:", result.pin)?;
    writeln!(stdout, "  {:<18} {}", "Voucher format:", mark(report.voucher_matches))?;
    writeln!(stdout, "  {:<18} {}", "PIN format:", mark(report.pin_matches))?;
    if report.checksum_required {
        writeln!(stdout, "  {:<18} {}", "Luhn checksum:", mark(report.checksum_ok))?;
    }
    writeln!(stdout)?;

    let verdict = if result.valid {
        format!("VALID ({}%)", result.accuracy).green().bold()
    } else {
        format!("INVALID ({}%)", result.accuracy).red().bold()
    };
    writeln!(stdout, "{}", verdict)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_is_table() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("json", true).unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("yaml", true).is_err());
    }
}
