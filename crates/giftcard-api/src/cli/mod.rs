//! CLI module for the giftcard tool
//!
//! Lists products, shows a product's format rule, generates and validates
//! cards from the command line, and starts the HTTP server.

pub mod commands;
pub mod output;

pub use commands::{GiftcardCli, GiftcardCommands};
pub use output::OutputFormat;

use giftcard_core::{CardEngine, CardError};

use crate::config::LogFormat;
use crate::{logging, server};

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution
    Success = 0,
    /// The validated card does not conform to its format
    ValidationFailed = 1,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// Unknown card product
    NotFound = 4,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Exit code for a failed command
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<CardError>() {
            Some(CardError::NotFound(_)) => ExitCode::NotFound,
            Some(CardError::InvalidArgument(_)) => ExitCode::InvalidInput,
            None if err.downcast_ref::<crate::config::ConfigError>().is_some() => {
                ExitCode::InvalidInput
            }
            None => ExitCode::InternalError,
        }
    }
}

/// Run the CLI and return its exit code
pub async fn run(cli: GiftcardCli) -> ExitCode {
    match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from_error(&e)
        }
    }
}

async fn execute(cli: GiftcardCli) -> anyhow::Result<ExitCode> {
    match cli.command {
        GiftcardCommands::Serve {
            config,
            host,
            port,
            log_format,
            log_level,
        } => {
            let config =
                commands::resolve_server_config(config, host, port, log_format, log_level)?;
            logging::init(&config.log_level, config.log_format)?;
            server::serve(config).await?;
            Ok(ExitCode::Success)
        }
        GiftcardCommands::List { format } => commands::execute_list(&local_engine()?, format),
        GiftcardCommands::Show { card, format } => {
            commands::execute_show(&local_engine()?, &card, format)
        }
        GiftcardCommands::Generate {
            card,
            count,
            seed,
            format,
        } => commands::execute_generate(&local_engine()?, &card, count, seed, format),
        GiftcardCommands::Validate {
            card,
            voucher,
            pin,
            format,
        } => commands::execute_validate(&local_engine()?, &card, &voucher, &pin, format),
    }
}

/// Engine for one-shot commands; logs only warnings so stdout stays clean
fn local_engine() -> anyhow::Result<CardEngine<'static>> {
    logging::init("warn", LogFormat::Pretty)?;
    Ok(CardEngine::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_conversion() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::ValidationFailed), 1);
        assert_eq!(i32::from(ExitCode::InvalidInput), 3);
        assert_eq!(i32::from(ExitCode::NotFound), 4);
        assert_eq!(i32::from(ExitCode::InternalError), 10);
    }

    #[test]
    fn test_exit_code_from_error() {
        let err = anyhow::Error::from(CardError::not_found("Gold"));
        assert_eq!(ExitCode::from_error(&err), ExitCode::NotFound);

        let err = anyhow::Error::from(CardError::invalid_argument("count"));
        assert_eq!(ExitCode::from_error(&err), ExitCode::InvalidInput);

        let err = anyhow::anyhow!("address in use");
        assert_eq!(ExitCode::from_error(&err), ExitCode::InternalError);
    }
}
