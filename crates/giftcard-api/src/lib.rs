//! Gift card format service
//!
//! Transport surfaces over [`giftcard_core`]:
//!
//! 1. **Handler** (`handler/`): axum routes, request logging and error mapping.
//! 2. **CLI** (`cli/`): list, show, generate and validate from the command
//!    line, plus `serve`.
//! 3. **Config** (`config`): TOML file, `GIFTCARD_*` environment and flag
//!    layering for the server.
//! 4. **Metrics** (`metrics`): Prometheus counters exposed at `/metrics`.
//!
//! ## CLI Usage
//!
//! ```bash
//! giftcard list
//! giftcard generate --card "Vanilla Visa Gift Card" --count 5 --format json
//! giftcard validate --card "Costco Shop Card" --voucher 6041234567890123456 --pin 9876
//! giftcard serve --port 8000
//! ```

pub mod cli;
pub mod config;
pub mod handler;
pub mod logging;
pub mod metrics;
pub mod server;

pub use cli::{ExitCode, GiftcardCli};
pub use config::{ConfigError, LogFormat, ServerConfig};
pub use handler::{create_router, ApiError, AppState};
pub use metrics::CardMetrics;
pub use server::{build_app, serve};

/// Run the CLI and return the process exit code
pub async fn run_cli(cli: GiftcardCli) -> ExitCode {
    cli::run(cli).await
}
