//! giftcard CLI
//!
//! # Usage
//!
//! ```bash
//! # List supported products
//! giftcard list
//!
//! # Generate a reproducible batch
//! giftcard generate --card "Target eGift Card" --count 10 --seed 42
//!
//! # Validate a voucher and pin
//! giftcard validate --card "Costco Shop Card" --voucher 6041234567890123456 --pin 9876
//!
//! # Run the HTTP server
//! giftcard serve --config giftcard.toml
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: The validated card does not conform
//! - 3: Invalid input or arguments
//! - 4: Unknown card product
//! - 10: Internal error

use clap::Parser;
use giftcard_api::{run_cli, GiftcardCli};

#[tokio::main]
async fn main() {
    let cli = GiftcardCli::parse();

    let exit_code = run_cli(cli).await;
    std::process::exit(exit_code.into());
}
