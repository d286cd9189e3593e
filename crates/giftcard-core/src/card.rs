//! Result types returned by the engine
//!
//! All of these are created once per call and handed back to the caller.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::clock::TIMEZONE;

/// Score of a perfectly conforming card
pub const FULL_ACCURACY: f64 = 100.0;
/// Deducted when the voucher does not match its pattern
pub const VOUCHER_PENALTY: f64 = 50.0;
/// Deducted when the pin does not match its pattern
pub const PIN_PENALTY: f64 = 40.0;
/// Deducted when a required checksum fails
pub const CHECKSUM_PENALTY: f64 = 10.0;

/// A freshly generated voucher and pin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCard {
    pub card_name: String,
    pub voucher: String,
    pub pin: String,
    /// Always [`FULL_ACCURACY`]
    pub accuracy: f64,
    /// Always `true`
    pub valid: bool,
    pub generated_at: DateTime<FixedOffset>,
    pub timezone: String,
}

impl GeneratedCard {
    pub fn new(
        card_name: impl Into<String>,
        voucher: String,
        pin: String,
        generated_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            card_name: card_name.into(),
            voucher,
            pin,
            accuracy: FULL_ACCURACY,
            valid: true,
            generated_at,
            timezone: TIMEZONE.to_string(),
        }
    }
}

/// Outcome of checking a (voucher, pin) pair against a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub card_name: String,
    pub voucher: String,
    pub pin: String,
    pub valid: bool,
    /// Conformance score in `[0, 100]`
    pub accuracy: f64,
    pub checked_at: DateTime<FixedOffset>,
    pub timezone: String,
}

/// Per-check breakdown behind a validation score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatReport {
    pub voucher_matches: bool,
    pub pin_matches: bool,
    pub checksum_required: bool,
    /// `true` unless the checksum was evaluated and failed
    pub checksum_ok: bool,
}

impl FormatReport {
    /// Aggregate score, floored at zero
    pub fn accuracy(&self) -> f64 {
        let mut accuracy = FULL_ACCURACY;
        if !self.voucher_matches {
            accuracy -= VOUCHER_PENALTY;
        }
        if !self.pin_matches {
            accuracy -= PIN_PENALTY;
        }
        if self.checksum_required && !self.checksum_ok {
            accuracy -= CHECKSUM_PENALTY;
        }
        accuracy.max(0.0)
    }

    pub fn is_valid(&self) -> bool {
        self.voucher_matches && self.pin_matches && (!self.checksum_required || self.checksum_ok)
    }
}
