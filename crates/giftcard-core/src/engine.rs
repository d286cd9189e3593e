//! Card engine
//!
//! Entry point tying the catalog, generator and validator together. Every
//! argument check happens before any card is built, so a call either fails
//! without output or returns its full batch.

use rand::Rng;
use std::sync::Arc;

use crate::card::{FormatReport, GeneratedCard, ValidationResult};
use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock, TIMEZONE};
use crate::error::{CardError, Result};
use crate::{generator, validator};

/// Smallest batch `generate` accepts
pub const MIN_COUNT: usize = 1;
/// Largest batch `generate` accepts
pub const MAX_COUNT: usize = 1000;

/// Check a requested batch size without clamping it
pub fn check_count(count: i64) -> Result<usize> {
    usize::try_from(count)
        .ok()
        .filter(|n| (MIN_COUNT..=MAX_COUNT).contains(n))
        .ok_or_else(|| {
            CardError::invalid_argument(format!(
                "count must be between {} and {}, got {}",
                MIN_COUNT, MAX_COUNT, count
            ))
        })
}

/// Generator and validator over a card catalog
#[derive(Clone)]
pub struct CardEngine<'c> {
    catalog: &'c Catalog,
    clock: Arc<dyn Clock>,
}

impl Default for CardEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl CardEngine<'static> {
    /// Engine over the built-in catalog and the system clock
    pub fn new() -> Self {
        Self::with_catalog(Catalog::global())
    }
}

impl<'c> CardEngine<'c> {
    pub fn with_catalog(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for timestamps
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Supported product names, in catalog order
    pub fn list_products(&self) -> Vec<&'static str> {
        self.catalog.names()
    }

    /// Generate `count` cards using the thread-local generator
    pub fn generate(&self, card_name: &str, count: usize) -> Result<Vec<GeneratedCard>> {
        self.generate_with(card_name, count, &mut rand::thread_rng())
    }

    /// Generate `count` cards drawing randomness from `rng`
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        card_name: &str,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<GeneratedCard>> {
        let count = check_count(i64::try_from(count).unwrap_or(i64::MAX))?;
        let schema = self.catalog.lookup(card_name)?;

        let cards: Vec<GeneratedCard> = (0..count)
            .map(|_| generator::generate_card(schema, &mut *rng, self.clock.now_eastern()))
            .collect();

        tracing::debug!(card_name = %card_name, count = cards.len(), "Generated cards");

        Ok(cards)
    }

    /// Per-check breakdown for a voucher and pin
    pub fn report(&self, card_name: &str, voucher: &str, pin: &str) -> Result<FormatReport> {
        let schema = self.catalog.lookup(card_name)?;
        Ok(validator::score(schema, voucher, pin))
    }

    /// Score a voucher and pin against a product's format
    pub fn validate(&self, card_name: &str, voucher: &str, pin: &str) -> Result<ValidationResult> {
        self.validate_with_report(card_name, voucher, pin)
            .map(|(result, _)| result)
    }

    /// Score a voucher and pin, returning the per-check breakdown with the result
    pub fn validate_with_report(
        &self,
        card_name: &str,
        voucher: &str,
        pin: &str,
    ) -> Result<(ValidationResult, FormatReport)> {
        let report = self.report(card_name, voucher, pin)?;

        let result = ValidationResult {
            card_name: card_name.to_string(),
            voucher: voucher.to_string(),
            pin: pin.to_string(),
            valid: report.is_valid(),
            accuracy: report.accuracy(),
            checked_at: self.clock.now_eastern(),
            timezone: TIMEZONE.to_string(),
        };

        tracing::debug!(
            card_name = %card_name,
            valid = result.valid,
            accuracy = result.accuracy,
            "Validated card"
        );

        Ok((result, report))
    }
}
