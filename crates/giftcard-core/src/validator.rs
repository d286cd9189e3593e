//! Format conformance scoring
//!
//! Scoring is a pure function of the inputs and the schema.

use crate::card::FormatReport;
use crate::catalog::CardSchema;
use crate::checksum;

/// The only voucher length at which a required checksum is evaluated.
///
/// Generation appends a check digit to any checksum-product voucher of 15 or
/// more digits, but validation only re-derives it at exactly this length.
/// Other lengths keep `checksum_ok = true` and are never penalised.
pub const CHECKSUM_VALIDATED_LENGTH: usize = 16;

/// Score a voucher and pin against `schema`
pub fn score(schema: &CardSchema, voucher: &str, pin: &str) -> FormatReport {
    let voucher_matches = schema.voucher_pattern.is_match(voucher);
    let pin_matches = schema.pin_pattern.is_match(pin);

    let checksum_ok = if schema.requires_checksum
        && voucher.chars().count() == CHECKSUM_VALIDATED_LENGTH
    {
        checksum::verify(voucher)
    } else {
        true
    };

    FormatReport {
        voucher_matches,
        pin_matches,
        checksum_required: schema.requires_checksum,
        checksum_ok,
    }
}
