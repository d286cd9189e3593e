//! Schema-conforming voucher and pin generation

use chrono::{DateTime, FixedOffset};
use rand::Rng;

use crate::card::GeneratedCard;
use crate::catalog::CardSchema;
use crate::checksum::{self, MIN_CHECKED_LENGTH};

fn random_digit<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(b'0' + rng.gen_range(0..10u8))
}

/// `len` uniformly random decimal digits
pub fn random_digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| random_digit(rng)).collect()
}

/// Build a voucher for `schema`.
///
/// The voucher starts with the schema prefix and has exactly one of the
/// schema's voucher lengths. For checksum products the last digit is the Luhn
/// check digit whenever the body is long enough to be checked.
pub fn generate_voucher<R: Rng + ?Sized>(schema: &CardSchema, rng: &mut R) -> String {
    let target = schema.voucher_length.pick(rng);

    let mut voucher = String::with_capacity(target);
    voucher.push_str(schema.prefix);
    voucher.push_str(&random_digits(rng, target.saturating_sub(schema.prefix.len())));
    voucher.truncate(target);

    if schema.requires_checksum && voucher.len() >= MIN_CHECKED_LENGTH {
        voucher.pop();
        if let Some(digit) = checksum::check_digit(&voucher) {
            voucher.push(char::from(b'0' + digit));
        }
    }

    while voucher.len() < target {
        voucher.push(random_digit(rng));
    }

    voucher
}

/// Build a pin for `schema`
pub fn generate_pin<R: Rng + ?Sized>(schema: &CardSchema, rng: &mut R) -> String {
    let len = schema.pin_length.pick(rng);
    random_digits(rng, len)
}

/// Build one complete card stamped at `generated_at`
pub fn generate_card<R: Rng + ?Sized>(
    schema: &CardSchema,
    rng: &mut R,
    generated_at: DateTime<FixedOffset>,
) -> GeneratedCard {
    let voucher = generate_voucher(schema, rng);
    let pin = generate_pin(schema, rng);
    GeneratedCard::new(schema.name, voucher, pin, generated_at)
}
