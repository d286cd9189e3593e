//! Schema catalog
//!
//! The fixed table of card products and their format rules. The table is
//! compiled once per process and never modified afterwards, so it can be
//! shared freely between threads.

use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

use crate::error::{CardError, Result};

/// Allowed length of a voucher or pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LengthRule {
    /// Exactly this many digits
    Fixed(usize),
    /// Any one of these lengths
    OneOf(&'static [usize]),
}

impl LengthRule {
    /// Shortest allowed length
    pub fn min(&self) -> usize {
        match self {
            LengthRule::Fixed(n) => *n,
            LengthRule::OneOf(lengths) => lengths.iter().copied().min().unwrap_or(0),
        }
    }

    /// Longest allowed length
    pub fn max(&self) -> usize {
        match self {
            LengthRule::Fixed(n) => *n,
            LengthRule::OneOf(lengths) => lengths.iter().copied().max().unwrap_or(0),
        }
    }

    /// Every length this rule accepts
    pub fn lengths(&self) -> &[usize] {
        match self {
            LengthRule::Fixed(n) => std::slice::from_ref(n),
            LengthRule::OneOf(lengths) => lengths,
        }
    }

    /// Whether `len` is an allowed length
    pub fn allows(&self, len: usize) -> bool {
        self.lengths().contains(&len)
    }

    /// Resolve the rule to a concrete length, uniformly over the allowed set
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self {
            LengthRule::Fixed(n) => *n,
            LengthRule::OneOf(lengths) => lengths.choose(rng).copied().unwrap_or(0),
        }
    }
}

/// Literal row of the card table, before its patterns are compiled
#[derive(Debug, Clone, Copy)]
pub struct SchemaSpec {
    pub name: &'static str,
    pub voucher_length: LengthRule,
    pub pin_length: LengthRule,
    pub prefix: &'static str,
    pub requires_checksum: bool,
    pub voucher_pattern: &'static str,
    pub pin_pattern: &'static str,
}

/// Supported card products, in listing order
pub const CARD_TABLE: &[SchemaSpec] = &[
    SchemaSpec {
        name: "Costco Shop Card",
        voucher_length: LengthRule::Fixed(19),
        pin_length: LengthRule::Fixed(4),
        prefix: "60",
        requires_checksum: false,
        voucher_pattern: r"^\d{19}$",
        pin_pattern: r"^\d{4}$",
    },
    SchemaSpec {
        name: "The Home Depot eGift Card",
        voucher_length: LengthRule::Fixed(19),
        pin_length: LengthRule::Fixed(4),
        prefix: "604",
        requires_checksum: false,
        voucher_pattern: r"^\d{19}$",
        pin_pattern: r"^\d{4}$",
    },
    SchemaSpec {
        name: "Lowe\u{2019}s eGift Card",
        voucher_length: LengthRule::Fixed(19),
        pin_length: LengthRule::Fixed(4),
        prefix: "603",
        requires_checksum: false,
        voucher_pattern: r"^\d{19}$",
        pin_pattern: r"^\d{4}$",
    },
    SchemaSpec {
        name: "Vanilla Visa Gift Card",
        voucher_length: LengthRule::Fixed(16),
        pin_length: LengthRule::OneOf(&[3, 4]),
        prefix: "4",
        requires_checksum: true,
        voucher_pattern: r"^\d{16}$",
        pin_pattern: r"^\d{3,4}$",
    },
    SchemaSpec {
        name: "Visa Prepaid Gift Card",
        voucher_length: LengthRule::Fixed(16),
        pin_length: LengthRule::OneOf(&[3, 4]),
        prefix: "4",
        requires_checksum: true,
        voucher_pattern: r"^\d{16}$",
        pin_pattern: r"^\d{3,4}$",
    },
    SchemaSpec {
        name: "Mastercard Prepaid Gift Card",
        voucher_length: LengthRule::Fixed(16),
        pin_length: LengthRule::OneOf(&[3, 4]),
        prefix: "5",
        requires_checksum: true,
        voucher_pattern: r"^\d{16}$",
        pin_pattern: r"^\d{3,4}$",
    },
    SchemaSpec {
        name: "OneVanilla Prepaid",
        voucher_length: LengthRule::Fixed(16),
        pin_length: LengthRule::Fixed(3),
        prefix: "4",
        requires_checksum: true,
        voucher_pattern: r"^\d{16}$",
        pin_pattern: r"^\d{3}$",
    },
    SchemaSpec {
        name: "Sam\u{2019}s Club eGift Card",
        voucher_length: LengthRule::Fixed(16),
        pin_length: LengthRule::Fixed(4),
        prefix: "6014",
        requires_checksum: false,
        voucher_pattern: r"^\d{16}$",
        pin_pattern: r"^\d{4}$",
    },
    SchemaSpec {
        name: "Walmart eGift Card",
        voucher_length: LengthRule::Fixed(16),
        pin_length: LengthRule::Fixed(4),
        prefix: "6014",
        requires_checksum: false,
        voucher_pattern: r"^\d{16}$",
        pin_pattern: r"^\d{4}$",
    },
    SchemaSpec {
        name: "Target eGift Card",
        voucher_length: LengthRule::OneOf(&[15, 16]),
        pin_length: LengthRule::Fixed(4),
        prefix: "04",
        requires_checksum: false,
        voucher_pattern: r"^\d{15,16}$",
        pin_pattern: r"^\d{4}$",
    },
    SchemaSpec {
        name: "Best Buy eGift Card",
        voucher_length: LengthRule::Fixed(16),
        pin_length: LengthRule::Fixed(4),
        prefix: "60",
        requires_checksum: false,
        voucher_pattern: r"^\d{16}$",
        pin_pattern: r"^\d{4}$",
    },
    SchemaSpec {
        name: "Macy\u{2019}s eGift Card",
        voucher_length: LengthRule::Fixed(16),
        pin_length: LengthRule::Fixed(4),
        prefix: "60",
        requires_checksum: false,
        voucher_pattern: r"^\d{16}$",
        pin_pattern: r"^\d{4}$",
    },
];

/// Problems found while compiling a card table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{card}: {field} length set is empty or contains zero")]
    InvalidLength { card: String, field: &'static str },

    #[error("{card}: prefix '{prefix}' is longer than the shortest voucher ({min})")]
    PrefixTooLong { card: String, prefix: String, min: usize },

    #[error("{card}: prefix '{prefix}' contains non-digit characters")]
    NonDigitPrefix { card: String, prefix: String },

    #[error("{card}: invalid {field} pattern: {reason}")]
    InvalidPattern {
        card: String,
        field: &'static str,
        reason: String,
    },

    #[error("{card}: {field} pattern rejects declared length {length}")]
    PatternMismatch {
        card: String,
        field: &'static str,
        length: usize,
    },

    #[error("duplicate card name: {0}")]
    DuplicateName(String),
}

/// Compiled format rule for one card product
#[derive(Debug, Clone, Serialize)]
pub struct CardSchema {
    pub name: &'static str,
    pub voucher_length: LengthRule,
    pub pin_length: LengthRule,
    pub prefix: &'static str,
    pub requires_checksum: bool,
    #[serde(serialize_with = "serialize_pattern")]
    pub voucher_pattern: Regex,
    #[serde(serialize_with = "serialize_pattern")]
    pub pin_pattern: Regex,
}

fn serialize_pattern<S: Serializer>(pattern: &Regex, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(pattern.as_str())
}

impl CardSchema {
    /// Compile a table row, checking the row's internal consistency
    pub fn compile(spec: &SchemaSpec) -> std::result::Result<Self, SchemaError> {
        let card = || spec.name.to_string();

        for (field, rule) in [("voucher", &spec.voucher_length), ("pin", &spec.pin_length)] {
            if rule.lengths().is_empty() || rule.lengths().contains(&0) {
                return Err(SchemaError::InvalidLength { card: card(), field });
            }
        }

        if !spec.prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SchemaError::NonDigitPrefix {
                card: card(),
                prefix: spec.prefix.to_string(),
            });
        }

        let min = spec.voucher_length.min();
        if spec.prefix.len() > min {
            return Err(SchemaError::PrefixTooLong {
                card: card(),
                prefix: spec.prefix.to_string(),
                min,
            });
        }

        let voucher_pattern = compile_pattern(spec.name, "voucher", spec.voucher_pattern)?;
        let pin_pattern = compile_pattern(spec.name, "pin", spec.pin_pattern)?;

        for (field, rule, pattern) in [
            ("voucher", &spec.voucher_length, &voucher_pattern),
            ("pin", &spec.pin_length, &pin_pattern),
        ] {
            for &length in rule.lengths() {
                if !pattern.is_match(&"0".repeat(length)) {
                    return Err(SchemaError::PatternMismatch {
                        card: card(),
                        field,
                        length,
                    });
                }
            }
        }

        Ok(Self {
            name: spec.name,
            voucher_length: spec.voucher_length,
            pin_length: spec.pin_length,
            prefix: spec.prefix,
            requires_checksum: spec.requires_checksum,
            voucher_pattern,
            pin_pattern,
        })
    }
}

// `\d` is compiled ASCII-only so patterns never accept non-ASCII digits.
fn compile_pattern(
    card: &str,
    field: &'static str,
    source: &str,
) -> std::result::Result<Regex, SchemaError> {
    RegexBuilder::new(source)
        .unicode(false)
        .build()
        .map_err(|e| SchemaError::InvalidPattern {
            card: card.to_string(),
            field,
            reason: e.to_string(),
        })
}

/// Read-only mapping from product name to schema
#[derive(Debug)]
pub struct Catalog {
    schemas: Vec<CardSchema>,
    index: HashMap<&'static str, usize>,
}

impl Catalog {
    /// The process-wide catalog built from [`CARD_TABLE`]
    pub fn global() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::from_specs(CARD_TABLE).expect("built-in card table is well-formed")
        })
    }

    /// Compile a catalog from table rows, preserving their order
    pub fn from_specs(specs: &[SchemaSpec]) -> std::result::Result<Self, SchemaError> {
        let mut schemas = Vec::with_capacity(specs.len());
        let mut index = HashMap::with_capacity(specs.len());

        for spec in specs {
            if index.insert(spec.name, schemas.len()).is_some() {
                return Err(SchemaError::DuplicateName(spec.name.to_string()));
            }
            schemas.push(CardSchema::compile(spec)?);
        }

        tracing::debug!(cards = schemas.len(), "Card catalog compiled");

        Ok(Self { schemas, index })
    }

    /// Exact, case-sensitive lookup by product name
    pub fn lookup(&self, name: &str) -> Result<&CardSchema> {
        self.index
            .get(name)
            .map(|&i| &self.schemas[i])
            .ok_or_else(|| CardError::not_found(name))
    }

    /// Product names in table order
    pub fn names(&self) -> Vec<&'static str> {
        self.schemas.iter().map(|s| s.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardSchema> {
        self.schemas.iter()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spec(name: &'static str) -> SchemaSpec {
        SchemaSpec {
            name,
            voucher_length: LengthRule::Fixed(16),
            pin_length: LengthRule::Fixed(4),
            prefix: "60",
            requires_checksum: false,
            voucher_pattern: r"^\d{16}$",
            pin_pattern: r"^\d{4}$",
        }
    }

    #[test]
    fn test_builtin_table_compiles() {
        let catalog = Catalog::from_specs(CARD_TABLE).unwrap();
        assert_eq!(catalog.len(), 12);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_names_preserve_table_order() {
        let names = Catalog::global().names();
        assert_eq!(names.first(), Some(&"Costco Shop Card"));
        assert_eq!(names.last(), Some(&"Macy\u{2019}s eGift Card"));
        assert_eq!(names[3], "Vanilla Visa Gift Card");
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        let catalog = Catalog::global();
        let schema = catalog.lookup("Target eGift Card").unwrap();
        assert_eq!(schema.prefix, "04");
        assert_eq!(schema.voucher_length, LengthRule::OneOf(&[15, 16]));

        assert_eq!(
            catalog.lookup("target egift card").unwrap_err(),
            CardError::not_found("target egift card")
        );
        assert!(catalog.lookup("Target eGift Card ").is_err());
        // Straight apostrophe is a different product name
        assert!(catalog.lookup("Lowe's eGift Card").is_err());
        assert!(catalog.lookup("Lowe\u{2019}s eGift Card").is_ok());
    }

    #[test]
    fn test_checksum_products() {
        let catalog = Catalog::global();
        let checksummed: Vec<_> = catalog
            .iter()
            .filter(|s| s.requires_checksum)
            .map(|s| s.name)
            .collect();
        assert_eq!(
            checksummed,
            vec![
                "Vanilla Visa Gift Card",
                "Visa Prepaid Gift Card",
                "Mastercard Prepaid Gift Card",
                "OneVanilla Prepaid",
            ]
        );
    }

    #[test]
    fn test_length_rule_bounds() {
        let rule = LengthRule::OneOf(&[15, 16]);
        assert_eq!(rule.min(), 15);
        assert_eq!(rule.max(), 16);
        assert!(rule.allows(15));
        assert!(!rule.allows(17));

        let fixed = LengthRule::Fixed(19);
        assert_eq!(fixed.lengths(), &[19]);
        assert_eq!(fixed.min(), fixed.max());
    }

    #[test]
    fn test_length_rule_pick_stays_in_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let rule = LengthRule::OneOf(&[3, 4]);
        let mut seen = [false; 2];
        for _ in 0..200 {
            let n = rule.pick(&mut rng);
            assert!(rule.allows(n));
            seen[n - 3] = true;
        }
        assert_eq!(seen, [true, true]);
        assert_eq!(LengthRule::Fixed(4).pick(&mut rng), 4);
    }

    #[test]
    fn test_patterns_are_ascii_only() {
        let schema = Catalog::global().lookup("Costco Shop Card").unwrap();
        assert!(schema.pin_pattern.is_match("1234"));
        assert!(!schema.pin_pattern.is_match("١٢٣٤"));
        assert!(!schema.pin_pattern.is_match("1234\n"));
    }

    #[test]
    fn test_compile_rejects_long_prefix() {
        let mut bad = spec("Bad Prefix");
        bad.prefix = "60000000000000000";
        assert!(matches!(
            CardSchema::compile(&bad),
            Err(SchemaError::PrefixTooLong { .. })
        ));
    }

    #[test]
    fn test_compile_rejects_inconsistent_pattern() {
        let mut bad = spec("Bad Pattern");
        bad.pin_length = LengthRule::OneOf(&[3, 4]);
        assert_eq!(
            CardSchema::compile(&bad).unwrap_err(),
            SchemaError::PatternMismatch {
                card: "Bad Pattern".to_string(),
                field: "pin",
                length: 3,
            }
        );
    }

    #[test]
    fn test_compile_rejects_zero_length() {
        let mut bad = spec("Zero");
        bad.pin_length = LengthRule::Fixed(0);
        assert!(matches!(
            CardSchema::compile(&bad),
            Err(SchemaError::InvalidLength { field: "pin", .. })
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let specs = [spec("Twice"), spec("Twice")];
        assert_eq!(
            Catalog::from_specs(&specs).unwrap_err(),
            SchemaError::DuplicateName("Twice".to_string())
        );
    }

    #[test]
    fn test_schema_serializes_patterns_as_strings() {
        let schema = Catalog::global().lookup("Vanilla Visa Gift Card").unwrap();
        let json = serde_json::to_value(schema).unwrap();
        assert_eq!(json["voucher_pattern"], r"^\d{16}$");
        assert_eq!(json["pin_length"], serde_json::json!([3, 4]));
        assert_eq!(json["voucher_length"], 16);
        assert_eq!(json["requires_checksum"], true);
    }
}
