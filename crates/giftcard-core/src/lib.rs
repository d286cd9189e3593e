//! Gift Card Format Engine
//!
//! Generates and validates synthetic gift-card identifiers (a voucher number
//! plus a short PIN) that follow the public format conventions of a fixed
//! catalog of card products. Outputs are test data only: nothing here checks
//! real-world card validity or talks to a payment network.
//!
//! ## Architecture
//!
//! 1. **Catalog** (`catalog`): the immutable product-to-schema table.
//! 2. **Checksum** (`checksum`): Luhn check-digit computation and verification.
//! 3. **Generator** (`generator`): schema-conforming voucher and pin generation.
//! 4. **Validator** (`validator`): conformance scoring of a voucher and pin.
//! 5. **Engine** (`engine`): argument checks and result assembly over the above.
//!
//! ## Example
//!
//! ```rust
//! use giftcard_core::CardEngine;
//!
//! let engine = CardEngine::new();
//! let cards = engine.generate("Vanilla Visa Gift Card", 3).unwrap();
//!
//! for card in &cards {
//!     let result = engine
//!         .validate(&card.card_name, &card.voucher, &card.pin)
//!         .unwrap();
//!     assert!(result.valid);
//!     assert_eq!(result.accuracy, 100.0);
//! }
//! ```

pub mod card;
pub mod catalog;
pub mod checksum;
pub mod clock;
pub mod engine;
pub mod error;
pub mod generator;
pub mod validator;

pub use card::{FormatReport, GeneratedCard, ValidationResult};
pub use catalog::{CardSchema, Catalog, LengthRule, SchemaError, SchemaSpec, CARD_TABLE};
pub use clock::{Clock, FixedClock, SystemClock, TIMEZONE};
pub use engine::{check_count, CardEngine, MAX_COUNT, MIN_COUNT};
pub use error::{CardError, Result};
