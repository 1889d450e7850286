//! Fuzzy comparison of human-name strings for record linkage.
//!
//! Decides whether two free-form name strings plausibly refer to the same
//! person, tolerating spelling variation, honorifics, nicknames, dialectal
//! prefixes, indexing noise, transliteration loss, and phonetic drift. The
//! decision is binary (match / no-match); [`ComparisonResult`] carries a
//! trace of the cascade of attempts that produced it, for audit.
//!
//! ```
//! use name_comparator::Comparator;
//!
//! let cmp = Comparator::new().unwrap();
//! let result = cmp.compare("Robert Jones", "Bob Jones");
//! assert!(result.matched);
//! ```

mod align;
mod clean;
mod comparator;
mod config;
mod error;
mod gates;
mod modify;
mod nickname;
mod pair_clean;
mod phonetic;
mod pronunciation;
mod reference;
mod rules;
mod spelling;

pub use align::{AlignedPair, Alignment};
pub use clean::clean_name;
pub use comparator::{Attempt, Comparator, ComparisonResult};
pub use config::Thresholds;
pub use error::{ReferenceDataSource, ReferenceError};
pub use reference::ReferenceData;
