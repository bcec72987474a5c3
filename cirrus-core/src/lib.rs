//! # cirrus-core — Rule-Based Entity Extraction
//!
//! Pulls structured entities out of free text: links, dates, quantities with
//! physical units, cardinal-number words and monetary amounts. The engine is
//! deterministic and single-pass; there is no parsing, tagging or learning.
//!
//! ## Architecture
//!
//! 1.  **Input**: raw text.
//! 2.  **Tokenization** ([`tokenizer`]): split on whitespace, control characters and `; , !`.
//! 3.  **Recognizer chain** ([`recognizers`]): link → date → proper noun (reserved) →
//!     quantity → cardinal → currency, first match wins, one token of lookahead.
//!     - [`date`]: date parsing and UTC normalization.
//!     - [`numeral`] and [`units`]: numeric spans and unit spellings.
//!     - [`dictionary`]: trie of cardinal words.
//! 4.  **Output**: a list of [`Entity`] values in input order.
//!
//! ## Example
//!
//! ```rust
//! use cirrus_core::{EntityKind, Pipeline, Unit};
//!
//! let pipeline = Pipeline::embedded().unwrap();
//! let entities = pipeline.recognize("length of 20m");
//!
//! assert_eq!(entities[2].kind, EntityKind::Quantity);
//! assert_eq!(entities[2].value, "20");
//! assert_eq!(entities[2].unit(), Some(Unit::Meters));
//! ```

use std::sync::LazyLock;

pub mod date;
pub mod dictionary;
pub mod entity;
pub mod error;
pub mod numeral;
pub mod pipeline;
pub mod recognizers;
pub mod tokenizer;
pub mod units;

pub use dictionary::CardinalDictionary;
pub use entity::{Entity, EntityData, EntityKind};
pub use error::{CirrusError, Result};
pub use pipeline::{Pipeline, PipelineEvent};
pub use recognizers::Recognizer;
pub use tokenizer::{tokenize, Token};
pub use units::{has_unit, Unit};

static SHARED: LazyLock<Result<Pipeline>> = LazyLock::new(Pipeline::embedded);

/// Recognizes entities with a process-wide pipeline built from the embedded
/// word list on first use.
///
/// Fails only if that pipeline could not be built.
pub fn recognize(text: &str) -> Result<Vec<Entity>> {
    SHARED
        .as_ref()
        .map(|pipeline| pipeline.recognize(text))
        .map_err(|e| CirrusError::DictionaryUnavailable(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_recognize() {
        let entities = recognize("two dozen").unwrap();
        assert_eq!(entities.len(), 2);
        assert!(entities.iter().all(|e| e.kind == EntityKind::Cardinal));
    }

    #[test]
    fn test_shared_pipeline_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| std::thread::spawn(move || recognize(&format!("{i} ft")).unwrap()))
            .collect();
        for handle in handles {
            let entities = handle.join().unwrap();
            assert_eq!(entities[0].unit(), Some(Unit::Feet));
        }
    }
}
