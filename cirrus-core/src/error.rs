//! Errors raised by the recognizer.
//!
//! Per-token classification never fails: a token that no recognizer accepts is
//! reported as [`EntityKind::None`](crate::entity::EntityKind::None). Only
//! pipeline initialization and the all-or-nothing [`recognize_one`] entry point
//! can return an error.
//!
//! [`recognize_one`]: crate::pipeline::Pipeline::recognize_one

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CirrusError {
    /// The cardinal word list contained no words once blank lines were dropped.
    #[error("cardinal dictionary is empty")]
    EmptyDictionary,

    /// The shared pipeline behind [`crate::recognize`] could not be built.
    #[error("dictionary unavailable: {0}")]
    DictionaryUnavailable(String),

    /// The whole input did not match any recognizer.
    #[error("couldn't determine meaning")]
    NoMeaning,
}

pub type Result<T> = std::result::Result<T, CirrusError>;
