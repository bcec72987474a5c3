//! # Classification Pipeline — Orchestrator with Observable Events
//!
//! The pipeline tokenizes the text and walks the tokens once, left to right,
//! running the recognizer chain on each token with the following token as
//! lookahead. It never backtracks: every token is classified exactly once.
//!
//! Besides the plain [`Pipeline::recognize`] call, the pipeline can push a
//! [`PipelineEvent`] for every step through an `mpsc` channel, so the web
//! server can stream progress to the browser.

use std::sync::mpsc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dictionary::CardinalDictionary;
use crate::entity::{Entity, EntityKind};
use crate::error::{CirrusError, Result};
use crate::recognizers::{classify, Classification};
use crate::tokenizer::{tokenize, Token};

/// Events emitted while the pipeline runs.
///
/// Each variant carries what the UI needs to render one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Step 1**: tokenization finished.
    TokenizationDone { tokens: Vec<Token>, total: usize },
    /// **Step 2**, once per token: the recognizer chain classified a token.
    TokenRecognized {
        token_index: usize,
        token_text: String,
        /// Name of the recognizer that matched, `"none"` for the fallback.
        recognizer: String,
        entities: Vec<Entity>,
    },
    /// **Done**: every entity, in input order.
    Done {
        entities: Vec<Entity>,
        total_tokens: usize,
        processing_ms: u64,
    },
}

/// The entity recognition pipeline.
///
/// Holds only read-only state, so one instance can serve any number of
/// threads at once.
#[derive(Debug)]
pub struct Pipeline {
    dictionary: CardinalDictionary,
}

impl Pipeline {
    pub fn new(dictionary: CardinalDictionary) -> Self {
        Self { dictionary }
    }

    /// Builds a pipeline from a newline-delimited cardinal word list.
    pub fn from_word_list(content: &str) -> Result<Self> {
        CardinalDictionary::from_word_list(content).map(Self::new)
    }

    /// Builds a pipeline from the word list compiled into the crate.
    pub fn embedded() -> Result<Self> {
        CardinalDictionary::embedded().map(Self::new)
    }

    pub fn dictionary(&self) -> &CardinalDictionary {
        &self.dictionary
    }

    /// Classifies every token of `text`. Never fails: tokens that match no
    /// recognizer come back as [`EntityKind::None`].
    pub fn recognize(&self, text: &str) -> Vec<Entity> {
        self.run(text, |_| {})
    }

    /// Like [`recognize`](Self::recognize), but pushes a [`PipelineEvent`] for each step into `tx`.
    ///
    /// # Event flow
    /// 1. `TokenizationDone`
    /// 2. `TokenRecognized` for each token, in order
    /// 3. `Done`
    ///
    /// A dropped receiver does not stop the pass.
    pub fn recognize_streaming(&self, text: &str, tx: mpsc::Sender<PipelineEvent>) {
        self.run(text, |event| {
            let _ = tx.send(event);
        });
    }

    /// Classifies independent texts in parallel. Output order matches input order.
    pub fn recognize_batch<T>(&self, texts: &[T]) -> Vec<Vec<Entity>>
    where
        T: AsRef<str> + Sync,
    {
        texts.par_iter().map(|text| self.recognize(text.as_ref())).collect()
    }

    /// Classifies the whole of `text` as a single unit, without tokenizing it.
    ///
    /// Fails with [`CirrusError::NoMeaning`] when no recognizer accepts it.
    /// Usually yields one entity; a currency amount yields two.
    pub fn recognize_one(&self, text: &str) -> Result<Vec<Entity>> {
        let token = Token {
            text: text.to_string(),
            start: 0,
            end: text.len(),
            index: 0,
        };
        match classify(&token, None, &self.dictionary) {
            Classification {
                recognizer: Some(_),
                entities,
            } => Ok(entities),
            Classification { recognizer: None, .. } => Err(CirrusError::NoMeaning),
        }
    }

    fn run(&self, text: &str, mut emit: impl FnMut(PipelineEvent)) -> Vec<Entity> {
        let start = Instant::now();

        // === Step 1: tokenization ===
        let tokens = tokenize(text);
        let total = tokens.len();
        emit(PipelineEvent::TokenizationDone {
            tokens: tokens.clone(),
            total,
        });

        // === Step 2: recognizer chain, one token of lookahead ===
        let mut entities = Vec::with_capacity(total);
        for (i, token) in tokens.iter().enumerate() {
            let Classification {
                recognizer,
                entities: found,
            } = classify(token, tokens.get(i + 1), &self.dictionary);

            emit(PipelineEvent::TokenRecognized {
                token_index: i,
                token_text: token.text.clone(),
                recognizer: recognizer.map_or(EntityKind::None.name(), |r| r.name()).to_string(),
                entities: found.clone(),
            });
            entities.extend(found);
        }

        let processing_ms = start.elapsed().as_millis() as u64;
        debug!(tokens = total, entities = entities.len(), processing_ms, "text recognized");

        emit(PipelineEvent::Done {
            entities: entities.clone(),
            total_tokens: total,
            processing_ms,
        });
        entities
    }
}
