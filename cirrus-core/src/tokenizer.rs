//! # Tokenizer
//!
//! Splits raw text into tokens. Each token keeps its original byte offsets so
//! recognized entities can be highlighted in the source text without
//! reformatting it.
//!
//! ## Boundary rule
//!
//! A token boundary is any control character, any whitespace character, or one
//! of the literal separators `;`, `,` and `!`. Every other character belongs to
//! a token, including `.`, `/` and `:`, so that URLs (`https://google.com`),
//! decimals (`10.22`) and slash dates (`2/11/2015`) survive as single tokens.
//!
//! No normalization happens here: case and accents are preserved and each
//! recognizer normalizes locally when it needs to.
//!
//! ## Example
//!
//! ```rust
//! use cirrus_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("on 2/11/2015, something happened");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, ["on", "2/11/2015", "something", "happened"]);
//! ```

use serde::{Deserialize, Serialize};

/// A token extracted from the original text.
///
/// The `Token` is the atomic unit of the pipeline. `start` and `end` are byte
/// offsets into the input, so `&text[token.start..token.end] == token.text`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Token text, exactly as written (e.g. "https://google.com", "20m").
    pub text: String,
    /// Start byte offset in the original text (inclusive).
    pub start: usize,
    /// End byte offset in the original text (exclusive).
    pub end: usize,
    /// Sequential index of the token in the list (0, 1, 2...).
    pub index: usize,
}

/// Literal punctuation that separates tokens besides whitespace and control characters.
const SEPARATORS: &[char] = &[';', ',', '!'];

/// Returns `true` if `ch` ends the current token.
pub fn is_separator(ch: char) -> bool {
    ch.is_control() || ch.is_whitespace() || SEPARATORS.contains(&ch)
}

/// Tokenizes `text` into an ordered list of tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current_start = None;

    for (byte_pos, ch) in text.char_indices() {
        if is_separator(ch) {
            if let Some(start) = current_start.take() {
                push_token(&mut tokens, text, start, byte_pos);
            }
        } else if current_start.is_none() {
            current_start = Some(byte_pos);
        }
    }

    if let Some(start) = current_start {
        push_token(&mut tokens, text, start, text.len());
    }

    tokens
}

/// Closes the token spanning `start..end` and appends it with the next index.
fn push_token(tokens: &mut Vec<Token>, text: &str, start: usize, end: usize) {
    let index = tokens.len();
    tokens.push(Token {
        text: text[start..end].to_string(),
        start,
        end,
        index,
    });
}
