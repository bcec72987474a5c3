//! # Entity Kinds and Results
//!
//! Every token the pipeline sees becomes one [`Entity`] (two for a currency
//! amount such as `$20`).
//!
//! | Kind         | Wire name    | Example value            |
//! |--------------|--------------|--------------------------|
//! | None         | `none`       | `something`              |
//! | Link         | `link`       | `https://google.com/`    |
//! | Quantity     | `quantity`   | `20`, `10.22`, `5e-3`    |
//! | Date         | `date`       | `2015-02-11 00:00:00 UTC`|
//! | Organization | `org`        | reserved                 |
//! | Cardinal     | `cardinal`   | `dozen`                  |
//! | Money        | `monetary`   | `$`                      |
//! | Event        | `event`      | reserved                 |
//!
//! `Organization` and `Event` have no recognizer yet and never appear in
//! output.

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;
use crate::units::Unit;

/// Semantic category of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Matched no recognizer.
    #[serde(rename = "none")]
    None,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "quantity")]
    Quantity,
    #[serde(rename = "date")]
    Date,
    /// Reserved for proper-noun recognition, which is not implemented.
    #[serde(rename = "org")]
    Organization,
    #[serde(rename = "cardinal")]
    Cardinal,
    #[serde(rename = "monetary")]
    Money,
    /// Reserved, no recognizer produces it.
    #[serde(rename = "event")]
    Event,
}

impl EntityKind {
    /// Wire name of the kind (for serialization and UI).
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::None => "none",
            EntityKind::Link => "link",
            EntityKind::Quantity => "quantity",
            EntityKind::Date => "date",
            EntityKind::Organization => "org",
            EntityKind::Cardinal => "cardinal",
            EntityKind::Money => "monetary",
            EntityKind::Event => "event",
        }
    }

    /// CSS color used to highlight the kind in the demo UI.
    pub fn color(&self) -> &'static str {
        match self {
            EntityKind::None => "transparent",
            EntityKind::Link => "#3b82f6",
            EntityKind::Quantity => "#10b981",
            EntityKind::Date => "#f59e0b",
            EntityKind::Organization => "#6b7280",
            EntityKind::Cardinal => "#8b5cf6",
            EntityKind::Money => "#ef4444",
            EntityKind::Event => "#6b7280",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload attached to an entity. Only quantities carry one today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityData {
    Unit(Unit),
}

/// A classified piece of the input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    /// Free-form annotation (e.g. a chart label). Recognizers leave it empty.
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EntityData>,
    /// Literal substring, or a normalized value for links and dates.
    pub value: String,
    /// Start byte offset in the original text (inclusive).
    pub start: usize,
    /// End byte offset in the original text (exclusive).
    pub end: usize,
}

impl Entity {
    /// Entity covering the whole token.
    pub fn from_token(kind: EntityKind, token: &Token, value: impl Into<String>) -> Self {
        Self {
            kind,
            label: String::new(),
            data: None,
            value: value.into(),
            start: token.start,
            end: token.end,
        }
    }

    /// Entity covering `len` bytes of `token` starting `offset` bytes in.
    pub fn from_token_part(kind: EntityKind, token: &Token, offset: usize, len: usize) -> Self {
        let value = &token.text[offset..offset + len];
        Self {
            kind,
            label: String::new(),
            data: None,
            value: value.to_string(),
            start: token.start + offset,
            end: token.start + offset + len,
        }
    }

    pub fn with_unit(mut self, unit: Option<Unit>) -> Self {
        self.data = unit.map(EntityData::Unit);
        self
    }

    /// Unit carried by a quantity, if any.
    pub fn unit(&self) -> Option<Unit> {
        match self.data {
            Some(EntityData::Unit(unit)) => Some(unit),
            None => None,
        }
    }
}
