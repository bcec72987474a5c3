//! # Unit Vocabulary
//!
//! Static table of physical units and the spellings accepted for each one.
//!
//! | Unit     | Spellings                              |
//! |----------|----------------------------------------|
//! | meters   | meters, meter, metres, metre, m        |
//! | inches   | inches, inch                           |
//! | feet     | feet, foot, ft                         |
//! | miles    | miles, mile, mi                        |
//! | minute   | minute, minutes, mins, min             |
//! | second   | second, seconds, secs, sec, s          |
//! | hour     | hour, hours, hrs, hr, h                |
//! | day      | day, days, d                           |
//!
//! ## Matching rule
//!
//! Spellings of at most two characters only match a token that is exactly
//! equal to them, so "m" never matches inside "main". Longer spellings match
//! any token that starts with them ("meter" matches "meters").
//!
//! Units are tried in declaration order and the first match wins.

use serde::{Deserialize, Serialize};

/// Spellings up to this many characters require exact equality.
const EXACT_MATCH_MAX_LEN: usize = 2;

/// A physical unit attached to a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    None,
    Meters,
    Inches,
    Feet,
    Miles,
    Minute,
    Second,
    Hour,
    Day,
}

impl Unit {
    /// Every unit in declaration order. The order is the matching tie-break.
    pub const ALL: [Unit; 9] = [
        Unit::None,
        Unit::Meters,
        Unit::Inches,
        Unit::Feet,
        Unit::Miles,
        Unit::Minute,
        Unit::Second,
        Unit::Hour,
        Unit::Day,
    ];

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        self.spellings()[0]
    }

    /// Accepted spellings, lowercase. The first spelling is the canonical name.
    pub fn spellings(&self) -> &'static [&'static str] {
        match self {
            Unit::None => &["none"],
            Unit::Meters => &["meters", "meter", "metres", "metre", "m"],
            Unit::Inches => &["inches", "inch"],
            Unit::Feet => &["feet", "foot", "ft"],
            Unit::Miles => &["miles", "mile", "mi"],
            Unit::Minute => &["minute", "minutes", "mins", "min"],
            Unit::Second => &["second", "seconds", "secs", "sec", "s"],
            Unit::Hour => &["hour", "hours", "hrs", "hr", "h"],
            Unit::Day => &["day", "days", "d"],
        }
    }

    /// Returns `true` if `token` (already lowercase) is one of this unit's spellings.
    fn accepts(&self, token: &str) -> bool {
        self.spellings().iter().any(|spelling| {
            if spelling.chars().count() <= EXACT_MATCH_MAX_LEN {
                token == *spelling
            } else {
                token.starts_with(spelling)
            }
        })
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Looks up the unit named by `token`, case-insensitively.
///
/// [`Unit::None`] is never returned: a token that names no unit yields `None`.
pub fn has_unit(token: &str) -> Option<Unit> {
    let token = token.to_lowercase();
    Unit::ALL
        .iter()
        .skip(1)
        .copied()
        .find(|unit| unit.accepts(&token))
}
