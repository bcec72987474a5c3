//! # Recognizers
//!
//! Independent matchers that each decide whether a token belongs to their
//! category. The pipeline tries them in [`Recognizer::CHAIN`] order and keeps
//! the first match:
//!
//! 1. **Link**: token starts with `http` and parses as a URL.
//! 2. **Date**: token parses as a date and does not contain exactly one `.`.
//! 3. **Proper noun**: capitalized tokens; reserved, never matches.
//! 4. **Quantity**: digit-initial token; unit from its suffix or the next token.
//! 5. **Cardinal**: token is in the cardinal dictionary.
//! 6. **Currency**: token starts with `$`, `¥`, `£` or `€`.
//!
//! A token that no recognizer accepts becomes [`EntityKind::None`].
//!
//! The order is load-bearing: digit-initial tokens never reach the dictionary,
//! and `10.22` is a quantity rather than a date.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::date::{format_date, parse_date};
use crate::dictionary::CardinalDictionary;
use crate::entity::{Entity, EntityKind};
use crate::numeral::{digit_run, scan_numeral, starts_with_digit};
use crate::tokenizer::Token;
use crate::units::has_unit;

/// Symbols that open a monetary amount.
pub const CURRENCY_SYMBOLS: &[char] = &['$', '¥', '£', '€'];

/// One step of the recognizer chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recognizer {
    Link,
    Date,
    ProperNoun,
    Quantity,
    Cardinal,
    Currency,
}

impl Recognizer {
    /// Precedence order, first match wins.
    pub const CHAIN: [Recognizer; 6] = [
        Recognizer::Link,
        Recognizer::Date,
        Recognizer::ProperNoun,
        Recognizer::Quantity,
        Recognizer::Cardinal,
        Recognizer::Currency,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Recognizer::Link => "link",
            Recognizer::Date => "date",
            Recognizer::ProperNoun => "proper_noun",
            Recognizer::Quantity => "quantity",
            Recognizer::Cardinal => "cardinal",
            Recognizer::Currency => "currency",
        }
    }

    /// Runs this recognizer on `token`, with `next` as the one-token lookahead.
    pub fn apply(
        &self,
        token: &Token,
        next: Option<&Token>,
        dictionary: &CardinalDictionary,
    ) -> Option<Vec<Entity>> {
        match self {
            Recognizer::Link => recognize_link(token).map(|e| vec![e]),
            Recognizer::Date => recognize_date(token).map(|e| vec![e]),
            Recognizer::ProperNoun => recognize_proper_noun(token).map(|e| vec![e]),
            Recognizer::Quantity => recognize_quantity(token, next).map(|e| vec![e]),
            Recognizer::Cardinal => recognize_cardinal(token, dictionary).map(|e| vec![e]),
            Recognizer::Currency => recognize_currency(token),
        }
    }
}

/// Outcome of running the chain on one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Recognizer that matched, `None` for the fallback.
    pub recognizer: Option<Recognizer>,
    pub entities: Vec<Entity>,
}

/// Runs the chain on `token` and falls back to [`EntityKind::None`].
pub fn classify(token: &Token, next: Option<&Token>, dictionary: &CardinalDictionary) -> Classification {
    Recognizer::CHAIN
        .iter()
        .find_map(|recognizer| {
            recognizer
                .apply(token, next, dictionary)
                .map(|entities| Classification {
                    recognizer: Some(*recognizer),
                    entities,
                })
        })
        .unwrap_or_else(|| Classification {
            recognizer: None,
            entities: vec![Entity::from_token(EntityKind::None, token, token.text.clone())],
        })
}

/// `http…` tokens that parse as a URL, normalized (`https://google.com` → `https://google.com/`).
pub fn recognize_link(token: &Token) -> Option<Entity> {
    if !token.text.starts_with("http") {
        return None;
    }
    let url = Url::parse(&token.text).ok()?;
    Some(Entity::from_token(EntityKind::Link, token, url.to_string()))
}

/// Dates, normalized to UTC. A token with exactly one `.` reads as a decimal, never a date.
pub fn recognize_date(token: &Token) -> Option<Entity> {
    if token.text.matches('.').count() == 1 {
        return None;
    }
    let date = parse_date(&token.text)?;
    Some(Entity::from_token(EntityKind::Date, token, format_date(&date)))
}

/// Place for organization / proper-noun recognition on capitalized tokens.
/// Not implemented: every token falls through to the next recognizer.
pub fn recognize_proper_noun(_token: &Token) -> Option<Entity> {
    None
}

/// Digit-initial tokens. The value is the numeral verbatim (`20`, `10.22`,
/// `5e-3`). The unit comes from the rest of the token (`20m`) or, failing
/// that, from the next token (`20 feet`), which is not consumed.
pub fn recognize_quantity(token: &Token, next: Option<&Token>) -> Option<Entity> {
    if !starts_with_digit(&token.text) {
        return None;
    }
    let numeral = scan_numeral(&token.text);
    let suffix = &token.text[numeral.len()..];

    let unit = Some(suffix)
        .filter(|s| !s.is_empty())
        .and_then(has_unit)
        .or_else(|| next.and_then(|n| has_unit(&n.text)));

    Some(Entity::from_token_part(EntityKind::Quantity, token, 0, numeral.len()).with_unit(unit))
}

/// Words in the cardinal dictionary ("two", "dozen").
pub fn recognize_cardinal(token: &Token, dictionary: &CardinalDictionary) -> Option<Entity> {
    dictionary
        .contains(&token.text)
        .then(|| Entity::from_token(EntityKind::Cardinal, token, token.text.clone()))
}

/// Currency-initial tokens: the symbol as money, then the digits right after
/// it as a quantity. Without digits only the money entity is emitted.
pub fn recognize_currency(token: &Token) -> Option<Vec<Entity>> {
    let symbol = token.text.chars().next().filter(|c| CURRENCY_SYMBOLS.contains(c))?;
    let symbol_len = symbol.len_utf8();

    let mut entities = vec![Entity::from_token_part(EntityKind::Money, token, 0, symbol_len)];
    let digits = digit_run(&token.text[symbol_len..]);
    if !digits.is_empty() {
        entities.push(Entity::from_token_part(
            EntityKind::Quantity,
            token,
            symbol_len,
            digits.len(),
        ));
    }
    Some(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use crate::units::Unit;

    fn token(text: &str) -> Token {
        tokenize(text).remove(0)
    }

    fn dictionary() -> CardinalDictionary {
        CardinalDictionary::from_word_list("two\ndozen\nhundred").unwrap()
    }

    #[test]
    fn test_link_is_normalized() {
        let entity = recognize_link(&token("https://google.com")).unwrap();
        assert_eq!(entity.kind, EntityKind::Link);
        assert_eq!(entity.value, "https://google.com/");
    }

    #[test]
    fn test_link_parse_failure_falls_through() {
        assert!(recognize_link(&token("http")).is_none());
        assert!(recognize_link(&token("https://")).is_none());
        assert!(recognize_link(&token("google.com")).is_none());
    }

    #[test]
    fn test_date_recognized() {
        let entity = recognize_date(&token("2/11/2015")).unwrap();
        assert_eq!(entity.kind, EntityKind::Date);
        assert_eq!(entity.value, "2015-02-11 00:00:00 UTC");
    }

    #[test]
    fn test_single_decimal_point_is_never_a_date() {
        assert!(recognize_date(&token("10.22")).is_none());
        assert!(recognize_date(&token("11.02.2015")).is_some());
    }

    #[test]
    fn test_proper_noun_is_a_no_op() {
        assert!(recognize_proper_noun(&token("Google")).is_none());
        assert!(recognize_proper_noun(&token("google")).is_none());
    }

    #[test]
    fn test_quantity_with_unit_suffix() {
        let entity = recognize_quantity(&token("20m"), None).unwrap();
        assert_eq!(entity.kind, EntityKind::Quantity);
        assert_eq!(entity.value, "20");
        assert_eq!(entity.unit(), Some(Unit::Meters));
        assert_eq!((entity.start, entity.end), (0, 2));
    }

    #[test]
    fn test_quantity_with_unit_lookahead() {
        let tokens = tokenize("20 feet");
        let entity = recognize_quantity(&tokens[0], tokens.get(1)).unwrap();
        assert_eq!(entity.unit(), Some(Unit::Feet));

        let tokens = tokenize("20 apples");
        let entity = recognize_quantity(&tokens[0], tokens.get(1)).unwrap();
        assert_eq!(entity.value, "20");
        assert_eq!(entity.unit(), None);
    }

    #[test]
    fn test_quantity_keeps_literal() {
        for literal in ["10.22", "10e12", "5e-3"] {
            let entity = recognize_quantity(&token(literal), None).unwrap();
            assert_eq!(entity.value, literal);
            assert_eq!(entity.unit(), None);
        }
    }

    #[test]
    fn test_quantity_requires_leading_digit() {
        assert!(recognize_quantity(&token("m20"), None).is_none());
        assert!(recognize_quantity(&token("-5"), None).is_none());
    }

    #[test]
    fn test_cardinal_is_case_sensitive() {
        let dict = dictionary();
        assert!(recognize_cardinal(&token("dozen"), &dict).is_some());
        assert!(recognize_cardinal(&token("Dozen"), &dict).is_none());
    }

    #[test]
    fn test_currency_emits_money_then_quantity() {
        let entities = recognize_currency(&token("$20")).unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!((entities[0].kind, entities[0].value.as_str()), (EntityKind::Money, "$"));
        assert_eq!((entities[1].kind, entities[1].value.as_str()), (EntityKind::Quantity, "20"));
        assert_eq!((entities[1].start, entities[1].end), (1, 3));
    }

    #[test]
    fn test_currency_multibyte_symbol() {
        let entities = recognize_currency(&token("€15.50")).unwrap();
        assert_eq!(entities[0].value, "€");
        assert_eq!(entities[1].value, "15");
    }

    #[test]
    fn test_currency_without_digits_is_money_alone() {
        let entities = recognize_currency(&token("$")).unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, EntityKind::Money);
        assert!(recognize_currency(&token("20$")).is_none());
    }

    #[test]
    fn test_classify_precedence() {
        let dict = dictionary();
        let cases = [
            ("https://google.com", Some(Recognizer::Link)),
            ("2/11/2015", Some(Recognizer::Date)),
            ("10.22", Some(Recognizer::Quantity)),
            ("two", Some(Recognizer::Cardinal)),
            ("£5", Some(Recognizer::Currency)),
            ("Google", None),
            ("something", None),
        ];
        for (text, expected) in cases {
            assert_eq!(classify(&token(text), None, &dict).recognizer, expected, "token {text:?}");
        }
    }

    #[test]
    fn test_classify_fallback_is_none_kind() {
        let result = classify(&token("happened"), None, &dictionary());
        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities[0].kind, EntityKind::None);
        assert_eq!(result.entities[0].value, "happened");
    }
}
