//! Amount recognizers, in priority order.
//!
//! Every pattern captures the number as `n`. The value is `n * multiplier`,
//! and recognizers with a `minimum` reject smaller values.

use regex::Regex;
use rust_decimal::Decimal;
use unicode_normalization::UnicodeNormalization;

use super::ParsedEntity;
use crate::money::parse_decimal;

const NUMBER: &str = r"(?P<n>[0-9]+(?:[.,][0-9]+)?)";

#[derive(Clone, Debug)]
pub(super) struct AmountRecognizer {
    pattern: Regex,
    multiplier: Decimal,
    minimum: Option<Decimal>,
}

/// Alternation of `words`, each in its precomposed and decomposed spelling.
///
/// Input from some keyboards carries combining marks (`e` + U+0323 + U+0302
/// instead of `ệ`). Matching both keeps the offsets on the text as typed.
fn spellings(words: &[&str]) -> String {
    let mut alternatives: Vec<String> = Vec::with_capacity(words.len() * 2);
    for word in words {
        for form in [word.nfc().collect::<String>(), word.nfd().collect::<String>()] {
            let escaped = regex::escape(&form);
            if !alternatives.contains(&escaped) {
                alternatives.push(escaped);
            }
        }
    }
    alternatives.join("|")
}

pub(super) fn recognizers() -> Result<Vec<AmountRecognizer>, regex::Error> {
    let thousand = Decimal::from(1_000);
    let million = Decimal::from(1_000_000);

    let table: [(String, Decimal, Option<Decimal>); 7] = [
        // Shorthands may be glued to the word before or spaced from the number.
        (format!(r"(?i){NUMBER}\s*k\b"), thousand, None),
        (format!(r"(?i){NUMBER}\s*m\b"), million, None),
        (
            format!(r"(?i)\b{NUMBER}\s*(?:{})\b", spellings(&["triệu", "tr"])),
            million,
            None,
        ),
        (
            format!(r"(?i)\b{NUMBER}\s*(?:{})\b", spellings(&["nghìn", "ngàn"])),
            thousand,
            None,
        ),
        (format!(r"\${NUMBER}"), Decimal::ONE, None),
        (
            format!(r"(?i)\b{NUMBER}\s*(?:{})\b", spellings(&["đ", "vnd"])),
            Decimal::ONE,
            None,
        ),
        (
            r"\b(?P<n>[0-9]{4,}(?:[.,][0-9]+)?)\b".to_string(),
            Decimal::ONE,
            Some(thousand),
        ),
    ];

    table
        .into_iter()
        .map(|(pattern, multiplier, minimum)| {
            Ok(AmountRecognizer {
                pattern: Regex::new(&pattern)?,
                multiplier,
                minimum,
            })
        })
        .collect()
}

/// First recognizer with an acceptable value wins; only its first match is
/// looked at.
pub(super) fn extract(recognizers: &[AmountRecognizer], text: &str) -> Option<ParsedEntity> {
    recognizers.iter().find_map(|recognizer| {
        let caps = recognizer.pattern.captures(text)?;
        let number = parse_decimal(caps.name("n")?.as_str())?;
        let value = number.checked_mul(recognizer.multiplier)?.normalize();
        if recognizer.minimum.is_some_and(|minimum| value < minimum) {
            return None;
        }
        let whole = caps.get(0)?;
        Some(ParsedEntity::amount(whole.as_str(), whole.range(), value))
    })
}
