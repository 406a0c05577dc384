//! Free-text expense entry parsing.
//!
//! An [`ExpenseParser`] pulls at most one date and at most one amount out of a
//! line such as `"Coffee 50k today"`, and returns what is left as the
//! description. Each entity type is looked up in its own ordered recognizer
//! table: the first recognizer that yields a value wins, and only its first
//! match in the text is used.
//!
//! Parsing never fails. Missing entities are `None`.

use std::ops::Range;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ParserError;

mod amounts;
mod dates;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Date,
    Amount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntityValue {
    Date(NaiveDate),
    Amount(Decimal),
}

/// A recognized span of the input.
///
/// `start..end` are byte offsets into the original text and always fall on
/// `char` boundaries, so `&text[start..end] == raw_text`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParsedEntity {
    pub kind: EntityKind,
    pub raw_text: String,
    pub value: EntityValue,
    pub start: usize,
    pub end: usize,
}

impl ParsedEntity {
    pub(crate) fn date(raw_text: &str, span: Range<usize>, value: NaiveDate) -> Self {
        Self {
            kind: EntityKind::Date,
            raw_text: raw_text.to_string(),
            value: EntityValue::Date(value),
            start: span.start,
            end: span.end,
        }
    }

    pub(crate) fn amount(raw_text: &str, span: Range<usize>, value: Decimal) -> Self {
        Self {
            kind: EntityKind::Amount,
            raw_text: raw_text.to_string(),
            value: EntityValue::Amount(value),
            start: span.start,
            end: span.end,
        }
    }

    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Same span counted in `char`s instead of bytes.
    ///
    /// `text` must be the text this entity was parsed from.
    #[must_use]
    pub fn char_span(&self, text: &str) -> Range<usize> {
        let start = text.get(..self.start).map_or(0, |s| s.chars().count());
        let len = text
            .get(self.start..self.end)
            .map_or(0, |s| s.chars().count());
        start..start + len
    }
}

/// Outcome of parsing one line of text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub original_text: String,
    /// Detection order: the date (if any) comes before the amount.
    pub entities: Vec<ParsedEntity>,
    pub residual_description: String,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
}

/// Compiled recognizer tables.
///
/// Build it once and reuse it; parsing borrows it immutably, so a single
/// instance can serve every keystroke of a form or be shared between threads.
#[derive(Clone, Debug)]
pub struct ExpenseParser {
    dates: Vec<dates::DateRecognizer>,
    amounts: Vec<amounts::AmountRecognizer>,
}

impl ExpenseParser {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            dates: dates::recognizers()?,
            amounts: amounts::recognizers()?,
        })
    }

    /// Parses `text` relative to `today`.
    ///
    /// `today` anchors the relative keywords (`today`, `yesterday`,
    /// `next friday`, ...) and supplies the year of `D/M` dates.
    #[must_use]
    pub fn parse(&self, text: &str, today: NaiveDate) -> ParseResult {
        let date = dates::extract(&self.dates, text, today);
        let amount = amounts::extract(&self.amounts, text);

        let entities: Vec<ParsedEntity> = date.into_iter().chain(amount).collect();
        let residual_description = strip_spans(text, &entities);

        let mut result = ParseResult {
            original_text: text.to_string(),
            entities,
            residual_description,
            amount: None,
            date: None,
        };
        for entity in &result.entities {
            match entity.value {
                EntityValue::Date(value) => result.date = Some(value),
                EntityValue::Amount(value) => result.amount = Some(value),
            }
        }
        result
    }
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes the entity spans from `text`, then collapses whitespace.
///
/// Spans can overlap (a `D/M/YYYY` date and a bare `YYYY` amount); they are
/// merged first so removal works on disjoint ranges, last one first.
fn strip_spans(text: &str, entities: &[ParsedEntity]) -> String {
    let mut spans: Vec<Range<usize>> = entities.iter().map(ParsedEntity::span).collect();
    spans.sort_by_key(|span| span.start);

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }

    let mut out = text.to_string();
    for span in merged.iter().rev() {
        out.replace_range(span.clone(), "");
    }
    collapse_whitespace(&out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn parser() -> ExpenseParser {
        ExpenseParser::new().unwrap()
    }

    #[test]
    fn coffee_50k_today() {
        let parsed = parser().parse("Coffee 50k today", today());
        assert_eq!(parsed.amount, Some(dec!(50000)));
        assert_eq!(parsed.date, Some(today()));
        assert_eq!(parsed.residual_description, "Coffee");
        assert_eq!(parsed.entities.len(), 2);
        assert_eq!(parsed.entities[0].kind, EntityKind::Date);
        assert_eq!(parsed.entities[1].kind, EntityKind::Amount);
    }

    #[test]
    fn dinner_with_friends() {
        let parsed = parser().parse("Dinner 500k yesterday with friends", today());
        assert_eq!(parsed.amount, Some(dec!(500000)));
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 3, 14));
        assert_eq!(parsed.residual_description, "Dinner with friends");
    }

    #[test]
    fn nothing_detected_keeps_collapsed_text() {
        let parsed = parser().parse("  just   a note ", today());
        assert!(parsed.entities.is_empty());
        assert_eq!(parsed.amount, None);
        assert_eq!(parsed.date, None);
        assert_eq!(parsed.original_text, "  just   a note ");
        assert_eq!(parsed.residual_description, "just a note");
    }

    #[test]
    fn empty_input() {
        let parsed = parser().parse("", today());
        assert!(parsed.entities.is_empty());
        assert_eq!(parsed.residual_description, "");
    }

    #[test]
    fn overlapping_spans_are_merged() {
        // "2024" is both the year of the date and a bare amount.
        let parsed = parser().parse("Taxi 5/6/2024", today());
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 6, 5));
        assert_eq!(parsed.amount, Some(dec!(2024)));
        assert_eq!(parsed.residual_description, "Taxi");
    }

    #[test]
    fn offsets_index_the_original_text() {
        let text = "Phở 45k hôm nay tomorrow";
        let parsed = parser().parse(text, today());
        for entity in &parsed.entities {
            assert_eq!(&text[entity.span()], entity.raw_text);
        }
        let amount = &parsed.entities[1];
        assert_eq!(amount.raw_text, "45k");
        assert_eq!(amount.char_span(text), 4..7);
        assert_eq!(parsed.residual_description, "Phở hôm nay");
    }

    #[test]
    fn serializes_values_without_tags() {
        let parsed = parser().parse("Taxi 120k today", today());
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["entities"][0]["kind"], "date");
        assert_eq!(json["entities"][0]["value"], "2024-03-15");
        assert_eq!(json["entities"][1]["kind"], "amount");
        assert_eq!(json["residual_description"], "Taxi");
    }
}
