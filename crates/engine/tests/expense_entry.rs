use chrono::NaiveDate;
use proptest::prelude::*;
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use engine::{EntityKind, ExpenseParser};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[fixture]
fn parser() -> ExpenseParser {
    ExpenseParser::new().unwrap()
}

// Wednesday.
#[fixture]
fn today() -> NaiveDate {
    ymd(2025, 1, 1)
}

#[rstest]
#[case::k_suffix("Coffee 50k today", Some(dec!(50000)))]
#[case::bare_four_digits("3000", Some(dec!(3000)))]
#[case::bare_below_threshold("500", None)]
#[case::million("Rent 6.5m", Some(dec!(6500000)))]
#[case::trieu("tiền nhà 5 triệu", Some(dec!(5000000)))]
#[case::tr("laptop 20tr", Some(dec!(20000000)))]
#[case::nghin("gửi xe 5 nghìn", Some(dec!(5000)))]
#[case::dollar("netflix $15,99", Some(dec!(15.99)))]
#[case::dong("bánh mì 25000đ", Some(dec!(25000)))]
#[case::vnd_upper("grab 72000 VND", Some(dec!(72000)))]
#[case::k_before_bare("room 1204 tip 20k", Some(dec!(20000)))]
#[case::no_number("lunch with Minh", None)]
fn amount_recognition(
    parser: ExpenseParser,
    today: NaiveDate,
    #[case] text: &str,
    #[case] expected: Option<Decimal>,
) {
    assert_eq!(parser.parse(text, today).amount, expected);
}

#[rstest]
#[case::today("today 5/6", Some(ymd(2025, 1, 1)))]
#[case::yesterday("gas yesterday", Some(ymd(2024, 12, 31)))]
#[case::tomorrow("TOMORROW rent", Some(ymd(2025, 1, 2)))]
#[case::next_weekday("next wednesday gym", Some(ymd(2025, 1, 8)))]
#[case::numeric("dentist 14/2", Some(ymd(2025, 2, 14)))]
#[case::numeric_short_year("ticket 3-4-26", Some(ymd(2026, 4, 3)))]
#[case::numeric_full_year("ticket 3/4/2023", Some(ymd(2023, 4, 3)))]
#[case::invalid("30/2", None)]
#[case::none("groceries 120k", None)]
fn date_recognition(
    parser: ExpenseParser,
    today: NaiveDate,
    #[case] text: &str,
    #[case] expected: Option<NaiveDate>,
) {
    assert_eq!(parser.parse(text, today).date, expected);
}

#[rstest]
fn end_to_end_dinner(parser: ExpenseParser, today: NaiveDate) {
    let parsed = parser.parse("Dinner 500k yesterday with friends", today);

    assert_eq!(parsed.amount, Some(dec!(500000)));
    assert_eq!(parsed.date, Some(ymd(2024, 12, 31)));
    assert_eq!(parsed.residual_description, "Dinner with friends");
    assert_eq!(parsed.original_text, "Dinner 500k yesterday with friends");

    let kinds: Vec<EntityKind> = parsed.entities.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, [EntityKind::Date, EntityKind::Amount]);
    assert_eq!(parsed.entities[0].raw_text, "yesterday");
    assert_eq!(parsed.entities[1].raw_text, "500k");
}

#[rstest]
fn only_one_entity_per_kind(parser: ExpenseParser, today: NaiveDate) {
    let parsed = parser.parse("50k taxi 30k tip today tomorrow", today);
    assert_eq!(parsed.entities.len(), 2);
    assert_eq!(parsed.amount, Some(dec!(50000)));
    assert_eq!(parsed.date, Some(today));
    assert_eq!(parsed.residual_description, "taxi 30k tip tomorrow");
}

#[rstest]
fn relative_dates_follow_the_injected_day(parser: ExpenseParser) {
    let a = parser.parse("cafe 30k yesterday", ymd(2024, 3, 1));
    let b = parser.parse("cafe 30k yesterday", ymd(2023, 3, 1));
    assert_eq!(a.date, Some(ymd(2024, 2, 29)));
    assert_eq!(b.date, Some(ymd(2023, 2, 28)));
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

proptest! {
    #[test]
    fn parse_is_idempotent(text in "[a-z0-9 /.,$k-]{0,40}") {
        let parser = ExpenseParser::new().unwrap();
        let today = ymd(2025, 6, 30);
        prop_assert_eq!(parser.parse(&text, today), parser.parse(&text, today));
    }

    #[test]
    fn residual_plus_spans_rebuild_the_input(
        words in prop::collection::vec("[a-z]{1,8}", 0..4),
        amount in 1u32..1000,
        keyword in prop::sample::select(vec!["today", "yesterday", "tomorrow", "next monday", "7/8"]),
    ) {
        prop_assume!(!words.iter().any(|w| w == "today" || w == "tomorrow"));
        let parser = ExpenseParser::new().unwrap();
        let text = format!("{} {amount}k {keyword}", words.join(" "));
        let parsed = parser.parse(&text, ymd(2025, 6, 30));

        prop_assert!(parsed.amount.is_some());
        prop_assert!(parsed.date.is_some());

        // Put the removed spans back in their original positions.
        let mut rebuilt = String::new();
        let mut cursor = 0;
        let mut spans: Vec<_> = parsed.entities.iter().map(|e| e.span()).collect();
        spans.sort_by_key(|s| s.start);
        for span in &spans {
            prop_assert!(span.start < span.end);
            rebuilt.push_str(&text[cursor..span.start]);
            rebuilt.push_str(&text[span.clone()]);
            cursor = span.end;
        }
        rebuilt.push_str(&text[cursor..]);
        prop_assert_eq!(&rebuilt, &text);

        let spans_text: String = spans.iter().map(|s| &text[s.clone()]).collect();
        prop_assert_eq!(
            strip_whitespace(&parsed.residual_description).len() + strip_whitespace(&spans_text).len(),
            strip_whitespace(&text).len()
        );
        prop_assert_eq!(parsed.residual_description, words.join(" "));
    }
}
