use std::fmt::Write;

use engine::{Allocation, Currency, Money, ParseResult};

const NONE: &str = "-";

pub fn parse_result(parsed: &ParseResult, currency: Currency) -> String {
    let mut out = String::new();
    let amount = parsed
        .amount
        .map_or_else(|| NONE.to_string(), |a| Money::new(a, currency).to_string());
    let date = parsed
        .date
        .map_or_else(|| NONE.to_string(), |d| d.format("%Y-%m-%d").to_string());
    let description = if parsed.residual_description.is_empty() {
        NONE
    } else {
        parsed.residual_description.as_str()
    };

    let _ = writeln!(out, "amount:      {amount}");
    let _ = writeln!(out, "date:        {date}");
    let _ = writeln!(out, "description: {description}");
    for entity in &parsed.entities {
        let _ = writeln!(
            out,
            "  {:?} \"{}\" at {}..{}",
            entity.kind, entity.raw_text, entity.start, entity.end
        );
    }
    out
}

pub fn allocation(allocation: &Allocation, currency: Currency) -> String {
    let money = |amount| Money::new(amount, currency);
    let width = allocation
        .shares
        .iter()
        .map(|share| share.participant_id.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} split of {}",
        allocation.method,
        money(allocation.total_amount)
    );
    for share in &allocation.shares {
        let _ = writeln!(
            out,
            "  {:<width$}  {}",
            share.participant_id,
            money(share.amount)
        );
    }
    let _ = writeln!(out, "assigned:  {}", money(allocation.assigned_total));
    let status = if allocation.is_balanced() {
        "balanced"
    } else {
        "unbalanced"
    };
    let _ = writeln!(
        out,
        "remaining: {} ({status})",
        money(allocation.remaining)
    );
    out
}
