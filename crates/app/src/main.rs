use std::collections::HashMap;

use clap::Parser;
use engine::{Currency, ExpenseParser, Money, SplitRequest, allocate};

use crate::config::{AppConfig, Cli, Command, DraftArgs, ParseArgs, SplitArgs};
use crate::error::{AppError, Result};

mod config;
mod drafts;
mod error;
mod render;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load(&cli)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "kinman={level},engine={level}",
            level = settings.level
        ))
        .init();
    tracing::debug!("settings: {settings:?}");

    match cli.command {
        Command::Parse(args) => run_parse(&settings, &args),
        Command::Draft(args) => run_draft(&settings, args),
        Command::Split(args) => run_split(&settings, &args),
    }
}

fn run_parse(settings: &AppConfig, args: &ParseArgs) -> Result<()> {
    let today = match args.date {
        Some(date) => date,
        None => settings.today()?,
    };
    let parser = ExpenseParser::new()?;
    let parsed = parser.parse(&args.text(), today);
    tracing::debug!(
        "parsed {} entities relative to {today}",
        parsed.entities.len()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        print!("{}", render::parse_result(&parsed, settings.currency()?));
    }
    Ok(())
}

fn run_draft(settings: &AppConfig, args: DraftArgs) -> Result<()> {
    let today = match args.date {
        Some(date) => date,
        None => settings.today()?,
    };
    let parser = ExpenseParser::new()?;
    let parsed = parser.parse(&args.text(), today);

    let body = drafts::transaction(
        &parsed,
        today,
        drafts::DraftTarget {
            category_id: args.category,
            wallet_id: args.wallet,
            group_id: args.group,
        },
    )?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

fn run_split(settings: &AppConfig, args: &SplitArgs) -> Result<()> {
    let currency = settings.currency()?;
    let request = split_request(args, currency)?;
    let allocation = allocate(&request)?;
    tracing::info!(
        "{} split of {} between {} participants",
        allocation.method,
        allocation.total_amount,
        request.participant_ids.len()
    );
    if !allocation.is_balanced() {
        tracing::warn!("split is off by {}", allocation.remaining);
    }

    if args.json {
        let body = drafts::group_expense(&args.description, &allocation)?;
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{}", render::allocation(&allocation, currency));
    }
    Ok(())
}

/// Builds the request from CLI arguments.
///
/// Without `--exact` the split is equal. With it, the participants default to
/// the `--exact` ids in the order given.
fn split_request(args: &SplitArgs, currency: Currency) -> Result<SplitRequest> {
    let total = Money::parse(&args.total, currency)?.amount;
    if args.exact.is_empty() {
        return Ok(SplitRequest::equal(total, args.participants.iter().cloned()));
    }

    let mut order: Vec<String> = Vec::with_capacity(args.exact.len());
    let mut amounts: HashMap<String, rust_decimal::Decimal> = HashMap::new();
    for pair in &args.exact {
        let (id, amount) = pair
            .split_once('=')
            .ok_or_else(|| AppError::InvalidArgument(format!("expected ID=AMOUNT, got {pair}")))?;
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::InvalidArgument(format!("missing id in {pair}")));
        }
        let amount = Money::parse(amount, currency)?.amount;
        if amounts.insert(id.to_string(), amount).is_some() {
            return Err(AppError::InvalidArgument(format!("{id} given twice")));
        }
        order.push(id.to_string());
    }

    let participants = if args.participants.is_empty() {
        order
    } else {
        args.participants.clone()
    };
    Ok(SplitRequest::exact(total, participants, amounts))
}
