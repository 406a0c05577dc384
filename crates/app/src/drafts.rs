//! Request bodies pre-filled from parser and allocator output.

use api_types::{
    group::{GroupExpenseNew, SplitEntry, SplitType},
    transaction::TransactionNew,
};
use chrono::NaiveDate;
use engine::{Allocation, ParseResult, SplitMethod};

use crate::error::{AppError, Result};

pub struct DraftTarget {
    pub category_id: String,
    pub wallet_id: String,
    pub group_id: Option<String>,
}

fn split_type(method: SplitMethod) -> SplitType {
    match method {
        SplitMethod::Equal => SplitType::Equal,
        SplitMethod::Exact => SplitType::Exact,
    }
}

fn split_entries(allocation: &Allocation) -> Vec<SplitEntry> {
    allocation
        .shares
        .iter()
        .map(|share| SplitEntry {
            user_id: share.participant_id.clone(),
            amount: share.amount,
        })
        .collect()
}

/// A parse without an amount cannot be submitted. A missing date means today.
pub fn transaction(
    parsed: &ParseResult,
    today: NaiveDate,
    target: DraftTarget,
) -> Result<TransactionNew> {
    let amount = parsed
        .amount
        .ok_or_else(|| AppError::MissingAmount(parsed.original_text.clone()))?;
    let note = (!parsed.residual_description.is_empty())
        .then(|| parsed.residual_description.clone());

    Ok(TransactionNew {
        amount,
        date: parsed.date.unwrap_or(today),
        note,
        category_id: target.category_id,
        wallet_id: target.wallet_id,
        group_id: target.group_id,
        splits: None,
    })
}

/// Refuses unbalanced exact splits, like the submit button would.
pub fn group_expense(description: &str, allocation: &Allocation) -> Result<GroupExpenseNew> {
    if !allocation.is_balanced() {
        return Err(AppError::Unbalanced(allocation.remaining.to_string()));
    }
    Ok(GroupExpenseNew {
        description: description.to_string(),
        amount: allocation.total_amount,
        split_type: split_type(allocation.method),
        splits: split_entries(allocation),
    })
}
