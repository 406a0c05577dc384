//! Bill splitting.
//!
//! [`allocate`] turns a [`SplitRequest`] into per-participant shares:
//!
//! - [`SplitMethod::Equal`]: everyone pays `floor(total / n)`; the first
//!   participant also absorbs the remainder, so the shares always add up to
//!   the total exactly.
//! - [`SplitMethod::Exact`]: shares are the strictly positive amounts the
//!   caller typed. They are *not* balanced against the total; the difference
//!   is reported as [`Allocation::remaining`] and the caller decides whether
//!   to accept it (see [`Allocation::is_balanced`]).

use std::{collections::HashMap, collections::HashSet, fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::AllocationError;

/// Largest `|remaining|` still accepted as balanced: sub-unit rounding slack.
pub const BALANCE_TOLERANCE: Decimal = Decimal::ONE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMethod {
    #[default]
    Equal,
    Exact,
}

impl SplitMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Exact => "exact",
        }
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(Self::Equal),
            "exact" => Ok(Self::Exact),
            other => Err(format!("unknown split method: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitShare {
    pub participant_id: String,
    pub amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRequest {
    pub total_amount: Decimal,
    /// Order matters: in equal mode the first participant takes the remainder.
    pub participant_ids: Vec<String>,
    pub method: SplitMethod,
    /// Only read in exact mode.
    #[serde(default)]
    pub exact_amounts: HashMap<String, Decimal>,
}

impl SplitRequest {
    pub fn equal<I, S>(total_amount: Decimal, participant_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            total_amount,
            participant_ids: participant_ids.into_iter().map(Into::into).collect(),
            method: SplitMethod::Equal,
            exact_amounts: HashMap::new(),
        }
    }

    pub fn exact<I, S>(
        total_amount: Decimal,
        participant_ids: I,
        exact_amounts: HashMap<String, Decimal>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            total_amount,
            participant_ids: participant_ids.into_iter().map(Into::into).collect(),
            method: SplitMethod::Exact,
            exact_amounts,
        }
    }
}

/// Result of a split.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub method: SplitMethod,
    pub total_amount: Decimal,
    /// In `participant_ids` order.
    pub shares: Vec<SplitShare>,
    pub assigned_total: Decimal,
    /// `total_amount - assigned_total`, unrounded. Always zero in equal mode.
    pub remaining: Decimal,
}

impl Allocation {
    /// `|remaining| < BALANCE_TOLERANCE`.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.remaining.abs() < BALANCE_TOLERANCE
    }

    #[must_use]
    pub fn share_of(&self, participant_id: &str) -> Option<Decimal> {
        self.shares
            .iter()
            .find(|share| share.participant_id == participant_id)
            .map(|share| share.amount)
    }
}

fn validate(request: &SplitRequest) -> Result<(), AllocationError> {
    if request.participant_ids.is_empty() {
        return Err(AllocationError::NoParticipants);
    }
    let mut seen = HashSet::with_capacity(request.participant_ids.len());
    for id in &request.participant_ids {
        if !seen.insert(id.as_str()) {
            return Err(AllocationError::DuplicateParticipant(id.clone()));
        }
    }
    if request.total_amount <= Decimal::ZERO {
        return Err(AllocationError::InvalidAmount(request.total_amount));
    }
    if request.method == SplitMethod::Exact {
        // Non-positive entries never produce a share, so a stale key is harmless.
        // Sorted so the reported id does not depend on hash order.
        let mut unknown: Vec<&String> = request
            .exact_amounts
            .iter()
            .filter(|(id, amount)| **amount > Decimal::ZERO && !seen.contains(id.as_str()))
            .map(|(id, _)| id)
            .collect();
        unknown.sort();
        if let Some(id) = unknown.first() {
            return Err(AllocationError::UnknownParticipant((*id).clone()));
        }
    }
    Ok(())
}

/// Splits `request.total_amount` between its participants.
pub fn allocate(request: &SplitRequest) -> Result<Allocation, AllocationError> {
    validate(request)?;
    let shares = match request.method {
        SplitMethod::Equal => equal_shares(request.total_amount, &request.participant_ids),
        SplitMethod::Exact => exact_shares(&request.participant_ids, &request.exact_amounts),
    };
    let assigned_total = shares
        .iter()
        .try_fold(Decimal::ZERO, |acc, share| acc.checked_add(share.amount))
        .ok_or(AllocationError::Overflow)?;
    let remaining = request
        .total_amount
        .checked_sub(assigned_total)
        .ok_or(AllocationError::Overflow)?;
    Ok(Allocation {
        method: request.method,
        total_amount: request.total_amount,
        shares,
        assigned_total,
        remaining,
    })
}

fn equal_shares(total: Decimal, participant_ids: &[String]) -> Vec<SplitShare> {
    let count = Decimal::from(participant_ids.len());
    let share = (total / count).floor();
    let remainder = total - share * count;

    participant_ids
        .iter()
        .enumerate()
        .map(|(idx, id)| SplitShare {
            participant_id: id.clone(),
            amount: if idx == 0 { share + remainder } else { share },
        })
        .collect()
}

/// Only strictly positive amounts produce a share.
fn exact_shares(
    participant_ids: &[String],
    exact_amounts: &HashMap<String, Decimal>,
) -> Vec<SplitShare> {
    participant_ids
        .iter()
        .filter_map(|id| {
            let amount = *exact_amounts.get(id)?;
            (amount > Decimal::ZERO).then(|| SplitShare {
                participant_id: id.clone(),
                amount,
            })
        })
        .collect()
}
