//! Request bodies sent to the KinMan backend.
//!
//! The backend speaks camelCase JSON and expects amounts as plain numbers.

pub mod group {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SplitType {
        Equal,
        Exact,
    }

    /// One member's share of a group expense.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SplitEntry {
        pub user_id: String,
        #[serde(with = "rust_decimal::serde::float")]
        pub amount: Decimal,
    }

    /// Request body for creating a group expense.
    ///
    /// `splits` must add up to `amount` (within one unit) before the client
    /// sends it; the server rejects unbalanced bodies.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GroupExpenseNew {
        pub description: String,
        #[serde(with = "rust_decimal::serde::float")]
        pub amount: Decimal,
        pub split_type: SplitType,
        pub splits: Vec<SplitEntry>,
    }
}

pub mod transaction {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};

    use super::group::SplitEntry;

    /// Request body for creating a transaction.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionNew {
        /// Must be > 0.
        #[serde(with = "rust_decimal::serde::float")]
        pub amount: Decimal,
        /// Calendar day in the user's timezone, `YYYY-MM-DD`.
        pub date: NaiveDate,
        pub note: Option<String>,
        pub category_id: String,
        pub wallet_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub group_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub splits: Option<Vec<SplitEntry>>,
    }
}

#[cfg(test)]
mod tests {
    use super::group::*;
    use super::transaction::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn transaction_uses_camel_case_and_numbers() {
        let body = TransactionNew {
            amount: dec!(50000),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            note: Some("Coffee".to_string()),
            category_id: "cat-1".to_string(),
            wallet_id: "wal-1".to_string(),
            group_id: None,
            splits: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["amount"], 50000.0);
        assert_eq!(json["date"], "2024-03-15");
        assert_eq!(json["categoryId"], "cat-1");
        assert_eq!(json["walletId"], "wal-1");
        assert!(json.get("groupId").is_none());
        assert!(json.get("splits").is_none());
    }

    #[test]
    fn group_expense_shape() {
        let body = GroupExpenseNew {
            description: "Dinner".to_string(),
            amount: dec!(100),
            split_type: SplitType::Equal,
            splits: vec![
                SplitEntry {
                    user_id: "a".to_string(),
                    amount: dec!(34),
                },
                SplitEntry {
                    user_id: "b".to_string(),
                    amount: dec!(66),
                },
            ],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["splitType"], "equal");
        assert_eq!(json["splits"][0]["userId"], "a");
        assert_eq!(json["splits"][1]["amount"], 66.0);

        let back: GroupExpenseNew = serde_json::from_value(json).unwrap();
        assert_eq!(back, body);
    }
}
