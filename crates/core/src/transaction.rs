use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::category::Category;
use super::money::Money;

/// One line item from a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// 1-based line number in the source document.
    pub line_no: usize,
    pub date: NaiveDate,
    pub description: String,
    /// Unsigned magnitude as printed on the statement.
    pub amount: Money,
    /// Signed balance change. `None` until reconciled, and always `None` for
    /// the first transaction of a document.
    pub delta: Option<Money>,
    /// Account balance after this transaction.
    pub balance: Money,
    pub category: Category,
}

impl Transaction {
    pub fn new(
        line_no: usize,
        date: NaiveDate,
        description: String,
        amount: Money,
        balance: Money,
    ) -> Self {
        Transaction {
            line_no,
            date,
            description,
            amount,
            delta: None,
            balance,
            category: Category::Unclassified,
        }
    }

    /// The signed delta, or zero when none was derived.
    pub fn signed_delta(&self) -> Money {
        self.delta.unwrap_or_else(Money::zero)
    }

    pub fn is_debit(&self) -> bool {
        self.delta.is_some_and(Money::is_negative)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount,
            self.balance
        )
    }
}

/// A raw line that did not fit any statement row shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedLine {
    pub line_no: usize,
    pub text: String,
}

/// The transactions extracted from one source file, in statement order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub transactions: Vec<Transaction>,
    pub rejected: Vec<RejectedLine>,
    /// Matched line count per line-shape name.
    pub shape_counts: BTreeMap<String, usize>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Document {
            name: name.into(),
            ..Default::default()
        }
    }
}
