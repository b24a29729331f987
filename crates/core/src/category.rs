use serde::{Deserialize, Serialize};

/// Spending category assigned to a transaction.
///
/// The two sentinel variants stand for "no rule matched". A transaction starts
/// out as `Unclassified`; unmatched debits are moved to `UnclassifiedDebit` so
/// they can be reviewed separately from unmatched credits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Classified(String),
    #[default]
    Unclassified,
    UnclassifiedDebit,
}

impl Category {
    pub fn classified(label: impl Into<String>) -> Self {
        Category::Classified(label.into())
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, Category::Classified(_))
    }
}

/// Display names for the sentinel categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelLabels {
    pub unclassified: String,
    pub unclassified_debit: String,
}

impl Default for SentinelLabels {
    fn default() -> Self {
        Self {
            unclassified: "in unknown".to_string(),
            unclassified_debit: "unknown".to_string(),
        }
    }
}

impl SentinelLabels {
    pub fn label<'a>(&'a self, category: &'a Category) -> &'a str {
        match category {
            Category::Classified(label) => label,
            Category::Unclassified => &self.unclassified,
            Category::UnclassifiedDebit => &self.unclassified_debit,
        }
    }
}
