use serde::{Deserialize, Serialize};
use tally_core::{Category, Transaction};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRule {
    pub kind: MatchKind,
    pub pattern: String,
    pub label: String,
    #[serde(default)]
    pub ignore_case: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Equals,
    #[default]
    Contains,
    Prefix,
}

impl CategoryRule {
    pub fn new(kind: MatchKind, pattern: &str, label: &str) -> Self {
        CategoryRule {
            kind,
            pattern: pattern.to_string(),
            label: label.to_string(),
            ignore_case: false,
        }
    }

    pub fn matches(&self, description: &str) -> bool {
        if self.ignore_case {
            let text = description.to_lowercase();
            let pattern = self.pattern.to_lowercase();
            self.kind.test(&text, &pattern)
        } else {
            self.kind.test(description, &self.pattern)
        }
    }
}

impl MatchKind {
    fn test(self, text: &str, pattern: &str) -> bool {
        match self {
            MatchKind::Equals => text == pattern,
            MatchKind::Contains => text.contains(pattern),
            MatchKind::Prefix => text.starts_with(pattern),
        }
    }
}

/// Ordered rule table. Rules are evaluated exactly in the order given and the
/// first match wins, so narrower rules must come before broader ones.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: Vec<CategoryRule>,
}

impl Classifier {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }


    pub fn find_matching_rule(&self, description: &str) -> Option<&CategoryRule> {
        self.rules.iter().find(|r| r.matches(description))
    }

    pub fn classify(&self, description: &str) -> Category {
        self.find_matching_rule(description)
            .map(|r| Category::classified(r.label.as_str()))
            .unwrap_or(Category::Unclassified)
    }

    /// Assigns the transaction's category. Unmatched debits land in
    /// [`Category::UnclassifiedDebit`]; this relies on the delta, so it must
    /// run after reconciliation.
    pub fn classify_transaction(&self, tx: &mut Transaction) {
        let category = self.classify(&tx.description);
        tx.category = if category == Category::Unclassified && tx.is_debit() {
            Category::UnclassifiedDebit
        } else {
            category
        };
    }

    pub fn classify_all(&self, transactions: &mut [Transaction]) {
        for tx in transactions {
            self.classify_transaction(tx);
        }
    }
}
