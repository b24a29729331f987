use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tally_core::{Category, Money, SentinelLabels, Transaction};

/// Signed total of one rendered category label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub total: Money,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Sum of all signed deltas.
    pub total: Money,
    /// Sum of signed deltas of transactions with a real category.
    pub classified: Money,
    /// `classified / total` as a percentage with two decimals; `None` when
    /// the total is zero.
    pub classified_pct: Option<Decimal>,
    /// Ascending by total.
    pub buckets: Vec<Bucket>,
    /// Unclassified debits whose amount exceeds the cutoff, in input order.
    pub review: Vec<Transaction>,
}

/// Buckets are keyed by the rendered label, so a rule label that equals a
/// sentinel label shares that sentinel's bucket.
pub struct Aggregator {
    outlier_cutoff: Money,
    labels: SentinelLabels,
}

impl Aggregator {
    pub fn new(outlier_cutoff: Money, labels: SentinelLabels) -> Self {
        Self {
            outlier_cutoff,
            labels,
        }
    }

    pub fn aggregate(&self, transactions: &[Transaction]) -> Report {
        let mut total = Money::zero();
        let mut classified = Money::zero();
        let mut sums: HashMap<&str, (Money, usize)> = HashMap::new();
        let mut review = Vec::new();

        for tx in transactions {
            let delta = tx.signed_delta();
            total = total + delta;
            if tx.category.is_classified() {
                classified = classified + delta;
            }

            let label = self.labels.label(&tx.category);
            let entry = sums.entry(label).or_insert((Money::zero(), 0));
            entry.0 = entry.0 + delta;
            entry.1 += 1;

            if tx.category == Category::UnclassifiedDebit && tx.amount > self.outlier_cutoff {
                review.push(tx.clone());
            }
        }

        let mut buckets: Vec<Bucket> = sums
            .into_iter()
            .map(|(label, (total, count))| Bucket {
                label: label.to_string(),
                total,
                count,
            })
            .collect();
        // Ties broken by label so output is stable.
        buckets.sort_by(|a, b| a.total.cmp(&b.total).then_with(|| a.label.cmp(&b.label)));

        Report {
            total,
            classified,
            classified_pct: percentage(classified, total),
            buckets,
            review,
        }
    }
}

fn percentage(part: Money, whole: Money) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    let pct = part.as_decimal().checked_mul(Decimal::ONE_HUNDRED)?;
    Some(pct.checked_div(whole.as_decimal())?.round_dp(2))
}
