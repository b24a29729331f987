use std::io::BufRead;
use tally_core::{Document, RejectedLine, SentinelLabels, Transaction};
use thiserror::Error;

use crate::aggregate::{Aggregator, Report};
use crate::builder::{BuildError, TransactionBuilder};
use crate::config::{ConfigError, PipelineConfig};
use crate::line::LineMatcher;
use crate::reconcile::{reconcile, ReconcileError};
use crate::rules::Classifier;

#[derive(Error, Debug)]
pub enum StatementError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line {line_no} ({line:?}): {source}")]
    Field {
        line_no: usize,
        line: String,
        #[source]
        source: BuildError,
    },
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

/// Statement parsing, reconciliation and classification with one
/// configuration.
pub struct Pipeline {
    matcher: LineMatcher,
    builder: TransactionBuilder,
    classifier: Classifier,
    aggregator: Aggregator,
    labels: SentinelLabels,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            matcher: LineMatcher::new(&config.shapes)?,
            builder: TransactionBuilder::new(config.date_formats)?,
            classifier: Classifier::new(config.rules),
            aggregator: Aggregator::new(config.outlier_cutoff, config.labels.clone()),
            labels: config.labels,
        })
    }

    pub fn labels(&self) -> &SentinelLabels {
        &self.labels
    }

    /// Splits raw text into matched transactions and rejected lines.
    /// Transactions are neither reconciled nor classified yet.
    pub fn parse_document<R: BufRead>(&self, name: &str, reader: R) -> Result<Document, StatementError> {
        let mut doc = Document::new(name);

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            let Some(fields) = self.matcher.match_line(&line) else {
                doc.rejected.push(RejectedLine { line_no, text: line });
                continue;
            };

            tracing::trace!(line_no, shape = fields.shape, "matched statement row");
            let tx = self
                .builder
                .build(line_no, &fields)
                .map_err(|source| StatementError::Field {
                    line_no,
                    line: line.clone(),
                    source,
                })?;
            *doc.shape_counts.entry(fields.shape.to_string()).or_insert(0) += 1;
            doc.transactions.push(tx);
        }

        Ok(doc)
    }

    /// Parses, reconciles and classifies one statement.
    pub fn process_document<R: BufRead>(&self, name: &str, reader: R) -> Result<Document, StatementError> {
        let mut doc = self.parse_document(name, reader)?;
        reconcile(&mut doc.transactions)?;
        self.classifier.classify_all(&mut doc.transactions);

        tracing::debug!(
            document = name,
            transactions = doc.transactions.len(),
            rejected = doc.rejected.len(),
            "processed statement"
        );
        Ok(doc)
    }

    pub fn process_str(&self, name: &str, text: &str) -> Result<Document, StatementError> {
        self.process_document(name, text.as_bytes())
    }

    pub fn report(&self, transactions: &[Transaction]) -> Report {
        self.aggregator.aggregate(transactions)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            matcher: LineMatcher::default(),
            builder: TransactionBuilder::default(),
            classifier: Classifier::default(),
            aggregator: Aggregator::new(PipelineConfig::default().outlier_cutoff, SentinelLabels::default()),
            labels: SentinelLabels::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{CategoryRule, MatchKind};
    use tally_core::{Category, Money};

    fn pipeline() -> Pipeline {
        Pipeline::new(PipelineConfig {
            rules: vec![CategoryRule::new(MatchKind::Contains, "GITHUB.COM", "Computers")],
            ..PipelineConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn parse_routes_unmatched_lines_to_rejects() {
        let text = "01/01/2015       Opening Balance\n\
                    03 Apr 2017     POS GITHUB.COM DFMK 20170329                    6.51                                  3,947.28\n";
        let doc = pipeline().parse_document("a.txt", text.as_bytes()).unwrap();
        assert_eq!(doc.name, "a.txt");
        assert_eq!(doc.transactions.len(), 1);
        assert_eq!(doc.rejected, vec![RejectedLine {
            line_no: 1,
            text: "01/01/2015       Opening Balance".to_string(),
        }]);
        assert_eq!(doc.transactions[0].line_no, 2);
        assert_eq!(doc.shape_counts.get("abbrev-month"), Some(&1));
    }

    #[test]
    fn field_error_carries_line_context() {
        // Matches the shape but 31 April does not exist.
        let text = "31 Apr 2017     POS X        6.51        3,947.28\n";
        let err = pipeline().parse_document("a.txt", text.as_bytes()).unwrap_err();
        match err {
            StatementError::Field { line_no, line, source } => {
                assert_eq!(line_no, 1);
                assert!(line.contains("POS X"));
                assert!(matches!(source, BuildError::MalformedDate(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn oversized_amount_is_a_field_error() {
        // Too many digits to be held exactly; summing such rows would overflow.
        let text = "01 Apr 2017     A        0.00        70,000,000,000,000,000,000,000,000,000.00\n";
        let err = pipeline().process_str("huge.txt", text).unwrap_err();
        assert!(matches!(
            err,
            StatementError::Field {
                line_no: 1,
                source: BuildError::MalformedAmount(_),
                ..
            }
        ));
    }

    #[test]
    fn process_reconciles_then_classifies() {
        let text = "01 Apr 2017     BALANCE FORWARD        0.00        100.00\n\
                    02 Apr 2017     POS GITHUB.COM        6.00        94.00\n\
                    03 Apr 2017     POS CORNER SHOP        4.00        90.00\n\
                    04 Apr 2017     SALARY        1,000.00        1,090.00\n";
        let doc = pipeline().process_str("april.txt", text).unwrap();
        let txs = &doc.transactions;
        assert_eq!(txs.len(), 4);
        assert_eq!(txs[0].delta, None);
        assert_eq!(txs[1].delta, Some(Money::from_cents(-600)));
        assert_eq!(txs[1].category, Category::classified("Computers"));
        assert_eq!(txs[2].category, Category::UnclassifiedDebit);
        assert_eq!(txs[3].delta, Some(Money::from_cents(100_000)));
        assert_eq!(txs[3].category, Category::Unclassified);
    }

    #[test]
    fn mismatch_aborts_document() {
        let text = "01 Apr 2017     A        0.00        100.00\n\
                    02 Apr 2017     B        6.00        95.00\n";
        let err = pipeline().process_str("bad.txt", text).unwrap_err();
        assert!(matches!(
            err,
            StatementError::Reconcile(ReconcileError::BalanceMismatch { line_no: 2, .. })
        ));
    }

    #[test]
    fn report_uses_configured_cutoff() {
        let p = Pipeline::new(PipelineConfig {
            outlier_cutoff: Money::from_cents(300),
            ..PipelineConfig::default()
        })
        .unwrap();
        let text = "01 Apr 2017     A        0.00        100.00\n\
                    02 Apr 2017     B        4.00        96.00\n\
                    03 Apr 2017     C        2.00        94.00\n";
        let doc = p.process_str("a.txt", text).unwrap();
        let report = p.report(&doc.transactions);
        assert_eq!(report.review.len(), 1);
        assert_eq!(report.review[0].description, "B");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = PipelineConfig {
            date_formats: vec![],
            ..PipelineConfig::default()
        };
        assert!(matches!(Pipeline::new(cfg), Err(ConfigError::NoDateFormats)));
    }
}
