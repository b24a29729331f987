pub mod aggregate;
pub mod amount;
pub mod builder;
pub mod config;
pub mod csv;
pub mod line;
pub mod reconcile;
pub mod rules;
pub mod statement;

pub use aggregate::{Aggregator, Bucket, Report};
pub use amount::{parse_amount, AmountError};
pub use builder::{BuildError, TransactionBuilder};
pub use config::{ConfigError, PipelineConfig};
pub use self::csv::{export_csv, CsvError};
pub use line::{LineMatcher, LineShape, MatchedLine};
pub use reconcile::{reconcile, ReconcileError};
pub use rules::{CategoryRule, Classifier, MatchKind};
pub use statement::{Pipeline, StatementError};
