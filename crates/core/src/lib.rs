pub mod category;
pub mod money;
pub mod transaction;

pub use category::{Category, SentinelLabels};
pub use money::Money;
pub use transaction::{Document, RejectedLine, Transaction};
