use chrono::NaiveDate;
use tally_core::Transaction;
use thiserror::Error;

use crate::amount::{parse_amount, AmountError};
use crate::config::ConfigError;
use crate::line::MatchedLine;

pub const DEFAULT_DATE_FORMATS: [&str; 2] = ["%d %b %Y", "%d/%m/%Y"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("{0}")]
    MalformedAmount(#[from] AmountError),
    #[error("Malformed date: {0:?}")]
    MalformedDate(String),
}

/// Turns matched line fields into a typed [`Transaction`].
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    date_formats: Vec<String>,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self {
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl TransactionBuilder {
    pub fn new(date_formats: Vec<String>) -> Result<Self, ConfigError> {
        if date_formats.is_empty() {
            return Err(ConfigError::NoDateFormats);
        }
        Ok(Self { date_formats })
    }

    pub fn build(&self, line_no: usize, fields: &MatchedLine<'_>) -> Result<Transaction, BuildError> {
        let date = self.parse_date(fields.date)?;
        let amount = parse_amount(fields.amount)?;
        let balance = parse_amount(fields.balance)?;

        Ok(Transaction::new(
            line_no,
            date,
            fields.description.trim().to_string(),
            amount,
            balance,
        ))
    }

    /// Tries each configured format in order.
    pub fn parse_date(&self, s: &str) -> Result<NaiveDate, BuildError> {
        let s = s.trim();
        self.date_formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .ok_or_else(|| BuildError::MalformedDate(s.to_string()))
    }
}
