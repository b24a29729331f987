use std::io::Write;
use tally_core::{SentinelLabels, Transaction};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

pub const HEADER: [&str; 5] = ["date", "description", "diff", "balance", "class"];

/// Writes classified transactions as `date,description,diff,balance,class`.
pub fn export_csv<W: Write>(
    transactions: &[Transaction],
    labels: &SentinelLabels,
    out: W,
) -> Result<(), CsvError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADER)?;

    for tx in transactions {
        let date = tx.date.format("%Y-%m-%d").to_string();
        let diff = tx.signed_delta().to_string();
        let balance = tx.balance.to_string();
        writer.write_record([
            date.as_str(),
            tx.description.as_str(),
            diff.as_str(),
            balance.as_str(),
            labels.label(&tx.category),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
