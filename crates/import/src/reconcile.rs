use tally_core::{Money, Transaction};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconcileError {
    #[error(
        "Balance mismatch at line {line_no} ({transaction}): balance moved from {previous_balance} \
         to {balance}, a change of {computed}, but the statement amount is {amount}"
    )]
    BalanceMismatch {
        line_no: usize,
        transaction: String,
        previous_balance: Money,
        balance: Money,
        computed: Money,
        amount: Money,
    },
}

/// Derives the signed delta of every transaction from successive balances.
///
/// The first transaction only seeds the running balance. Every later one must
/// move the balance by exactly `+amount` or `-amount`. Deltas are written only
/// once the whole document has been checked, so a failed document is left
/// untouched.
pub fn reconcile(transactions: &mut [Transaction]) -> Result<(), ReconcileError> {
    let Some(first) = transactions.first() else {
        return Ok(());
    };

    let mut running = first.balance;
    let mut deltas: Vec<Money> = Vec::with_capacity(transactions.len().saturating_sub(1));

    for tx in &transactions[1..] {
        let computed = tx.balance - running;
        if computed != tx.amount && computed != -tx.amount {
            tracing::warn!(
                line_no = tx.line_no,
                %computed,
                amount = %tx.amount,
                "balance does not reconcile"
            );
            return Err(ReconcileError::BalanceMismatch {
                line_no: tx.line_no,
                transaction: tx.to_string(),
                previous_balance: running,
                balance: tx.balance,
                computed,
                amount: tx.amount,
            });
        }
        deltas.push(computed);
        running = tx.balance;
    }

    for (tx, delta) in transactions[1..].iter_mut().zip(deltas) {
        tx.delta = Some(delta);
    }
    Ok(())
}
