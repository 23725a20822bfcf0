//! Session-lifetime transaction storage.
//!
//! The collection lives behind a copy-on-write snapshot: readers get an `Arc`
//! to an immutable vector and never observe a half-applied mutation, while
//! writers build the next vector and swap it in under the write lock.

mod sample;

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::error::FinanceError;
use crate::models::{check_amount, Transaction};

pub(crate) use sample::sample_transactions;

pub(crate) type Snapshot = Arc<Vec<Transaction>>;

#[derive(Debug, Default)]
struct State {
    transactions: Snapshot,
    version: u64,
}

#[derive(Debug, Default)]
pub(crate) struct TransactionStore {
    state: RwLock<State>,
}

impl TransactionStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add one transaction. Zero or out-of-range amounts are rejected and leave
    /// the store untouched.
    pub(crate) fn append(&self, txn: Transaction) -> Result<(), FinanceError> {
        check_amount(txn.amount).map_err(FinanceError::InvalidTransaction)?;
        let mut state = self.write();
        let mut next = Vec::with_capacity(state.transactions.len() + 1);
        next.extend(state.transactions.iter().cloned());
        next.push(txn);
        state.transactions = Arc::new(next);
        state.version += 1;
        debug!(count = state.transactions.len(), version = state.version, "appended transaction");
        Ok(())
    }

    /// Swap the entire collection in one step (import, clear, sample load).
    pub(crate) fn replace_all(&self, transactions: Vec<Transaction>) {
        let mut state = self.write();
        state.transactions = Arc::new(transactions);
        state.version += 1;
        info!(count = state.transactions.len(), version = state.version, "replaced transactions");
    }

    /// Append a batch atomically, e.g. a committed import merged into the session.
    pub(crate) fn extend(&self, transactions: Vec<Transaction>) {
        let mut state = self.write();
        let mut next = Vec::with_capacity(state.transactions.len() + transactions.len());
        next.extend(state.transactions.iter().cloned());
        next.extend(transactions);
        state.transactions = Arc::new(next);
        state.version += 1;
        info!(count = state.transactions.len(), version = state.version, "merged transactions");
    }

    pub(crate) fn clear(&self) {
        self.replace_all(Vec::new());
    }

    pub(crate) fn load_sample(&self) {
        self.replace_all(sample_transactions());
    }

    /// Current contents. The returned snapshot is unaffected by later mutations.
    pub(crate) fn all(&self) -> Snapshot {
        Arc::clone(&self.read().transactions)
    }

    /// Drop exact duplicates (first occurrence wins) and sort by date, keeping
    /// insertion order among equal dates.
    pub(crate) fn deduplicate(&self) -> Snapshot {
        let mut state = self.write();
        let before = state.transactions.len();
        let mut seen = HashSet::with_capacity(before);
        let mut next: Vec<Transaction> = state
            .transactions
            .iter()
            .filter(|t| seen.insert(*t))
            .cloned()
            .collect();
        next.sort_by_key(|t| t.date);
        state.transactions = Arc::new(next);
        state.version += 1;
        info!(
            removed = before - state.transactions.len(),
            version = state.version,
            "deduplicated transactions"
        );
        Arc::clone(&state.transactions)
    }

    pub(crate) fn len(&self) -> usize {
        self.read().transactions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.read().transactions.is_empty()
    }

    /// Bumped on every mutation; pairs with a filter as a cache key.
    pub(crate) fn version(&self) -> u64 {
        self.read().version
    }

    // The guarded state is only ever replaced wholesale, so a poisoned lock
    // still holds a consistent snapshot.
    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests;
