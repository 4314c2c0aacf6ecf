//! In-memory row store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use paging_core::RowStore;

use super::MockRow;

/// A call received by the mock store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    /// `count()`.
    Count,
    /// `select_range(after_id, limit)`.
    SelectRange {
        /// Exclusive lower bound on the identifier.
        after_id: Option<i64>,
        /// Maximum number of rows.
        limit: i64,
    },
    /// `select_page(limit, offset)`.
    SelectPage {
        /// Maximum number of rows.
        limit: i64,
        /// Number of rows skipped.
        offset: i64,
    },
}

/// A write applied to the store right after a given call, standing in for a
/// concurrent writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMutation {
    /// Appends rows with fresh identifiers.
    Insert(usize),
    /// Removes the rows with the smallest identifiers.
    DeleteFirst(usize),
    /// Removes the rows with the largest identifiers.
    DeleteLast(usize),
}

/// Error returned by the mock store.
#[derive(Debug, Clone, thiserror::Error)]
#[error("mock row store failure on call #{call}: {message}")]
pub struct MockStoreError {
    /// 1-based number of the failing call.
    pub call: usize,
    /// Failure description.
    pub message: String,
    /// Whether the failure is reported as retryable.
    pub transient: bool,
}

#[derive(Debug, Default)]
struct MockState {
    rows: Vec<MockRow>,
    last_id: i64,
    calls: Vec<MockCall>,
    failures: Vec<(usize, bool)>,
    mutations: Vec<(usize, MockMutation)>,
    latency: Option<Duration>,
}

impl MockState {
    fn insert(&mut self, name: Option<String>) -> MockRow {
        self.last_id += 1;
        let id = self.last_id;
        let row = MockRow::new(id, name.unwrap_or_else(|| format!("User #{id}")));
        self.rows.push(row.clone());
        row
    }

    fn apply(&mut self, mutation: MockMutation) {
        match mutation {
            MockMutation::Insert(count) => {
                for _ in 0..count {
                    self.insert(None);
                }
            }
            MockMutation::DeleteFirst(count) => {
                let count = count.min(self.rows.len());
                self.rows.drain(..count);
            }
            MockMutation::DeleteLast(count) => {
                let keep = self.rows.len().saturating_sub(count);
                self.rows.truncate(keep);
            }
        }
    }
}

/// In-memory [`RowStore`] with call recording and failure injection.
///
/// Clones share the same rows, so a test can hand one clone to an engine and
/// keep another to inspect or mutate the store.
#[derive(Debug, Clone, Default)]
pub struct MockRowStore {
    state: Arc<Mutex<MockState>>,
}

impl MockRowStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `count` rows with identifiers `1..=count`.
    pub fn with_rows(count: i64) -> Self {
        let store = Self::new();
        store.bulk_insert(count);
        store
    }

    /// Fails the given 1-based call with a permanent error.
    pub fn with_failure_on_call(self, call: usize) -> Self {
        self.lock().failures.push((call, false));
        self
    }

    /// Fails the given 1-based call with a transient error.
    pub fn with_transient_failure_on_call(self, call: usize) -> Self {
        self.lock().failures.push((call, true));
        self
    }

    /// Delays every call by the given duration.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.lock().latency = Some(latency);
        self
    }

    /// Applies a write right after the given 1-based call completes.
    pub fn with_mutation_after_call(self, call: usize, mutation: MockMutation) -> Self {
        self.lock().mutations.push((call, mutation));
        self
    }

    /// Inserts a row and returns it with its assigned identifier.
    pub fn insert(&self, name: impl Into<String>) -> MockRow {
        self.lock().insert(Some(name.into()))
    }

    /// Inserts `count` rows named `User #1` to `User #count`.
    ///
    /// Returns the number of inserted rows; non-positive counts are a no-op.
    pub fn bulk_insert(&self, count: i64) -> usize {
        let mut state = self.lock();
        let mut inserted = 0;
        for i in 1..=count {
            state.insert(Some(format!("User #{i}")));
            inserted += 1;
        }
        inserted
    }

    /// Removes every row and restarts the identifier sequence at 1.
    pub fn delete_all_and_reset(&self) {
        let mut state = self.lock();
        state.rows.clear();
        state.last_id = 0;
    }

    /// Returns a snapshot of all rows in identifier order.
    pub fn rows(&self) -> Vec<MockRow> {
        self.lock().rows.clone()
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    /// Returns true if the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.lock().rows.is_empty()
    }

    /// Returns every call received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    /// Returns the number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Forgets the recorded calls. Numbering restarts at 1, and pending
    /// failure and mutation schedules match against the new numbers.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn serve<T, F>(&self, call: MockCall, query: F) -> Result<T, MockStoreError>
    where
        F: FnOnce(&[MockRow]) -> Result<T, String> + Send,
    {
        let (number, latency) = {
            let mut state = self.lock();
            state.calls.push(call);
            (state.calls.len(), state.latency)
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut state = self.lock();
        let failure = state
            .failures
            .iter()
            .find(|(at, _)| *at == number)
            .map(|(_, transient)| *transient);

        let result = match failure {
            Some(transient) => Err(MockStoreError {
                call: number,
                message: "injected failure".to_owned(),
                transient,
            }),
            None => query(&state.rows).map_err(|message| MockStoreError {
                call: number,
                message,
                transient: false,
            }),
        };

        let due: Vec<MockMutation> = state
            .mutations
            .iter()
            .filter(|(at, _)| *at == number)
            .map(|(_, mutation)| *mutation)
            .collect();
        for mutation in due {
            state.apply(mutation);
        }

        result
    }
}

fn to_usize(value: i64, what: &str) -> Result<usize, String> {
    usize::try_from(value).map_err(|_| format!("{what} must not be negative, got {value}"))
}

impl RowStore for MockRowStore {
    type Error = MockStoreError;
    type Row = MockRow;

    async fn count(&self) -> Result<i64, Self::Error> {
        self.serve(MockCall::Count, |rows| Ok(rows.len() as i64))
            .await
    }

    async fn select_range(
        &self,
        after_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<Self::Row>, Self::Error> {
        self.serve(MockCall::SelectRange { after_id, limit }, |rows| {
            let limit = to_usize(limit, "LIMIT")?;
            Ok(rows
                .iter()
                .filter(|row| after_id.is_none_or(|after| row.id > after))
                .take(limit)
                .cloned()
                .collect())
        })
        .await
    }

    async fn select_page(&self, limit: i64, offset: i64) -> Result<Vec<Self::Row>, Self::Error> {
        self.serve(MockCall::SelectPage { limit, offset }, |rows| {
            let limit = to_usize(limit, "LIMIT")?;
            let offset = to_usize(offset, "OFFSET")?;
            Ok(rows.iter().skip(offset).take(limit).cloned().collect())
        })
        .await
    }

    fn is_transient(error: &Self::Error) -> bool {
        error.transient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sequence_and_reset() {
        let store = MockRowStore::with_rows(3);
        assert_eq!(store.insert("late").id, 4);

        store.delete_all_and_reset();
        assert!(store.is_empty());
        assert_eq!(store.insert("first again").id, 1);
    }

    #[tokio::test]
    async fn test_queries() {
        let store = MockRowStore::with_rows(7);

        assert_eq!(store.count().await.ok(), Some(7));

        let ids: Vec<i64> = store
            .select_range(Some(5), 3)
            .await
            .map(|rows| rows.iter().map(|row| row.id).collect())
            .unwrap_or_default();
        assert_eq!(ids, vec![6, 7]);

        let ids: Vec<i64> = store
            .select_page(2, 4)
            .await
            .map(|rows| rows.iter().map(|row| row.id).collect())
            .unwrap_or_default();
        assert_eq!(ids, vec![5, 6]);

        assert_eq!(store.call_count(), 3);
    }

    #[tokio::test]
    async fn test_negative_arguments_fail() {
        let store = MockRowStore::with_rows(2);
        assert!(store.select_page(-1, 0).await.is_err());
        assert!(store.select_range(None, -1).await.is_err());
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = MockRowStore::with_rows(2).with_transient_failure_on_call(2);

        assert!(store.count().await.is_ok());
        let error = store.count().await.unwrap_err();
        assert_eq!(error.call, 2);
        assert!(MockRowStore::is_transient(&error));
        assert!(store.count().await.is_ok());
    }

    #[tokio::test]
    async fn test_mutation_after_call() {
        let store = MockRowStore::with_rows(5)
            .with_mutation_after_call(1, MockMutation::DeleteFirst(2))
            .with_mutation_after_call(2, MockMutation::Insert(1));

        assert_eq!(store.count().await.ok(), Some(5));
        assert_eq!(store.count().await.ok(), Some(3));
        assert_eq!(store.count().await.ok(), Some(4));
        assert_eq!(store.rows().last().map(|row| row.id), Some(6));
    }
}
