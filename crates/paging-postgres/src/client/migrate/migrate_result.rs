//! Migration status and outcome.

use std::time::Duration;

use serde::Serialize;

/// Applied and pending embedded migrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    /// Applied migration versions, oldest first.
    pub applied_versions: Vec<String>,
    /// Embedded migration versions not yet applied, oldest first.
    pub pending_versions: Vec<String>,
}

impl MigrationStatus {
    /// Creates a new migration status.
    pub fn new(
        applied_versions: impl Into<Vec<String>>,
        pending_versions: impl Into<Vec<String>>,
    ) -> Self {
        Self {
            applied_versions: applied_versions.into(),
            pending_versions: pending_versions.into(),
        }
    }

    /// Returns the number of applied migrations.
    #[inline]
    pub fn applied_migrations(&self) -> usize {
        self.applied_versions.len()
    }

    /// Returns the number of pending migrations.
    #[inline]
    pub fn pending_migrations(&self) -> usize {
        self.pending_versions.len()
    }

    /// Returns true if all embedded migrations have been applied.
    #[inline]
    pub fn is_up_to_date(&self) -> bool {
        self.pending_versions.is_empty()
    }
}

/// Outcome of [`run_pending_migrations`].
///
/// [`run_pending_migrations`]: crate::run_pending_migrations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationResult {
    /// Wall-clock time of the whole run.
    pub duration: Duration,
    /// Versions applied by this run, oldest first.
    pub processed_versions: Vec<String>,
}

impl MigrationResult {
    /// Creates a new migration result.
    pub fn new(duration: Duration, processed_versions: Vec<String>) -> Self {
        Self {
            duration,
            processed_versions,
        }
    }

    /// Returns whether the run found nothing to apply.
    pub fn is_no_op(&self) -> bool {
        self.processed_versions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_status() {
        let status = MigrationStatus::new(vec![], vec!["20240601000000".to_string()]);
        assert!(!status.is_up_to_date());
        assert_eq!(status.pending_migrations(), 1);
    }

    #[test]
    fn test_up_to_date_status() {
        let status = MigrationStatus::new(vec!["20240601000000".to_string()], vec![]);
        assert!(status.is_up_to_date());
        assert_eq!(status.applied_migrations(), 1);
    }

    #[test]
    fn test_no_op_result() {
        assert!(MigrationResult::new(Duration::from_millis(3), vec![]).is_no_op());
        assert!(!MigrationResult::new(Duration::ZERO, vec!["1".to_string()]).is_no_op());
    }
}
