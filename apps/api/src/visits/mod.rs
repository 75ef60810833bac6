//! Flat-file visit counter.
//!
//! The counter file holds a single integer. A missing or unparsable file
//! restarts the count at zero. Increments are serialized behind a mutex so
//! concurrent requests never interleave the read-modify-write.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Clone)]
pub struct VisitCounter {
    path: Arc<Mutex<PathBuf>>,
}

impl VisitCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        VisitCounter {
            path: Arc::new(Mutex::new(path.into())),
        }
    }

    /// Bumps the counter and returns the new total.
    pub async fn increment(&self) -> Result<u64, std::io::Error> {
        let path = self.path.lock().await;
        let current = std::fs::read_to_string(&*path)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(0);
        let next = current + 1;
        std::fs::write(&*path, next.to_string())?;
        Ok(next)
    }
}

/// POST /api/v1/visits
///
/// Records one visit and returns the running total.
pub async fn handle_record_visit(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let visits = state
        .visits
        .increment()
        .await
        .context("failed to update visit counter")?;

    info!(visits, at = %Utc::now().to_rfc3339(), "visit recorded");

    Ok(Json(json!({ "visits": visits })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_from_zero_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let counter = VisitCounter::new(dir.path().join("visits.txt"));
        assert_eq!(counter.increment().await.unwrap(), 1);
        assert_eq!(counter.increment().await.unwrap(), 2);
        assert_eq!(counter.increment().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_count_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visits.txt");

        let first = VisitCounter::new(&path);
        first.increment().await.unwrap();
        first.increment().await.unwrap();

        let second = VisitCounter::new(&path);
        assert_eq!(second.increment().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_garbled_file_restarts_at_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visits.txt");
        std::fs::write(&path, "not a number").unwrap();

        let counter = VisitCounter::new(&path);
        assert_eq!(counter.increment().await.unwrap(), 1);
    }
}
