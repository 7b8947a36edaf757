//! Test utilities for handler testing.
//!
//! This module provides point stores that let tests observe or break the
//! persistence layer:
//!
//! - [`CountingStore`]: in-memory store that counts every call it receives
//! - [`FailingStore`]: store whose every operation fails

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use geonear_lib::{Coordinates, MemoryPointStore, NewPoint, Point, PointStore, StoreError};

use crate::state::AppState;

/// In-memory store that records how often it was queried and written.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryPointStore,
    finds: AtomicUsize,
    saves: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of spherical-cap queries received.
    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    /// Number of save calls received.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Total number of store accesses (queries and writes).
    pub fn calls(&self) -> usize {
        self.finds() + self.saves()
    }

    /// Points currently stored.
    pub fn points(&self) -> Result<Vec<Point>, StoreError> {
        self.inner.points()
    }
}

#[async_trait]
impl PointStore for CountingStore {
    async fn find_within_spherical_cap(
        &self,
        center: Coordinates,
        angular_radius: f64,
    ) -> Result<Vec<Point>, StoreError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner
            .find_within_spherical_cap(center, angular_radius)
            .await
    }

    async fn save(&self, point: NewPoint) -> Result<Point, StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(point).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }

    fn backend(&self) -> &'static str {
        "counting"
    }
}

/// Store whose every operation fails as if the database were down.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Unavailable {
        message: "simulated outage".to_string(),
    }
}

#[async_trait]
impl PointStore for FailingStore {
    async fn find_within_spherical_cap(
        &self,
        _center: Coordinates,
        _angular_radius: f64,
    ) -> Result<Vec<Point>, StoreError> {
        Err(unavailable())
    }

    async fn save(&self, _point: NewPoint) -> Result<Point, StoreError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

/// Build an [`AppState`] around a shared [`CountingStore`], returning both.
pub fn counting_state() -> (AppState, Arc<CountingStore>) {
    let store = Arc::new(CountingStore::new());
    (AppState::new(store.clone()), store)
}

/// Build an [`AppState`] whose store always fails.
pub fn failing_state() -> AppState {
    AppState::from_store(FailingStore)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counting_store_counts_calls() {
        let (state, store) = counting_state();
        let point = NewPoint::new("a", Coordinates::new(1.0, 1.0).unwrap()).unwrap();

        state.store().save(point).await.unwrap();
        state
            .store()
            .find_within_spherical_cap(Coordinates::new(1.0, 1.0).unwrap(), 0.1)
            .await
            .unwrap();

        assert_eq!(store.saves(), 1);
        assert_eq!(store.finds(), 1);
        assert_eq!(store.calls(), 2);
        assert_eq!(store.points().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_store_fails() {
        let state = failing_state();
        assert!(state.store().ping().await.is_err());
    }
}
