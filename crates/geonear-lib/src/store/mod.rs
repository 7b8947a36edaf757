//! Point persistence.
//!
//! The proximity search never walks a spatial index itself. It asks a
//! [`PointStore`] for every point inside a spherical cap and treats the answer
//! as a coarse superset that it re-ranks on its own.
//!
//! Two backends ship with the crate:
//!
//! - [`MongoPointStore`]: production backend using a `2dsphere` index and
//!   `$geoWithin`/`$centerSphere`.
//! - [`MemoryPointStore`]: insertion-ordered in-process store for local
//!   development and tests.

mod memory;
mod mongo;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::point::{Coordinates, NewPoint, Point};

pub use memory::MemoryPointStore;
pub use mongo::{
    spherical_cap_filter, MongoPointStore, PointDocument, DEFAULT_COLLECTION, DEFAULT_DATABASE,
};

/// Storage backend for points.
///
/// Implementations own their concurrency control; the service shares one
/// instance across all in-flight requests.
#[async_trait]
pub trait PointStore: Send + Sync {
    /// Return every point within `angular_radius` radians of `center`.
    ///
    /// The result may be a superset of the exact answer. Order is whatever the
    /// backend returns and is used as the tie-break when ranking.
    async fn find_within_spherical_cap(
        &self,
        center: Coordinates,
        angular_radius: f64,
    ) -> Result<Vec<Point>, StoreError>;

    /// Persist a new point and return it with its assigned identifier.
    async fn save(&self, point: NewPoint) -> Result<Point, StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
