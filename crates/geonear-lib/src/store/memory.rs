use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::StoreError;
use crate::geo::central_angle;
use crate::point::{Coordinates, NewPoint, Point};
use crate::store::PointStore;

/// In-process point store.
///
/// Points are returned in insertion order. The spherical-cap check is exact
/// (haversine central angle), which makes this store a faithful stand-in for
/// the MongoDB backend in tests. Identifiers are object ids, like Mongo's.
#[derive(Debug, Default)]
pub struct MemoryPointStore {
    points: RwLock<Vec<Point>>,
}

impl MemoryPointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with already persisted points.
    pub fn with_points(points: Vec<Point>) -> Self {
        Self {
            points: RwLock::new(points),
        }
    }

    /// Number of stored points.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.points.read().map_err(|_| poisoned())?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Snapshot of all stored points in insertion order.
    pub fn points(&self) -> Result<Vec<Point>, StoreError> {
        Ok(self.points.read().map_err(|_| poisoned())?.clone())
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable {
        message: "in-memory store lock poisoned".to_string(),
    }
}

#[async_trait]
impl PointStore for MemoryPointStore {
    async fn find_within_spherical_cap(
        &self,
        center: Coordinates,
        angular_radius: f64,
    ) -> Result<Vec<Point>, StoreError> {
        let points = self.points.read().map_err(|_| poisoned())?;
        Ok(points
            .iter()
            .filter(|p| central_angle(center, p.coordinates()) <= angular_radius)
            .cloned()
            .collect())
    }

    async fn save(&self, point: NewPoint) -> Result<Point, StoreError> {
        let point = point.with_id(ObjectId::new().to_hex());
        self.points
            .write()
            .map_err(|_| poisoned())?
            .push(point.clone());
        Ok(point)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.points.read().map(|_| ()).map_err(|_| poisoned())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
