//! Proximity search: points within a fixed radius, nearest first, paginated.
//!
//! The search runs in four steps:
//!
//! 1. Convert [`SEARCH_RADIUS_KM`] into an angular radius for the store.
//! 2. Fetch the coarse candidate set from the [`PointStore`].
//! 3. Compute the exact haversine distance of every candidate, drop anything
//!    past the search radius and stable-sort by distance, so equal distances
//!    keep the store's order.
//! 4. Cut the requested page out of the ranked list.
//!
//! # Example
//!
//! ```no_run
//! use geonear_lib::{find_nearby, Coordinates, MemoryPointStore, NearbyQuery, Pagination};
//!
//! # async fn demo() -> geonear_lib::Result<()> {
//! let store = MemoryPointStore::new();
//! let query = NearbyQuery {
//!     center: Coordinates::new(40.0, -74.0)?,
//!     pagination: Pagination::default(),
//! };
//! let page = find_nearby(&store, &query).await?;
//! assert_eq!(page.total_users, 0);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::geo::{angular_radius, haversine_km};
use crate::paging::{paginate, Pagination};
use crate::point::{Coordinates, Point};
use crate::store::PointStore;

/// Fixed search radius in kilometres.
pub const SEARCH_RADIUS_KM: f64 = 10.0;

/// A validated proximity query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    /// Search center.
    pub center: Coordinates,
    /// Requested page.
    pub pagination: Pagination,
}

/// A point annotated with its distance from the query center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPoint {
    #[serde(flatten)]
    pub point: Point,
    /// Great-circle distance from the center in kilometres.
    pub distance: f64,
}

/// One page of proximity results with paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPage {
    pub current_page: u64,
    pub total_pages: usize,
    pub total_users: usize,
    pub users: Vec<NearbyPoint>,
}

/// Annotate candidates with their distance from `center` and order them
/// nearest first.
///
/// Candidates further than [`SEARCH_RADIUS_KM`] are discarded. The sort is
/// stable, so candidates at equal distance keep their input order.
pub fn rank_by_distance(center: Coordinates, candidates: Vec<Point>) -> Vec<NearbyPoint> {
    let mut ranked: Vec<NearbyPoint> = candidates
        .into_iter()
        .map(|point| NearbyPoint {
            distance: haversine_km(center, point.coordinates()),
            point,
        })
        .filter(|candidate| candidate.distance <= SEARCH_RADIUS_KM)
        .collect();

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

/// Run a proximity query against `store`.
///
/// Store failures propagate unchanged; nothing is retried.
pub async fn find_nearby(store: &dyn PointStore, query: &NearbyQuery) -> Result<NearbyPage> {
    let radius = angular_radius(SEARCH_RADIUS_KM);
    let candidates = store
        .find_within_spherical_cap(query.center, radius)
        .await?;
    let candidate_count = candidates.len();

    let ranked = rank_by_distance(query.center, candidates);
    debug!(
        center = %query.center,
        candidates = candidate_count,
        matches = ranked.len(),
        "ranked proximity candidates"
    );

    let page = paginate(ranked, query.pagination);

    Ok(NearbyPage {
        current_page: page.page,
        total_pages: page.total_pages,
        total_users: page.total,
        users: page.items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: &str, lat: f64, lon: f64) -> Point {
        crate::point::NewPoint::new(id, Coordinates::new(lat, lon).unwrap())
            .unwrap()
            .with_id(id)
    }

    #[test]
    fn rank_orders_by_distance() {
        let center = Coordinates::new(0.0, 0.0).unwrap();
        let ranked = rank_by_distance(
            center,
            vec![
                point("c", 0.03, 0.0),
                point("a", 0.0, 0.0),
                point("b", 0.01, 0.0),
            ],
        );

        let ids: Vec<_> = ranked.iter().map(|r| r.point.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(ranked.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn rank_keeps_store_order_for_ties() {
        let center = Coordinates::new(0.0, 0.0).unwrap();
        // Same distance north and south of the center.
        let ranked = rank_by_distance(
            center,
            vec![
                point("north", 0.01, 0.0),
                point("south", -0.01, 0.0),
                point("origin", 0.0, 0.0),
            ],
        );

        let ids: Vec<_> = ranked.iter().map(|r| r.point.id.as_str()).collect();
        assert_eq!(ids, ["origin", "north", "south"]);
    }

    #[test]
    fn rank_drops_candidates_outside_radius() {
        let center = Coordinates::new(0.0, 0.0).unwrap();
        // ~111 km away: a sloppy store might hand it over anyway.
        let ranked = rank_by_distance(center, vec![point("far", 1.0, 0.0)]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn page_serializes_with_camel_case_envelope() {
        let page = NearbyPage {
            current_page: 1,
            total_pages: 1,
            total_users: 1,
            users: vec![NearbyPoint {
                point: point("a", 40.0, -74.0),
                distance: 0.0,
            }],
        };

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["totalUsers"], 1);
        assert_eq!(json["users"][0]["name"], "a");
        assert_eq!(json["users"][0]["distance"], 0.0);
        assert_eq!(
            json["users"][0]["location"]["coordinates"],
            serde_json::json!([-74.0, 40.0])
        );
    }
}
