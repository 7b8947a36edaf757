//! geonear library entry points.
//!
//! This crate owns the domain of the proximity service: validated coordinates,
//! point records, great-circle distance, pagination and the proximity search
//! itself. Persistence sits behind the [`PointStore`] trait so the HTTP layer
//! only wires a backend in and calls the functions exported here.
//!

pub mod error;
pub mod geo;
pub mod paging;
pub mod point;
pub mod proximity;
pub mod store;

pub use error::{Error, Result, StoreError, ValidationError};
pub use geo::{angular_radius, haversine_km, EARTH_MEAN_RADIUS_KM, STORE_EARTH_RADIUS_KM};
pub use paging::{paginate, PageSlice, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use point::{Coordinates, GeoJsonPoint, NewPoint, Point};
pub use proximity::{
    find_nearby, rank_by_distance, NearbyPage, NearbyPoint, NearbyQuery, SEARCH_RADIUS_KM,
};
pub use store::{
    MemoryPointStore, MongoPointStore, PointStore, DEFAULT_COLLECTION, DEFAULT_DATABASE,
};
