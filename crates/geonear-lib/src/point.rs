//! Point records and the validated coordinates they are built from.
//!
//! A [`Point`] is the only entity the service knows about. Its location is
//! kept in GeoJSON form (`{"type":"Point","coordinates":[lon, lat]}`), which
//! is also the shape the store's spherical index expects. Longitude always
//! comes first in the coordinate pair.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A latitude/longitude pair in degrees, checked to be finite and in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Inclusive latitude bounds in degrees.
    pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
    /// Inclusive longitude bounds in degrees.
    pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

    /// Build coordinates from numeric degrees.
    ///
    /// Fails with [`ValidationError::InvalidCoordinates`] for non-finite or
    /// out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let (lat_min, lat_max) = Self::LATITUDE_RANGE;
        let (lon_min, lon_max) = Self::LONGITUDE_RANGE;

        if !latitude.is_finite()
            || !longitude.is_finite()
            || !(lat_min..=lat_max).contains(&latitude)
            || !(lon_min..=lon_max).contains(&longitude)
        {
            return Err(ValidationError::InvalidCoordinates);
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse coordinates from raw text as received in a query string.
    ///
    /// Absent or blank values yield [`ValidationError::MissingCoordinates`];
    /// anything that is not a finite decimal within range yields
    /// [`ValidationError::InvalidCoordinates`].
    pub fn parse(latitude: Option<&str>, longitude: Option<&str>) -> Result<Self, ValidationError> {
        let latitude = non_blank(latitude).ok_or(ValidationError::MissingCoordinates)?;
        let longitude = non_blank(longitude).ok_or(ValidationError::MissingCoordinates)?;

        let latitude = parse_degrees(latitude)?;
        let longitude = parse_degrees(longitude)?;

        Self::new(latitude, longitude)
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_degrees(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidCoordinates)
}

/// GeoJSON geometry kind. Only points are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryKind {
    #[default]
    Point,
}

/// GeoJSON point geometry with `[longitude, latitude]` ordering.
///
/// Deserialization re-validates the coordinate range, so a record read back
/// from the store with garbage coordinates is rejected instead of silently
/// entering a distance computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoJsonPoint")]
pub struct GeoJsonPoint {
    #[serde(rename = "type")]
    kind: GeometryKind,
    coordinates: [f64; 2],
}

#[derive(Deserialize)]
struct RawGeoJsonPoint {
    #[serde(rename = "type")]
    kind: GeometryKind,
    coordinates: [f64; 2],
}

impl TryFrom<RawGeoJsonPoint> for GeoJsonPoint {
    type Error = ValidationError;

    fn try_from(raw: RawGeoJsonPoint) -> Result<Self, Self::Error> {
        let [longitude, latitude] = raw.coordinates;
        let coordinates = Coordinates::new(latitude, longitude)?;
        Ok(Self {
            kind: raw.kind,
            ..Self::from(coordinates)
        })
    }
}

impl From<Coordinates> for GeoJsonPoint {
    fn from(coordinates: Coordinates) -> Self {
        Self {
            kind: GeometryKind::Point,
            coordinates: [coordinates.longitude(), coordinates.latitude()],
        }
    }
}

impl GeoJsonPoint {
    /// The validated coordinates this geometry encodes.
    pub fn coordinates(&self) -> Coordinates {
        let [longitude, latitude] = self.coordinates;
        Coordinates {
            latitude,
            longitude,
        }
    }

    /// Raw `[longitude, latitude]` pair as stored.
    pub fn lon_lat(&self) -> [f64; 2] {
        self.coordinates
    }
}

/// A point that has passed validation but has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPoint {
    name: String,
    location: GeoJsonPoint,
}

impl NewPoint {
    /// Build a new point from a name and validated coordinates.
    ///
    /// The name is trimmed; a blank name yields
    /// [`ValidationError::InvalidFields`].
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Result<Self, ValidationError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::InvalidFields);
        }

        Ok(Self {
            name: name.to_string(),
            location: GeoJsonPoint::from(coordinates),
        })
    }

    /// Point label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// GeoJSON location.
    pub fn location(&self) -> GeoJsonPoint {
        self.location
    }

    /// Attach the identifier assigned by the store.
    pub fn with_id(self, id: impl Into<String>) -> Point {
        Point {
            id: id.into(),
            name: self.name,
            location: self.location,
        }
    }
}

/// A persisted point with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Opaque identifier assigned by the store.
    pub id: String,
    /// Free-text label.
    pub name: String,
    /// GeoJSON location (`[longitude, latitude]`).
    pub location: GeoJsonPoint,
}

impl Point {
    /// Coordinates of this point.
    pub fn coordinates(&self) -> Coordinates {
        self.location.coordinates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_boundaries() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        for (lat, lon) in [(91.0, 0.0), (-91.0, 0.0), (0.0, 181.0), (0.0, -181.0)] {
            assert_eq!(
                Coordinates::new(lat, lon),
                Err(ValidationError::InvalidCoordinates),
                "({lat}, {lon}) should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn parse_reports_missing_before_invalid() {
        assert_eq!(
            Coordinates::parse(None, Some("abc")),
            Err(ValidationError::MissingCoordinates)
        );
        assert_eq!(
            Coordinates::parse(Some("  "), Some("10")),
            Err(ValidationError::MissingCoordinates)
        );
    }

    #[test]
    fn parse_rejects_garbage_and_infinities() {
        for raw in ["abc", "12..4", "inf", "NaN", "1e400"] {
            assert_eq!(
                Coordinates::parse(Some(raw), Some("0")),
                Err(ValidationError::InvalidCoordinates),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_trims_whitespace() {
        let coords = Coordinates::parse(Some(" 40.5 "), Some("-74.25")).unwrap();
        assert_eq!(coords.latitude(), 40.5);
        assert_eq!(coords.longitude(), -74.25);
    }

    #[test]
    fn geojson_orders_longitude_first() {
        let coords = Coordinates::new(40.0, -74.0).unwrap();
        let json = serde_json::to_value(GeoJsonPoint::from(coords)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "Point", "coordinates": [-74.0, 40.0]})
        );
    }

    #[test]
    fn geojson_deserialization_validates_range() {
        let bad = serde_json::json!({"type": "Point", "coordinates": [200.0, 10.0]});
        assert!(serde_json::from_value::<GeoJsonPoint>(bad).is_err());

        let wrong_kind = serde_json::json!({"type": "Polygon", "coordinates": [10.0, 10.0]});
        assert!(serde_json::from_value::<GeoJsonPoint>(wrong_kind).is_err());
    }

    #[test]
    fn new_point_rejects_blank_name() {
        let coords = Coordinates::new(1.0, 2.0).unwrap();
        assert_eq!(
            NewPoint::new("   ", coords),
            Err(ValidationError::InvalidFields)
        );
    }

    #[test]
    fn new_point_keeps_coordinates_through_id_assignment() {
        let coords = Coordinates::new(51.5, -0.12).unwrap();
        let point = NewPoint::new(" Big Ben ", coords).unwrap().with_id("abc");
        assert_eq!(point.id, "abc");
        assert_eq!(point.name, "Big Ben");
        assert_eq!(point.coordinates(), coords);
    }
}
