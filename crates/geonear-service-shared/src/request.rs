//! Request types and validation for HTTP endpoints.
//!
//! Raw request shapes accept anything the client might send (absent fields,
//! numbers as strings); [`Validate`] turns them into the typed inputs of
//! `geonear-lib` or rejects them before any store access.

use serde::{Deserialize, Serialize};

use geonear_lib::{Coordinates, NearbyQuery, NewPoint, Pagination, ValidationError};

/// Validation trait for request types.
///
/// Implementations check every field and either build the validated library
/// input or report the first problem found.
pub trait Validate {
    /// Typed input produced by a successful validation.
    type Output;

    /// Validate the request.
    fn validate(&self) -> Result<Self::Output, ValidationError>;
}

/// Query string of `GET /api/users-within-radius`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbyParams {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl Validate for NearbyParams {
    type Output = NearbyQuery;

    fn validate(&self) -> Result<NearbyQuery, ValidationError> {
        let center = Coordinates::parse(self.latitude.as_deref(), self.longitude.as_deref())?;
        let pagination = Pagination::parse(self.page.as_deref(), self.limit.as_deref())?;
        Ok(NearbyQuery { center, pagination })
    }
}

/// A coordinate as sent in a JSON body: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Number(f64),
    Text(String),
}

impl CoordinateInput {
    fn degrees(&self) -> Option<f64> {
        match self {
            CoordinateInput::Number(value) => Some(*value),
            CoordinateInput::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl From<f64> for CoordinateInput {
    fn from(value: f64) -> Self {
        CoordinateInput::Number(value)
    }
}

/// JSON body of `POST /api/add-user`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddPointRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<CoordinateInput>,
    #[serde(default)]
    pub longitude: Option<CoordinateInput>,
}

impl Validate for AddPointRequest {
    type Output = NewPoint;

    fn validate(&self) -> Result<NewPoint, ValidationError> {
        let name = self.name.as_deref().ok_or(ValidationError::InvalidFields)?;

        let latitude = self
            .latitude
            .as_ref()
            .and_then(CoordinateInput::degrees)
            .ok_or(ValidationError::InvalidFields)?;
        let longitude = self
            .longitude
            .as_ref()
            .and_then(CoordinateInput::degrees)
            .ok_or(ValidationError::InvalidFields)?;

        let coordinates =
            Coordinates::new(latitude, longitude).map_err(|_| ValidationError::InvalidFields)?;

        NewPoint::new(name, coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(lat: Option<&str>, lon: Option<&str>) -> NearbyParams {
        NearbyParams {
            latitude: lat.map(String::from),
            longitude: lon.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_nearby_params_valid_with_defaults() {
        let query = params(Some("40.0"), Some("-74.0")).validate().unwrap();
        assert_eq!(query.center.latitude(), 40.0);
        assert_eq!(query.center.longitude(), -74.0);
        assert_eq!(query.pagination, Pagination::default());
    }

    #[test]
    fn test_nearby_params_missing_longitude() {
        let err = params(Some("40.0"), None).validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingCoordinates);
    }

    #[test]
    fn test_nearby_params_out_of_range() {
        for (lat, lon) in [("91", "0"), ("-91", "0"), ("0", "181"), ("0", "-181")] {
            let err = params(Some(lat), Some(lon)).validate().unwrap_err();
            assert_eq!(err, ValidationError::InvalidCoordinates, "{lat},{lon}");
        }
    }

    #[test]
    fn test_nearby_params_bad_pagination() {
        let mut p = params(Some("1"), Some("1"));
        p.limit = Some("0".to_string());
        assert_eq!(p.validate().unwrap_err(), ValidationError::InvalidPagination);

        p.limit = None;
        p.page = Some("two".to_string());
        assert_eq!(p.validate().unwrap_err(), ValidationError::InvalidPagination);
    }

    #[test]
    fn test_nearby_params_coordinates_checked_before_pagination() {
        let mut p = params(Some("abc"), Some("1"));
        p.page = Some("0".to_string());
        assert_eq!(p.validate().unwrap_err(), ValidationError::InvalidCoordinates);
    }

    #[test]
    fn test_add_point_accepts_numbers_and_strings() {
        let json = r#"{"name":"A","latitude":40.0,"longitude":"-74.0"}"#;
        let req: AddPointRequest = serde_json::from_str(json).unwrap();
        let point = req.validate().unwrap();
        assert_eq!(point.name(), "A");
        assert_eq!(point.location().lon_lat(), [-74.0, 40.0]);
    }

    #[test]
    fn test_add_point_zero_coordinates_are_valid() {
        let json = r#"{"name":"Null Island","latitude":0,"longitude":0}"#;
        let req: AddPointRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_add_point_missing_name() {
        let json = r#"{"latitude":40.0,"longitude":-74.0}"#;
        let req: AddPointRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.validate().unwrap_err(), ValidationError::InvalidFields);
    }

    #[test]
    fn test_add_point_blank_name() {
        let req = AddPointRequest {
            name: Some("  ".to_string()),
            latitude: Some(1.0.into()),
            longitude: Some(1.0.into()),
        };
        assert_eq!(req.validate().unwrap_err(), ValidationError::InvalidFields);
    }

    #[test]
    fn test_add_point_invalid_coordinates() {
        for (lat, lon) in [
            (CoordinateInput::Number(95.0), CoordinateInput::Number(0.0)),
            (CoordinateInput::Text("north".into()), CoordinateInput::Number(0.0)),
            (CoordinateInput::Number(0.0), CoordinateInput::Text("".into())),
        ] {
            let req = AddPointRequest {
                name: Some("A".to_string()),
                latitude: Some(lat),
                longitude: Some(lon),
            };
            assert_eq!(req.validate().unwrap_err(), ValidationError::InvalidFields);
        }
    }
}
