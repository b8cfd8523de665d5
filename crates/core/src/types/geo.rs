//! Geographic coordinates in decimal degrees.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected latitude/longitude input.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude must be between -90 and 90 (got {0})")]
    Latitude(f64),
    #[error("longitude must be between -180 and 180 (got {0})")]
    Longitude(f64),
    #[error("latitude and longitude must be given together")]
    Incomplete,
}

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Validate and build a point.
    ///
    /// # Errors
    ///
    /// Returns `CoordinateError` when either value is out of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build an optional point from two optional halves.
    ///
    /// # Errors
    ///
    /// Returns `CoordinateError::Incomplete` when only one half is present,
    /// or a range error from [`Coordinates::new`].
    pub fn from_pair(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Self>, CoordinateError> {
        match (latitude, longitude) {
            (None, None) => Ok(None),
            (Some(lat), Some(lng)) => Self::new(lat, lng).map(Some),
            _ => Err(CoordinateError::Incomplete),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_bounds() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(28.6139, 77.2090).is_ok());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(
            Coordinates::new(91.0, 0.0),
            Err(CoordinateError::Latitude(91.0))
        );
        assert_eq!(
            Coordinates::new(0.0, -180.5),
            Err(CoordinateError::Longitude(-180.5))
        );
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_from_pair() {
        assert_eq!(Coordinates::from_pair(None, None), Ok(None));
        assert_eq!(
            Coordinates::from_pair(Some(19.076), None),
            Err(CoordinateError::Incomplete)
        );
        assert!(matches!(
            Coordinates::from_pair(Some(19.076), Some(72.8777)),
            Ok(Some(_))
        ));
    }
}
