use std::fmt::{self, Display};

/// Enum representing the input validation errors of the viewport crate.
///
/// The possible errors are:
///
/// - `NonFiniteCoordinate`: a latitude or longitude was `NaN` or infinite.
/// - `LatitudeOutOfRange`: the latitude is outside of `-90..=90`.
/// - `LongitudeOutOfRange`: the longitude is outside of `-180..=180`.
/// - `InvalidRadius`: a query radius was not a positive, finite number of meters.
///
/// Once a `Coordinate` or a `QueryDeduplicator` exists, nothing in this crate can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportError {
    NonFiniteCoordinate,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
    InvalidRadius(f64),
}

impl Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewportError::NonFiniteCoordinate => write!(
                f,
                "[NonFiniteCoordinate]: Latitude and longitude must be finite numbers"
            ),
            ViewportError::LatitudeOutOfRange(lat) => write!(
                f,
                "[LatitudeOutOfRange]: Latitude {} is not within -90 and 90",
                lat
            ),
            ViewportError::LongitudeOutOfRange(lon) => write!(
                f,
                "[LongitudeOutOfRange]: Longitude {} is not within -180 and 180",
                lon
            ),
            ViewportError::InvalidRadius(radius) => write!(
                f,
                "[InvalidRadius]: Radius {} must be a positive number of meters",
                radius
            ),
        }
    }
}

impl std::error::Error for ViewportError {}
