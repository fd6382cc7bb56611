use std::fmt;
use std::str::FromStr;

use crate::errors::ViewportError;

/// Earth's mean radius, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A validated geographic point.
///
/// Both components are finite, the latitude lies within `-90..=90` and the
/// longitude within `-180..=180`. The only way to build one is through
/// [`Coordinate::new`], so every other operation can assume valid input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a new `Coordinate`.
    ///
    /// # Errors
    /// - `ViewportError::NonFiniteCoordinate` if either component is `NaN` or infinite.
    /// - `ViewportError::LatitudeOutOfRange` / `ViewportError::LongitudeOutOfRange`
    ///   if a component lies outside its geographic range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ViewportError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(ViewportError::NonFiniteCoordinate);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ViewportError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ViewportError::LongitudeOutOfRange(longitude));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in meters, using the haversine formula.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat_a = self.latitude.to_radians();
        let lat_b = other.latitude.to_radians();
        let d_lat = lat_b - lat_a;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let sin_lat = (d_lat / 2.0).sin();
        let sin_lon = (d_lon / 2.0).sin();
        let a = sin_lat * sin_lat + lat_a.cos() * lat_b.cos() * sin_lon * sin_lon;
        let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

        EARTH_RADIUS_M * c
    }

    /// Whether `other` lies within `radius_m` meters of this point (inclusive).
    pub fn is_within_radius(&self, other: &Coordinate, radius_m: f64) -> bool {
        self.distance_to(other) <= radius_m
    }

    /// The point `meters` due north of this one, clamped at the pole.
    ///
    /// Used to turn a radius in meters into a screen distance.
    pub fn offset_north(&self, meters: f64) -> Coordinate {
        let delta = (meters / EARTH_RADIUS_M).to_degrees();
        Coordinate {
            latitude: (self.latitude + delta).clamp(-90.0, 90.0),
            longitude: self.longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Parses `"<lat>,<lon>"`, surrounding whitespace allowed.
impl FromStr for Coordinate {
    type Err = ViewportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ViewportError::NonFiniteCoordinate);
        };

        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| ViewportError::NonFiniteCoordinate)?;
        let lon = lon
            .trim()
            .parse::<f64>()
            .map_err(|_| ViewportError::NonFiniteCoordinate)?;

        Coordinate::new(lat, lon)
    }
}
