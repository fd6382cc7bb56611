use crate::coordinate::Coordinate;

/// The centers of every viewport the map came to rest on, in order.
///
/// The history is append-only and lives for the whole session; entries are
/// never merged or evicted.
#[derive(Debug, Clone, Default)]
pub struct ViewportHistory {
    centers: Vec<Coordinate>,
}

impl ViewportHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, center: Coordinate) {
        self.centers.push(center);
    }

    /// Returns true if any recorded center lies within `radius_m` meters of `center`.
    pub fn covers(&self, center: &Coordinate, radius_m: f64) -> bool {
        self.centers
            .iter()
            .any(|previous| previous.is_within_radius(center, radius_m))
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.centers.iter()
    }

    pub fn last(&self) -> Option<&Coordinate> {
        self.centers.last()
    }
}

impl FromIterator<Coordinate> for ViewportHistory {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self {
            centers: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_empty_history_covers_nothing() {
        let history = ViewportHistory::new();
        assert!(history.is_empty());
        assert!(!history.covers(&coord(31.77, 35.21), 3000.0));
    }

    #[test]
    fn test_record_keeps_duplicates_in_order() {
        let mut history = ViewportHistory::new();
        history.record(coord(31.77, 35.21));
        history.record(coord(31.77, 35.21));
        history.record(coord(32.08, 34.78));

        assert_eq!(history.len(), 3);
        assert_eq!(history.last(), Some(&coord(32.08, 34.78)));
        assert_eq!(history.iter().next(), Some(&coord(31.77, 35.21)));
    }

    #[test]
    fn test_covers_is_inclusive_and_checks_every_entry() {
        let origin = coord(31.77, 35.21);
        let history: ViewportHistory = vec![coord(32.08, 34.78), origin].into_iter().collect();

        let edge = origin.offset_north(2500.0);
        let radius = origin.distance_to(&edge);
        assert!(history.covers(&edge, radius));
        assert!(!history.covers(&edge, radius - 1.0));
    }
}
