use std::fmt;

use crate::{coordinate::Coordinate, errors::ViewportError, history::ViewportHistory};

/// Radius around a queried center whose protests are considered already known.
pub const DEFAULT_QUERY_RADIUS_M: f64 = 3000.0;

/// What to do after the map stopped moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchAction {
    /// Fetch everything around the position, replacing the markers and the nearby list.
    FullRefresh,
    /// Fetch only the markers not known yet, keeping the current ones.
    Incremental,
    /// The area was already queried.
    Skip,
}

impl FetchAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchAction::FullRefresh => "full refresh",
            FetchAction::Incremental => "incremental",
            FetchAction::Skip => "skip",
        }
    }
}

impl fmt::Display for FetchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides which fetch, if any, a viewport centered at `new_center` needs.
///
/// Landing exactly on the user's position is always a full refresh. Otherwise
/// the query is skipped when a previously queried center lies within
/// `radius_m` meters, and is incremental when none does.
///
/// `radius_m` must be positive; [`QueryDeduplicator::new`] validates it for callers
/// that take the radius from user input.
pub fn decide(
    new_center: &Coordinate,
    user_position: Option<&Coordinate>,
    history: &ViewportHistory,
    radius_m: f64,
) -> FetchAction {
    debug_assert!(radius_m > 0.0 && radius_m.is_finite());

    if user_position.is_some_and(|position| position == new_center) {
        return FetchAction::FullRefresh;
    }

    if history.covers(new_center, radius_m) {
        FetchAction::Skip
    } else {
        FetchAction::Incremental
    }
}

/// [`decide`] bound to a validated query radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryDeduplicator {
    radius_m: f64,
}

impl Default for QueryDeduplicator {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_QUERY_RADIUS_M,
        }
    }
}

impl QueryDeduplicator {
    /// # Errors
    /// `ViewportError::InvalidRadius` if `radius_m` is not a positive finite number.
    pub fn new(radius_m: f64) -> Result<Self, ViewportError> {
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(ViewportError::InvalidRadius(radius_m));
        }
        Ok(Self { radius_m })
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn decide(
        &self,
        new_center: &Coordinate,
        user_position: Option<&Coordinate>,
        history: &ViewportHistory,
    ) -> FetchAction {
        decide(new_center, user_position, history, self.radius_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn history(centers: &[(f64, f64)]) -> ViewportHistory {
        centers.iter().map(|&(lat, lon)| coord(lat, lon)).collect()
    }

    #[test]
    fn test_user_position_on_empty_history_is_full_refresh() {
        let user = coord(31.77, 35.21);
        let action = decide(&coord(31.77, 35.21), Some(&user), &history(&[]), 3000.0);
        assert_eq!(action, FetchAction::FullRefresh);
    }

    #[test]
    fn test_user_position_ignores_history() {
        let user = coord(31.77, 35.21);
        let covered = history(&[(31.77, 35.21), (31.7705, 35.2105)]);
        assert_eq!(
            decide(&user, Some(&user), &covered, 3000.0),
            FetchAction::FullRefresh
        );
    }

    #[test]
    fn test_nearby_center_is_skipped() {
        let previous = history(&[(31.77, 35.21)]);
        let action = decide(&coord(31.7705, 35.2105), None, &previous, 3000.0);
        assert_eq!(action, FetchAction::Skip);
    }

    #[test]
    fn test_far_center_is_incremental() {
        let previous = history(&[(31.77, 35.21)]);
        let action = decide(&coord(31.80, 35.25), None, &previous, 3000.0);
        assert_eq!(action, FetchAction::Incremental);
    }

    #[test]
    fn test_empty_history_never_skips() {
        let empty = history(&[]);
        for (lat, lon) in [(0.0, 0.0), (31.77, 35.21), (-89.9, 179.9)] {
            assert_eq!(
                decide(&coord(lat, lon), None, &empty, 3000.0),
                FetchAction::Incremental
            );
        }
    }

    #[test]
    fn test_user_position_matches_both_components() {
        // Same latitude, different longitude: not the user's position.
        let user = coord(31.77, 35.21);
        let previous = history(&[(31.77, 35.30)]);
        let action = decide(&coord(31.77, 35.30), Some(&user), &previous, 3000.0);
        assert_eq!(action, FetchAction::Skip);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let origin = coord(31.77, 35.21);
        let edge = origin.offset_north(3000.0);
        let exact = origin.distance_to(&edge);
        let previous: ViewportHistory = std::iter::once(origin).collect();

        assert_eq!(decide(&edge, None, &previous, exact), FetchAction::Skip);
        assert_eq!(
            decide(&edge, None, &previous, exact - 0.01),
            FetchAction::Incremental
        );
    }

    #[test]
    fn test_deduplicator_rejects_invalid_radius() {
        assert_eq!(
            QueryDeduplicator::new(0.0),
            Err(ViewportError::InvalidRadius(0.0))
        );
        assert!(QueryDeduplicator::new(-5.0).is_err());
        assert!(QueryDeduplicator::new(f64::NAN).is_err());
        assert_eq!(
            QueryDeduplicator::default().radius_m(),
            DEFAULT_QUERY_RADIUS_M
        );
    }
}
