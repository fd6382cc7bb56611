use crate::{
    coordinate::Coordinate,
    dedup::{FetchAction, QueryDeduplicator},
    history::ViewportHistory,
};

/// A request for the protests around `position`.
///
/// `only_markers` is set for incremental fetches: the result only feeds the
/// map markers and leaves the nearby-protests list alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchRequest {
    pub only_markers: bool,
    pub position: Coordinate,
}

impl FetchRequest {
    /// Builds the request matching `action`, or `None` for [`FetchAction::Skip`].
    pub fn for_action(action: FetchAction, position: Coordinate) -> Option<Self> {
        match action {
            FetchAction::FullRefresh => Some(Self {
                only_markers: false,
                position,
            }),
            FetchAction::Incremental => Some(Self {
                only_markers: true,
                position,
            }),
            FetchAction::Skip => None,
        }
    }
}

/// Tracks the map center, the user's position and which viewports were already queried.
#[derive(Debug, Clone, Default)]
pub struct ViewportTracker {
    current_center: Option<Coordinate>,
    user_position: Option<Coordinate>,
    history: ViewportHistory,
    deduplicator: QueryDeduplicator,
}

impl ViewportTracker {
    pub fn new(deduplicator: QueryDeduplicator) -> Self {
        Self {
            deduplicator,
            ..Default::default()
        }
    }

    /// Handles the end of a map movement.
    ///
    /// Decides what the new viewport needs, hands the request (if any) to
    /// `issue`, and only then records `center` in the history. Every center
    /// is recorded, skipped ones included, so a chain of short pans never
    /// drifts out of the queried area unnoticed.
    pub fn on_move_end<F>(&mut self, center: Coordinate, issue: F) -> FetchAction
    where
        F: FnOnce(FetchRequest),
    {
        let action = self
            .deduplicator
            .decide(&center, self.user_position.as_ref(), &self.history);

        if let Some(request) = FetchRequest::for_action(action, center) {
            issue(request);
        }
        self.history.record(center);

        self.current_center = Some(center);
        action
    }

    pub fn set_user_position(&mut self, position: Coordinate) {
        self.user_position = Some(position);
    }

    pub fn user_position(&self) -> Option<&Coordinate> {
        self.user_position.as_ref()
    }

    pub fn current_center(&self) -> Option<&Coordinate> {
        self.current_center.as_ref()
    }

    pub fn history(&self) -> &ViewportHistory {
        &self.history
    }

    pub fn radius_m(&self) -> f64 {
        self.deduplicator.radius_m()
    }
}
