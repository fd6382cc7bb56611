use crate::coordinate::Coordinate;

/// Turns a per-frame stream of map centers into "movement ended" events.
///
/// The map widget only exposes its current center. A movement is considered
/// finished once the center stayed the same for a frame in which the user
/// was not dragging, and that center differs from the last one reported.
#[derive(Debug, Clone, Default)]
pub struct MovementTracker {
    candidate: Option<Coordinate>,
    last_reported: Option<Coordinate>,
}

impl MovementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the center seen this frame. Returns the center when a movement just ended.
    pub fn observe(&mut self, center: Coordinate, interacting: bool) -> Option<Coordinate> {
        if interacting {
            self.candidate = None;
            return None;
        }

        if self.candidate != Some(center) {
            self.candidate = Some(center);
            return None;
        }

        if self.last_reported == Some(center) {
            return None;
        }

        self.last_reported = Some(center);
        Some(center)
    }

    /// Forgets the last reported center, so the next stable center is reported
    /// even when the map did not move. Used when the map is recentered programmatically.
    pub fn reset(&mut self) {
        self.candidate = None;
        self.last_reported = None;
    }

    pub fn last_reported(&self) -> Option<&Coordinate> {
        self.last_reported.as_ref()
    }
}
