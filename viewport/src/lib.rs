//! Viewport bookkeeping for the protest map.
//!
//! Decides, every time the map stops moving, whether the visible area needs a
//! full refresh, an incremental fetch of new markers, or nothing at all.

mod coordinate;
mod dedup;
pub mod errors;
mod history;
mod movement;
mod tracker;

pub use coordinate::{Coordinate, EARTH_RADIUS_M};
pub use dedup::{decide, FetchAction, QueryDeduplicator, DEFAULT_QUERY_RADIUS_M};
pub use errors::ViewportError;
pub use history::ViewportHistory;
pub use movement::MovementTracker;
pub use tracker::{FetchRequest, ViewportTracker};
