mod protests;
mod user_position;

pub use protests::Protests;
pub use user_position::UserPosition;
