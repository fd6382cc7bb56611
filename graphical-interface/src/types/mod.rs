mod protest;
pub use protest::{Protest, ProtestDate};

mod route;
pub use route::Route;
