/// The pages reachable from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Map,
    About,
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Map => "Map",
            Route::About => "About",
        }
    }
}
