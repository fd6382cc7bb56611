use std::{cell::RefCell, rc::Rc, sync::Arc};

use logger::{Color, Logger};
use viewport::{Coordinate, FetchAction, QueryDeduplicator, ViewportError, ViewportTracker};

use crate::{
    config::AppConfig,
    fetcher::ProtestFetcher,
    geocoder::{GeocodeError, Geocoder},
    provider::ProtestProvider,
    state::SelectionState,
    store::Store,
    types::{Protest, Route},
};

/// Everything the widgets need, passed explicitly instead of living in a global.
pub struct AppContext {
    pub config: AppConfig,
    pub store: Store,
    pub selection: Rc<RefCell<SelectionState>>,
    pub route: Route,
    tracker: ViewportTracker,
    fetcher: ProtestFetcher,
    geocoder: Box<dyn Geocoder>,
    logger: Logger,
}

impl AppContext {
    /// Creates a new `AppContext` with an empty store and no user position.
    ///
    /// # Parameters
    /// - `config`: Runtime settings; `query_radius_m` and `fetch_workers` are used here.
    /// - `provider`: Source the background fetches read protests from.
    /// - `geocoder`: Resolves the addresses typed in the address bar.
    /// - `logger`: Session logger shared with the widgets.
    ///
    /// # Returns
    /// The context, or `ViewportError::InvalidRadius` if the configured radius is not positive.
    pub fn new(
        config: AppConfig,
        provider: Arc<dyn ProtestProvider>,
        geocoder: Box<dyn Geocoder>,
        logger: Logger,
    ) -> Result<Self, ViewportError> {
        let deduplicator = QueryDeduplicator::new(config.query_radius_m)?;
        let fetcher = ProtestFetcher::new(provider, config.fetch_workers);

        Ok(Self {
            config,
            store: Store::new(),
            selection: Rc::new(RefCell::new(SelectionState::new())),
            route: Route::default(),
            tracker: ViewportTracker::new(deduplicator),
            fetcher,
            geocoder,
            logger,
        })
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn tracker(&self) -> &ViewportTracker {
        &self.tracker
    }

    pub fn fetcher(&self) -> &ProtestFetcher {
        &self.fetcher
    }

    pub fn set_user_position(&mut self, position: Coordinate) {
        self.tracker.set_user_position(position);
        self.store.set_user_position(position);
        self.info(&format!("User position set to {}", position), Color::Cyan);
    }

    /// Resolves `address` and, when found, makes it the user's position.
    pub fn search_address(&mut self, address: &str) -> Result<Coordinate, GeocodeError> {
        match self.geocoder.geocode(address) {
            Ok(position) => {
                self.set_user_position(position);
                Ok(position)
            }
            Err(e) => {
                self.warn(&format!("Address search '{}' failed: {}", address, e));
                Err(e)
            }
        }
    }

    /// Called when the map stopped moving at `center`. Issues at most one fetch.
    pub fn handle_move_end(&mut self, center: Coordinate) -> FetchAction {
        let fetcher = &mut self.fetcher;
        let action = self
            .tracker
            .on_move_end(center, |request| fetcher.issue(request));

        self.info(
            &format!("Map moved to {}: {}", center, action),
            match action {
                FetchAction::Skip => Color::White,
                _ => Color::Green,
            },
        );
        action
    }

    /// Applies the fetches that completed since the last frame and notifies subscribers.
    ///
    /// Returns how many fetches were applied.
    pub fn apply_completed_fetches(&mut self) -> usize {
        let outcomes = self.fetcher.drain();
        let count = outcomes.len();

        for outcome in outcomes {
            match outcome.result {
                Ok(protests) => {
                    self.info(
                        &format!(
                            "Fetched {} protests around {} (only markers: {})",
                            protests.len(),
                            outcome.request.position,
                            outcome.request.only_markers
                        ),
                        Color::Blue,
                    );
                    self.store.apply_fetch(&outcome.request, protests);
                }
                Err(e) => self.error(&format!(
                    "Fetch around {} failed: {}",
                    outcome.request.position, e
                )),
            }
        }

        if self.store.has_pending() {
            self.store.publish();
        }
        count
    }

    pub fn record_whatsapp_click(&self, protest: &Protest) {
        self.info(
            &format!("WhatsApp link of '{}' opened", protest.display_name),
            Color::Magenta,
        );
    }

    fn info(&self, message: &str, color: Color) {
        if let Err(e) = self.logger.info(message, color) {
            eprintln!("Error writing log: {}", e);
        }
    }

    fn error(&self, message: &str) {
        if let Err(e) = self.logger.error(message) {
            eprintln!("Error writing log: {}", e);
        }
    }

    fn warn(&self, message: &str) {
        if let Err(e) = self.logger.warn(message) {
            eprintln!("Error writing log: {}", e);
        }
    }
}
