use std::{
    cell::RefCell,
    fs,
    path::PathBuf,
    rc::Rc,
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use graphical_interface::{
    config::AppConfig,
    context::AppContext,
    geocoder::{CsvGazetteer, GeocodeError},
    provider::{CsvProvider, ProtestProvider, ProviderError},
    store::StoreEvent,
    types::Protest,
};
use logger::Logger;
use viewport::{Coordinate, FetchAction, FetchRequest, ViewportError};

const PROTESTS: &str = include_str!("../data/protests.csv");
const PLACES: &str = include_str!("../data/places.csv");

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("protest_map_it_{}", name));
    fs::create_dir_all(&dir).expect("Failed to create test directory");
    dir
}

fn build_context(name: &str, config: AppConfig) -> Result<AppContext, ViewportError> {
    let logger =
        Logger::new(&scratch_dir(name), "session", false).expect("Failed to create logger");
    let provider = CsvProvider::from_reader(PROTESTS.as_bytes(), config.query_radius_m)
        .expect("Failed to load protests");
    let geocoder = CsvGazetteer::from_reader(PLACES.as_bytes()).expect("Failed to load places");

    AppContext::new(config, Arc::new(provider), Box::new(geocoder), logger)
}

fn record_events(context: &mut AppContext) -> Rc<RefCell<Vec<StoreEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    context
        .store
        .subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

// Applies fetch results until `outcomes` more fetches came back.
fn settle(context: &mut AppContext, outcomes: usize) {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut applied = 0;

    while applied < outcomes {
        assert!(Instant::now() < deadline, "Fetches did not complete in time");
        applied += context.apply_completed_fetches();
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(applied, outcomes);
}

fn ids(protests: &[Protest]) -> Vec<&str> {
    protests.iter().map(|protest| protest.id.as_str()).collect()
}

#[test]
fn test_search_then_land_on_user_position_refreshes_everything() {
    let mut context = build_context("full_refresh", AppConfig::default()).unwrap();
    let events = record_events(&mut context);

    let home = context.search_address("balfour st jerusalem").unwrap();
    assert_eq!(home, Coordinate::new(31.7749837, 35.219797).unwrap());

    assert_eq!(context.handle_move_end(home), FetchAction::FullRefresh);
    settle(&mut context, 1);

    let view = context.store.view();
    assert_eq!(ids(&view.nearby), vec!["balfour", "paris-square", "talpiot"]);
    assert_eq!(view.markers.len(), 3);
    assert_eq!(view.nearby[0].distance, Some(0.0));

    assert_eq!(
        *events.borrow(),
        vec![
            StoreEvent::UserPositionChanged(home),
            StoreEvent::MarkersChanged { total: 3, added: 3 },
            StoreEvent::NearbyChanged(3),
        ]
    );
}

#[test]
fn test_moving_inside_a_queried_area_is_skipped() {
    let mut context = build_context("skip", AppConfig::default()).unwrap();
    let home = context.search_address("Balfour St Jerusalem").unwrap();

    context.handle_move_end(home);
    settle(&mut context, 1);
    assert_eq!(context.fetcher().issued(), 1);

    let nearby_center = home.offset_north(1000.0);
    assert_eq!(context.handle_move_end(nearby_center), FetchAction::Skip);
    assert_eq!(context.fetcher().issued(), 1);
    assert_eq!(context.tracker().history().len(), 2);
    assert_eq!(context.tracker().current_center(), Some(&nearby_center));
}

#[test]
fn test_chained_short_pans_keep_skipping() {
    let mut context = build_context("chained_pans", AppConfig::default()).unwrap();
    let start = Coordinate::new(31.7749837, 35.219797).unwrap();
    context.handle_move_end(start);
    settle(&mut context, 1);

    let first_hop = start.offset_north(2500.0);
    let second_hop = first_hop.offset_north(2500.0);

    assert_eq!(context.handle_move_end(first_hop), FetchAction::Skip);
    assert_eq!(context.handle_move_end(second_hop), FetchAction::Skip);
    assert_eq!(context.fetcher().issued(), 1);
    assert_eq!(context.tracker().history().len(), 3);
    assert_eq!(context.tracker().history().last(), Some(&second_hop));
}

#[test]
fn test_moving_to_a_new_area_only_adds_markers() {
    let mut context = build_context("incremental", AppConfig::default()).unwrap();
    let home = context.search_address("Balfour St Jerusalem").unwrap();
    context.handle_move_end(home);
    settle(&mut context, 1);

    let events = record_events(&mut context);
    let tel_aviv = Coordinate::new(32.0778, 34.7740).unwrap();
    assert_eq!(context.handle_move_end(tel_aviv), FetchAction::Incremental);
    settle(&mut context, 1);

    let view = context.store.view();
    assert_eq!(
        ids(&view.markers),
        vec!["balfour", "paris-square", "talpiot", "habima", "kaplan"]
    );
    assert_eq!(ids(&view.nearby), vec!["balfour", "paris-square", "talpiot"]);
    assert_eq!(
        *events.borrow(),
        vec![StoreEvent::MarkersChanged { total: 5, added: 2 }]
    );

    // The new area is remembered too.
    let close_by = tel_aviv.offset_north(500.0);
    assert_eq!(context.handle_move_end(close_by), FetchAction::Skip);
    assert_eq!(context.fetcher().issued(), 2);
}

#[test]
fn test_moving_without_user_position_is_incremental() {
    let mut context = build_context("no_user", AppConfig::default()).unwrap();
    let center = Coordinate::new(31.7749837, 35.219797).unwrap();

    assert_eq!(context.handle_move_end(center), FetchAction::Incremental);
    settle(&mut context, 1);

    assert_eq!(context.store.view().markers.len(), 3);
    assert!(context.store.view().nearby.is_empty());
}

#[test]
fn test_new_user_position_refreshes_again() {
    let mut context = build_context("new_user", AppConfig::default()).unwrap();
    let home = context.search_address("Balfour St Jerusalem").unwrap();
    context.handle_move_end(home);
    settle(&mut context, 1);

    let haifa = context.search_address("carmel center").unwrap();
    assert_eq!(context.handle_move_end(haifa), FetchAction::FullRefresh);
    settle(&mut context, 1);

    assert_eq!(ids(&context.store.view().nearby), vec!["horev"]);
    assert_eq!(ids(&context.store.view().markers), vec!["horev"]);
}

#[test]
fn test_failed_search_keeps_the_user_position() {
    let mut context = build_context("failed_search", AppConfig::default()).unwrap();
    let home = context.search_address("Balfour St Jerusalem").unwrap();

    assert!(matches!(
        context.search_address("Atlantis"),
        Err(GeocodeError::NotFound(_))
    ));
    assert!(matches!(
        context.search_address("jerusalem"),
        Err(GeocodeError::Ambiguous(_))
    ));
    assert_eq!(context.store.user_position(), Some(&home));
    assert_eq!(context.tracker().user_position(), Some(&home));
}

#[test]
fn test_smaller_radius_narrows_results() {
    let config = AppConfig {
        query_radius_m: 500.0,
        ..AppConfig::default()
    };
    let mut context = build_context("radius", config).unwrap();
    let home = context.search_address("Balfour St Jerusalem").unwrap();

    context.handle_move_end(home);
    settle(&mut context, 1);
    assert_eq!(ids(&context.store.view().nearby), vec!["balfour", "paris-square"]);

    assert_eq!(
        context.handle_move_end(home.offset_north(600.0)),
        FetchAction::Incremental
    );
}

#[test]
fn test_invalid_radius_is_rejected() {
    let config = AppConfig {
        query_radius_m: 0.0,
        ..AppConfig::default()
    };
    assert!(matches!(
        build_context("invalid_radius", config),
        Err(ViewportError::InvalidRadius(_))
    ));
}

#[test]
fn test_decisions_are_logged() {
    let mut context = build_context("logging", AppConfig::default()).unwrap();
    let home = context.search_address("Balfour St Jerusalem").unwrap();
    context.handle_move_end(home);
    settle(&mut context, 1);
    context.handle_move_end(home.offset_north(100.0));

    let log = fs::read_to_string(context.logger().path()).expect("Failed to read log file");
    assert!(log.contains("User position set to"));
    assert!(log.contains("full refresh"));
    assert!(log.contains("Fetched 3 protests"));
    assert!(log.contains("skip"));
}

struct UnavailableProvider;

impl ProtestProvider for UnavailableProvider {
    fn fetch_protests(&self, request: &FetchRequest) -> Result<Vec<Protest>, ProviderError> {
        Err(ProviderError::InvalidRecord {
            id: request.position.to_string(),
            reason: "service unavailable".to_string(),
        })
    }
}

#[test]
fn test_failed_fetch_is_logged_as_error_and_changes_nothing() {
    let logger = Logger::new(&scratch_dir("failed_fetch"), "session", false)
        .expect("Failed to create logger");
    let geocoder = CsvGazetteer::from_reader(PLACES.as_bytes()).expect("Failed to load places");
    let mut context = AppContext::new(
        AppConfig::default(),
        Arc::new(UnavailableProvider),
        Box::new(geocoder),
        logger,
    )
    .unwrap();
    let events = record_events(&mut context);

    let center = Coordinate::new(31.7749837, 35.219797).unwrap();
    assert_eq!(context.handle_move_end(center), FetchAction::Incremental);
    assert_eq!(context.fetcher().in_flight(), 1);
    settle(&mut context, 1);

    assert_eq!(context.fetcher().in_flight(), 0);
    assert!(context.store.view().markers.is_empty());
    assert!(events.borrow().is_empty());

    let log = fs::read_to_string(context.logger().path()).expect("Failed to read log file");
    let failure = log
        .lines()
        .find(|line| line.contains("failed"))
        .expect("Missing failure line");
    assert!(failure.starts_with("[ERROR]"));
    assert!(failure.contains("service unavailable"));
}
