use std::{cell::Cell, rc::Rc, time::Duration};

use chrono::Local;
use egui::Context;
use egui_extras::install_image_loaders;
use logger::Color;
use viewport::{Coordinate, MovementTracker};
use walkers::{HttpOptions, HttpTiles, Map, MapMemory, Position, Tiles};

use crate::{
    context::AppContext,
    plugins,
    store::StoreEvent,
    types::Route,
    widgets::{
        View, WidgetAbout, WidgetAddressBar, WidgetHeader, WidgetProtestCard, WidgetProtestList,
    },
    windows,
};

const INITIAL_LAT: f64 = 31.7749837;
const INITIAL_LON: f64 = 35.219797;
const INITIAL_ZOOM: f64 = 14.;
const HOME_CIRCLE_RADIUS_M: f64 = 1000.0;
const UPDATE_TICK_MS: u64 = 250;

/// The main application: the map, its plugins and the panels around it.
///
/// All shared state lives in the [`AppContext`]; the app only owns the
/// map widget's memory and the per-frame bookkeeping.
pub struct ProtestMapApp {
    tiles: Box<dyn Tiles>,
    map_memory: MapMemory,
    movement: MovementTracker,
    recenter: Rc<Cell<bool>>,
    context: AppContext,
    header: WidgetHeader,
    address_bar: WidgetAddressBar,
    protest_list: WidgetProtestList,
    about: WidgetAbout,
}

impl ProtestMapApp {
    /// Creates a new `ProtestMapApp`, installing the image loaders and the store listeners.
    ///
    /// # Parameters
    /// - `egui_ctx`: Context of the window, used for tiles and repaints.
    /// - `context`: Application state; a configured user position is applied right away.
    pub fn new(egui_ctx: Context, mut context: AppContext) -> Self {
        install_image_loaders(&egui_ctx);
        let mut initial_map_memory = MapMemory::default();
        let _ = initial_map_memory.set_zoom(INITIAL_ZOOM);

        let recenter = Rc::new(Cell::new(false));
        subscribe(&mut context, &recenter, &egui_ctx);

        if let Some(position) = context.config.user_position {
            context.set_user_position(position);
        }

        Self {
            tiles: Box::new(HttpTiles::with_options(
                walkers::sources::OpenStreetMap,
                HttpOptions::default(),
                egui_ctx.to_owned(),
            )),
            map_memory: initial_map_memory,
            movement: MovementTracker::new(),
            recenter,
            context,
            header: WidgetHeader::new(),
            address_bar: WidgetAddressBar::new(),
            protest_list: WidgetProtestList::new(),
            about: WidgetAbout::new(),
        }
    }

    fn my_position(&self) -> Position {
        match self.context.store.user_position() {
            Some(position) => Position::from_lat_lon(position.latitude(), position.longitude()),
            None => Position::from_lat_lon(INITIAL_LAT, INITIAL_LON),
        }
    }

    fn show_map(&mut self, ui: &mut egui::Ui) {
        let my_position = self.my_position();

        if self.recenter.replace(false) {
            self.map_memory.follow_my_position();
            self.movement.reset();
        }

        let tiles = self.tiles.as_mut();
        let mut map = Map::new(Some(tiles), &mut self.map_memory, my_position);

        if let Some(position) = self.context.store.user_position() {
            map = map
                .with_plugin(plugins::Protests::new(
                    self.context.store.visible_markers(),
                    self.context.selection.clone(),
                ))
                .with_plugin(plugins::UserPosition::new(*position, HOME_CIRCLE_RADIUS_M));
        }

        let response = ui.add(map);

        let interacting = response.dragged()
            || ui.input(|i| i.pointer.any_down() || i.smooth_scroll_delta != egui::Vec2::ZERO);

        let center = self.map_memory.detached().unwrap_or(my_position);
        if let Ok(center) = Coordinate::new(center.lat(), center.lon()) {
            if let Some(center) = self.movement.observe(center, interacting) {
                self.context.handle_move_end(center);
            }
        }

        self.show_selected_protest(ui.ctx());
        self.address_bar.show(ui.ctx(), &mut self.context);

        windows::zoom(ui, &mut self.map_memory);
        windows::go_to_my_position(ui, &mut self.map_memory);
    }

    fn show_selected_protest(&mut self, ctx: &Context) {
        let selected = self.context.selection.borrow().selected.clone();
        let Some(protest_id) = selected else {
            return;
        };

        let Some(protest) = self.context.store.view().find_marker(&protest_id) else {
            // The marker went away with a full refresh.
            self.context.selection.borrow_mut().selected = None;
            return;
        };

        let mut open = true;
        egui::Window::new(&protest.display_name)
            .id(egui::Id::new(("protest_popup", &protest.id)))
            .resizable(false)
            .collapsible(false)
            .open(&mut open)
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
            .show(ctx, |ui| {
                WidgetProtestCard::new(protest, Local::now().date_naive())
                    .show(ui, &self.context);
            });

        if !open {
            self.context.selection.borrow_mut().selected = None;
        }
    }
}

/// Registers the app's store listeners: one logs every change, the other
/// asks the map to move to the user whenever the position changes.
fn subscribe(context: &mut AppContext, recenter: &Rc<Cell<bool>>, egui_ctx: &Context) {
    let logger = context.logger().clone();
    context.store.subscribe(move |event| {
        let message = match event {
            StoreEvent::UserPositionChanged(position) => {
                format!("Store: user position is now {}", position)
            }
            StoreEvent::MarkersChanged { total, added } => {
                format!("Store: {} markers ({} new)", total, added)
            }
            StoreEvent::NearbyChanged(count) => format!("Store: {} protests nearby", count),
        };
        if let Err(e) = logger.info(&message, Color::Yellow) {
            eprintln!("Error writing log: {}", e);
        }
    });

    let recenter = Rc::clone(recenter);
    let egui_ctx = egui_ctx.clone();
    context.store.subscribe(move |event| {
        if let StoreEvent::UserPositionChanged(_) = event {
            recenter.set(true);
            egui_ctx.request_repaint();
        }
    });
}

impl eframe::App for ProtestMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.context.apply_completed_fetches();

        // Fetches complete on worker threads and movement ends one frame after
        // the map settles, so keep polling.
        ctx.request_repaint_after(Duration::from_millis(UPDATE_TICK_MS));

        self.header.show(ctx, &mut self.context);

        if self.context.route == Route::About {
            egui::CentralPanel::default().show(ctx, |ui| self.about.ui(ui, &mut self.context));
            return;
        }

        self.protest_list.show(ctx, &mut self.context);

        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(rimless)
            .show(ctx, |ui| self.show_map(ui));
    }
}
