use std::{cell::RefCell, rc::Rc};

use egui::{include_image, Image, Rect, Response, Vec2};
use walkers::{Plugin, Position, Projector};

use crate::{state::SelectionState, types::Protest};

/// Draws a pin for every known protest. Clicking a pin toggles its popup.
pub struct Protests<'a> {
    protests: &'a [Protest],
    selection_state: Rc<RefCell<SelectionState>>,
}

impl<'a> Protests<'a> {
    pub fn new(protests: &'a [Protest], selection_state: Rc<RefCell<SelectionState>>) -> Self {
        Self {
            protests,
            selection_state,
        }
    }
}

impl Plugin for Protests<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        for protest in self.protests {
            protest.draw(ui, projector, &mut self.selection_state.borrow_mut());
        }
    }
}

impl Protest {
    fn draw(&self, ui: &mut egui::Ui, projector: &Projector, selection_state: &mut SelectionState) {
        let position = Position::from_lat_lon(
            self.coordinates.latitude(),
            self.coordinates.longitude(),
        );
        let screen_position = projector.project(position);

        let symbol_size = Vec2::new(24.0, 32.0);

        // The tip of the pin sits on the protest's position.
        let rect = Rect::from_min_size(
            screen_position.to_pos2() - Vec2::new(symbol_size.x / 2.0, symbol_size.y),
            symbol_size,
        );

        let response = ui.allocate_rect(rect, egui::Sense::click());

        let highlighted = response.hovered()
            || selection_state.is_hovered(self)
            || selection_state.is_selected(self);

        let image = if highlighted {
            Image::new(include_image!(r"../../assets/protest-pin-selected.svg"))
        } else {
            Image::new(include_image!(r"../../assets/protest-pin.svg"))
        }
        .fit_to_exact_size(symbol_size);

        ui.put(rect, image);

        if response.clicked() {
            selection_state.toggle_protest_selection(self);
        }
    }
}
