use egui::{Align2, RichText, Ui, Window};
use walkers::MapMemory;

/// Zoom buttons in the bottom right corner of the map.
pub fn zoom(ui: &Ui, map_memory: &mut MapMemory) {
    Window::new("Map")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::RIGHT_BOTTOM, [-10., -10.])
        .show(ui.ctx(), |ui| {
            ui.horizontal(|ui| {
                if ui.button(RichText::new("➕").heading()).clicked() {
                    let _ = map_memory.zoom_in();
                }

                if ui.button(RichText::new("➖").heading()).clicked() {
                    let _ = map_memory.zoom_out();
                }
            });
        });
}

/// Button bringing the map back to the user's position after it was dragged away.
pub fn go_to_my_position(ui: &Ui, map_memory: &mut MapMemory) {
    if map_memory.detached().is_none() {
        return;
    }

    Window::new("My position")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::RIGHT_BOTTOM, [-10., -70.])
        .show(ui.ctx(), |ui| {
            if ui.button(RichText::new("Back to my position").heading()).clicked() {
                map_memory.follow_my_position();
            }
        });
}
