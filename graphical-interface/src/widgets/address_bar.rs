use egui::{Color32, Key};

use crate::context::AppContext;

use super::View;

/// Text box that moves the user's position to a searched address.
#[derive(Default)]
pub struct WidgetAddressBar {
    query: String,
    error_message: Option<String>,
}

impl WidgetAddressBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ctx: &egui::Context, context: &mut AppContext) {
        egui::Area::new("address_bar".into())
            .anchor(egui::Align2::CENTER_TOP, [0.0, 10.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| self.ui(ui, context));
            });
    }

    fn search(&mut self, context: &mut AppContext) {
        let query = self.query.trim();
        if query.is_empty() {
            self.error_message = Some("Type an address first.".to_string());
            return;
        }

        self.error_message = context.search_address(query).err().map(|e| e.to_string());
    }
}

impl View for WidgetAddressBar {
    fn ui(&mut self, ui: &mut egui::Ui, context: &mut AppContext) {
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.query)
                    .hint_text("Enter your address")
                    .desired_width(260.0),
            );

            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

            if ui.button("Search").clicked() || submitted {
                self.search(context);
            }
        });

        if let Some(error) = &self.error_message {
            ui.colored_label(Color32::RED, error);
        }
    }
}
