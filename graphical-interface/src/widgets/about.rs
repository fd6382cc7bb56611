use egui::RichText;

use crate::context::AppContext;

use super::{header::GITHUB_URL, View};

/// Static page describing the project.
#[derive(Default)]
pub struct WidgetAbout;

impl WidgetAbout {
    pub fn new() -> Self {
        Self
    }
}

impl View for WidgetAbout {
    fn ui(&mut self, ui: &mut egui::Ui, context: &mut AppContext) {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.label(RichText::new("About").size(26.0).strong());
            ui.add_space(15.0);
            ui.label(
                "The map shows the protests taking place around you. \
                 Search for your address and the protests within walking distance \
                 will be listed next to the map, together with the contact of the \
                 people who organize them.",
            );
            ui.add_space(10.0);
            ui.label(format!(
                "Protests are looked up within {:.0} meters of the place you are looking at.",
                context.tracker().radius_m()
            ));
            ui.add_space(10.0);
            ui.hyperlink_to("The project is open source", GITHUB_URL);
        });
    }
}
