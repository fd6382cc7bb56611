use egui::{Align, Layout, RichText};

use crate::{context::AppContext, types::Route};

use super::View;

pub const FACEBOOK_URL: &str = "https://www.facebook.com/1km.co.il";
pub const INSTAGRAM_URL: &str = "https://www.instagram.com/1km.co.il/";
pub const GITHUB_URL: &str = "https://github.com/guytepper/1km.co.il";

/// Top bar with the site title, the page menu and the social links.
#[derive(Default)]
pub struct WidgetHeader;

impl WidgetHeader {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ctx: &egui::Context, context: &mut AppContext) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| self.ui(ui, context));
    }
}

impl View for WidgetHeader {
    fn ui(&mut self, ui: &mut egui::Ui, context: &mut AppContext) {
        ui.horizontal(|ui| {
            if ui
                .add(egui::Button::new(RichText::new("1km").size(20.0).strong()).frame(false))
                .clicked()
            {
                context.route = Route::Map;
            }

            ui.separator();

            for route in [Route::Map, Route::About] {
                if ui
                    .selectable_label(context.route == route, route.title())
                    .clicked()
                {
                    context.route = route;
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.hyperlink_to("GitHub", GITHUB_URL);
                ui.hyperlink_to("Instagram", INSTAGRAM_URL);
                ui.hyperlink_to("Facebook", FACEBOOK_URL);
            });
        });
    }
}
