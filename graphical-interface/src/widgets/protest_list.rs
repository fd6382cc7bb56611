use chrono::Local;
use egui::RichText;

use crate::context::AppContext;

use super::{View, WidgetProtestCard};

/// Side panel listing the protests closest to the user.
#[derive(Default)]
pub struct WidgetProtestList;

impl WidgetProtestList {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ctx: &egui::Context, context: &mut AppContext) {
        egui::SidePanel::left("protest_list")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.ui(ui, context));
    }
}

impl View for WidgetProtestList {
    fn ui(&mut self, ui: &mut egui::Ui, context: &mut AppContext) {
        let nearby = &context.store.view().nearby;

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Protests near you").size(20.0).strong());
            if context.fetcher().in_flight() > 0 {
                ui.spinner();
            }
        });
        ui.add_space(10.0);

        if context.store.user_position().is_none() {
            ui.label("Search for your address to find the protests around you.");
            return;
        }

        if nearby.is_empty() {
            ui.label("No protests were found near you.");
            return;
        }

        let today = Local::now().date_naive();
        let mut hovered = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            for protest in nearby {
                let highlighted = context.selection.borrow().is_selected(protest);
                let response = WidgetProtestCard::new(protest, today)
                    .highlighted(highlighted)
                    .show(ui, context);

                if response.contains_pointer() {
                    hovered = Some(protest.id.as_str());
                }
                ui.add_space(6.0);
            }
        });

        context.selection.borrow_mut().set_hovered(hovered);
    }
}
