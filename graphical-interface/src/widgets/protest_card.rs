use chrono::NaiveDate;
use egui::{Color32, RichText};

use crate::{
    context::AppContext,
    format::{format_distance, format_protest_date, upcoming_date},
    types::Protest,
};

/// Summary of a single protest, shown in the nearby list and in the map popup.
pub struct WidgetProtestCard<'a> {
    protest: &'a Protest,
    today: NaiveDate,
    highlighted: bool,
}

impl<'a> WidgetProtestCard<'a> {
    pub fn new(protest: &'a Protest, today: NaiveDate) -> Self {
        Self {
            protest,
            today,
            highlighted: false,
        }
    }

    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Draws the card. The returned response covers the whole card.
    pub fn show(self, ui: &mut egui::Ui, context: &AppContext) -> egui::Response {
        let fill = if self.highlighted {
            Color32::from_gray(60)
        } else {
            ui.visuals().faint_bg_color
        };

        egui::Frame::group(ui.style())
            .fill(fill)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(&self.protest.display_name)
                        .size(16.0)
                        .strong(),
                );

                if let Some(admin) = &self.protest.admin_name {
                    ui.label(format!("Organized by {}", admin));
                }

                if let Some(address) = &self.protest.street_address {
                    ui.label(address);
                }

                match upcoming_date(&self.protest.dates, self.today) {
                    Some(entry) => {
                        ui.label(format_protest_date(entry));
                    }
                    None => {
                        if let Some(time) = &self.protest.meeting_time {
                            ui.label(format!("Meeting at {}", time));
                        }
                    }
                }

                if let Some(distance) = self.protest.distance {
                    ui.label(RichText::new(format_distance(distance)).weak());
                }

                if let Some(link) = &self.protest.whatsapp_link {
                    if ui.hyperlink_to("Join the WhatsApp group", link).clicked() {
                        context.record_whatsapp_click(self.protest);
                    }
                }
            })
            .response
    }
}
