mod about;
mod address_bar;
mod header;
mod protest_card;
mod protest_list;
pub use about::WidgetAbout;
pub use address_bar::WidgetAddressBar;
pub use header::WidgetHeader;
pub use protest_card::WidgetProtestCard;
pub use protest_list::WidgetProtestList;

use crate::context::AppContext;

pub trait View {
    fn ui(&mut self, ui: &mut egui::Ui, context: &mut AppContext);
}
