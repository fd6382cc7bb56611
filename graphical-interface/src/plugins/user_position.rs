use egui::{include_image, Color32, Image, Rect, Response, Stroke, Vec2};
use viewport::Coordinate;
use walkers::{Plugin, Position, Projector};

/// Marks the user's position and the circle of protests "within walking distance".
pub struct UserPosition {
    position: Coordinate,
    radius_m: f64,
}

impl UserPosition {
    pub fn new(position: Coordinate, radius_m: f64) -> Self {
        Self { position, radius_m }
    }
}

fn to_position(coordinate: &Coordinate) -> Position {
    Position::from_lat_lon(coordinate.latitude(), coordinate.longitude())
}

impl Plugin for UserPosition {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        let center = projector.project(to_position(&self.position)).to_pos2();
        let edge = projector
            .project(to_position(&self.position.offset_north(self.radius_m)))
            .to_pos2();
        let radius = center.distance(edge);

        ui.painter().circle(
            center,
            radius,
            Color32::from_rgba_unmultiplied(51, 136, 255, 40),
            Stroke::new(2.0, Color32::from_rgb(51, 136, 255)),
        );

        let symbol_size = Vec2::splat(18.0);
        let image = Image::new(include_image!(r"../../assets/my-position.svg"))
            .fit_to_exact_size(symbol_size);
        ui.put(Rect::from_center_size(center, symbol_size), image);
    }
}
