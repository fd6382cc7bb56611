use chrono::{NaiveDate, NaiveTime};
use viewport::Coordinate;

/// One scheduled occurrence of a protest.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtestDate {
    pub id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Represents a protest event with its location, schedule and contact details.
///
/// `distance` is the distance in meters from the position the protest was
/// fetched for, and is filled in by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Protest {
    pub id: String,
    pub display_name: String,
    pub street_address: Option<String>,
    pub coordinates: Coordinate,
    pub meeting_time: Option<String>,
    pub dates: Vec<ProtestDate>,
    pub whatsapp_link: Option<String>,
    pub admin_name: Option<String>,
    pub distance: Option<f64>,
}

impl Protest {
    pub fn new(id: String, display_name: String, coordinates: Coordinate) -> Self {
        Self {
            id,
            display_name,
            street_address: None,
            coordinates,
            meeting_time: None,
            dates: Vec::new(),
            whatsapp_link: None,
            admin_name: None,
            distance: None,
        }
    }
}
