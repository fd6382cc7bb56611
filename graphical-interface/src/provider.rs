use std::{fmt, fs::File, io::Read, path::Path};

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use viewport::{Coordinate, FetchRequest};

use crate::types::{Protest, ProtestDate};

/// Errors raised while loading or querying protest data.
#[derive(Debug)]
pub enum ProviderError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRecord { id: String, reason: String },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Io(e) => write!(f, "I/O error reading protests: {}", e),
            ProviderError::Csv(e) => write!(f, "Malformed protests file: {}", e),
            ProviderError::InvalidRecord { id, reason } => {
                write!(f, "Invalid protest '{}': {}", id, reason)
            }
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProviderError::Io(e) => Some(e),
            ProviderError::Csv(e) => Some(e),
            ProviderError::InvalidRecord { .. } => None,
        }
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        ProviderError::Io(err)
    }
}

impl From<csv::Error> for ProviderError {
    fn from(err: csv::Error) -> Self {
        ProviderError::Csv(err)
    }
}

/// A source of protest events.
///
/// Implementations are called from fetch worker threads, so they must be
/// shareable between threads.
pub trait ProtestProvider: Send + Sync {
    /// Returns the protests around `request.position`, each with its `distance` set.
    fn fetch_protests(&self, request: &FetchRequest) -> Result<Vec<Protest>, ProviderError>;
}

/// A row of the protests file.
#[derive(Debug, Deserialize)]
struct ProtestRecord {
    id: String,
    display_name: String,
    street_address: Option<String>,
    latitude: f64,
    longitude: f64,
    meeting_time: Option<String>,
    dates: Option<String>,
    whatsapp_link: Option<String>,
    admin_name: Option<String>,
}

impl ProtestRecord {
    fn into_protest(self) -> Result<Protest, ProviderError> {
        let invalid = |reason: String| ProviderError::InvalidRecord {
            id: self.id.clone(),
            reason,
        };

        let coordinates =
            Coordinate::new(self.latitude, self.longitude).map_err(|e| invalid(e.to_string()))?;

        let dates = match &self.dates {
            Some(dates) => parse_dates(&self.id, dates).map_err(invalid)?,
            None => Vec::new(),
        };

        Ok(Protest {
            id: self.id,
            display_name: self.display_name,
            street_address: self.street_address,
            coordinates,
            meeting_time: self.meeting_time,
            dates,
            whatsapp_link: self.whatsapp_link,
            admin_name: self.admin_name,
            distance: None,
        })
    }
}

/// Parses `"YYYY-MM-DD HH:MM;YYYY-MM-DD HH:MM"` into protest dates.
fn parse_dates(protest_id: &str, raw: &str) -> Result<Vec<ProtestDate>, String> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .map(|(index, entry)| {
            let (date, time) = entry
                .split_once(' ')
                .ok_or_else(|| format!("date '{}' has no time", entry))?;
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| format!("invalid date '{}'", date))?;
            let time = time.trim();
            let time = NaiveTime::parse_from_str(time, "%H:%M")
                .map_err(|_| format!("invalid time '{}'", time))?;

            Ok(ProtestDate {
                id: format!("{}-{}", protest_id, index),
                date,
                time,
            })
        })
        .collect()
}

/// Serves protests from a CSV file loaded in memory.
///
/// Expected header:
/// `id,display_name,street_address,latitude,longitude,meeting_time,dates,whatsapp_link,admin_name`
pub struct CsvProvider {
    protests: Vec<Protest>,
    radius_m: f64,
}

impl CsvProvider {
    /// Loads every protest in a CSV file.
    ///
    /// # Parameters
    /// - `path`: Path to the protests file.
    /// - `radius_m`: Protests farther than this from a requested position are left out of its results.
    ///
    /// # Returns
    /// A new `CsvProvider`, or the I/O, CSV or record error that stopped the load.
    pub fn open(path: &Path, radius_m: f64) -> Result<Self, ProviderError> {
        let file = File::open(path)?;
        Self::from_reader(file, radius_m)
    }

    pub fn from_reader<R: Read>(reader: R, radius_m: f64) -> Result<Self, ProviderError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut protests = Vec::new();
        for record in reader.deserialize::<ProtestRecord>() {
            protests.push(record?.into_protest()?);
        }

        Ok(Self { protests, radius_m })
    }

    pub fn len(&self) -> usize {
        self.protests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protests.is_empty()
    }
}

impl ProtestProvider for CsvProvider {
    fn fetch_protests(&self, request: &FetchRequest) -> Result<Vec<Protest>, ProviderError> {
        let mut nearby: Vec<Protest> = self
            .protests
            .iter()
            .filter_map(|protest| {
                let distance = request.position.distance_to(&protest.coordinates);
                (distance <= self.radius_m).then(|| Protest {
                    distance: Some(distance),
                    ..protest.clone()
                })
            })
            .collect();

        nearby.sort_by(|a, b| a.distance.unwrap_or(0.0).total_cmp(&b.distance.unwrap_or(0.0)));
        Ok(nearby)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTESTS: &str = "\
id,display_name,street_address,latitude,longitude,meeting_time,dates,whatsapp_link,admin_name
balfour,Balfour Square,Balfour St 1,31.7749837,35.219797,,2026-10-20 19:00;2026-10-27 19:00,https://chat.whatsapp.com/a,Dana
paris,Paris Square,,31.7773,35.2156,18:30,,,
habima,Habima Square,Rothschild Blvd,32.0726,34.7794,,,,
";

    fn request(lat: f64, lon: f64) -> FetchRequest {
        FetchRequest {
            only_markers: false,
            position: Coordinate::new(lat, lon).unwrap(),
        }
    }

    #[test]
    fn test_loads_every_record() {
        let provider = CsvProvider::from_reader(PROTESTS.as_bytes(), 3000.0).unwrap();
        assert_eq!(provider.len(), 3);
    }

    #[test]
    fn test_fetch_filters_by_radius_and_sorts_by_distance() {
        let provider = CsvProvider::from_reader(PROTESTS.as_bytes(), 3000.0).unwrap();
        let protests = provider.fetch_protests(&request(31.7773, 35.2156)).unwrap();

        let ids: Vec<&str> = protests.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["paris", "balfour"]);
        assert_eq!(protests[0].distance, Some(0.0));
        assert!(protests[1].distance.unwrap() > 0.0);
    }

    #[test]
    fn test_optional_fields_and_dates() {
        let provider = CsvProvider::from_reader(PROTESTS.as_bytes(), 3000.0).unwrap();
        let protests = provider.fetch_protests(&request(31.7749837, 35.219797)).unwrap();

        let balfour = &protests[0];
        assert_eq!(balfour.street_address.as_deref(), Some("Balfour St 1"));
        assert_eq!(balfour.admin_name.as_deref(), Some("Dana"));
        assert_eq!(balfour.dates.len(), 2);
        assert_eq!(balfour.dates[1].id, "balfour-1");
        assert_eq!(balfour.dates[1].time.format("%H:%M").to_string(), "19:00");

        let paris = &protests[1];
        assert_eq!(paris.street_address, None);
        assert_eq!(paris.meeting_time.as_deref(), Some("18:30"));
        assert!(paris.dates.is_empty());
    }

    #[test]
    fn test_rejects_invalid_coordinates() {
        let data = "\
id,display_name,street_address,latitude,longitude,meeting_time,dates,whatsapp_link,admin_name
bad,Nowhere,,123.0,35.0,,,,
";
        let result = CsvProvider::from_reader(data.as_bytes(), 3000.0);
        assert!(matches!(result, Err(ProviderError::InvalidRecord { ref id, .. }) if id == "bad"));
    }

    #[test]
    fn test_rejects_malformed_dates() {
        assert!(parse_dates("x", "2026-10-20").is_err());
        assert!(parse_dates("x", "2026-13-20 19:00").is_err());
        assert!(parse_dates("x", "2026-10-20 25:00").is_err());
        assert!(parse_dates("x", " ; ").unwrap().is_empty());
    }
}
