use std::{fmt, fs::File, io::Read, path::Path};

use serde::Deserialize;
use viewport::Coordinate;

#[derive(Debug)]
pub enum GeocodeError {
    NotFound(String),
    Ambiguous(Vec<String>),
    InvalidPlace(String),
    Io(std::io::Error),
    Csv(csv::Error),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::NotFound(query) => write!(f, "No place matches '{}'", query),
            GeocodeError::Ambiguous(names) => {
                write!(f, "Several places match: {}", names.join(", "))
            }
            GeocodeError::InvalidPlace(name) => write!(f, "Place '{}' has invalid coordinates", name),
            GeocodeError::Io(e) => write!(f, "I/O error reading places: {}", e),
            GeocodeError::Csv(e) => write!(f, "Malformed places file: {}", e),
        }
    }
}

impl std::error::Error for GeocodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeocodeError::Io(e) => Some(e),
            GeocodeError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GeocodeError {
    fn from(err: std::io::Error) -> Self {
        GeocodeError::Io(err)
    }
}

impl From<csv::Error> for GeocodeError {
    fn from(err: csv::Error) -> Self {
        GeocodeError::Csv(err)
    }
}

/// Resolves a free-text address into a position on the map.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct PlaceRecord {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone)]
struct Place {
    name: String,
    key: String,
    position: Coordinate,
}

/// A geocoder backed by a CSV list of named places (`name,latitude,longitude`).
///
/// Matching ignores case and surrounding whitespace. An exact name wins;
/// otherwise the query must be contained in exactly one place name.
pub struct CsvGazetteer {
    places: Vec<Place>,
}

impl CsvGazetteer {
    pub fn open(path: &Path) -> Result<Self, GeocodeError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GeocodeError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut places = Vec::new();
        for record in reader.deserialize::<PlaceRecord>() {
            let record = record?;
            let position = Coordinate::new(record.latitude, record.longitude)
                .map_err(|_| GeocodeError::InvalidPlace(record.name.clone()))?;
            places.push(Place {
                key: normalize(&record.name),
                name: record.name,
                position,
            });
        }

        Ok(Self { places })
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Geocoder for CsvGazetteer {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let query = normalize(address);
        if query.is_empty() {
            return Err(GeocodeError::NotFound(address.to_string()));
        }

        if let Some(place) = self.places.iter().find(|place| place.key == query) {
            return Ok(place.position);
        }

        let matches: Vec<&Place> = self
            .places
            .iter()
            .filter(|place| place.key.contains(&query))
            .collect();

        match matches.as_slice() {
            [] => Err(GeocodeError::NotFound(address.to_string())),
            [place] => Ok(place.position),
            many => Err(GeocodeError::Ambiguous(
                many.iter().map(|place| place.name.clone()).collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACES: &str = "\
name,latitude,longitude
Jerusalem,31.7683,35.2137
Jerusalem Old City,31.7767,35.2345
Tel Aviv,32.0853,34.7818
Haifa,32.7940,34.9896
";

    fn gazetteer() -> CsvGazetteer {
        CsvGazetteer::from_reader(PLACES.as_bytes()).unwrap()
    }

    #[test]
    fn test_exact_match_wins_over_substring() {
        let position = gazetteer().geocode("  jerusalem ").unwrap();
        assert_eq!(position, Coordinate::new(31.7683, 35.2137).unwrap());
    }

    #[test]
    fn test_unique_substring_match() {
        let position = gazetteer().geocode("tel   AVIV").unwrap();
        assert_eq!(position, Coordinate::new(32.0853, 34.7818).unwrap());

        let position = gazetteer().geocode("old city").unwrap();
        assert_eq!(position, Coordinate::new(31.7767, 35.2345).unwrap());
    }

    #[test]
    fn test_ambiguous_and_missing_queries() {
        let gazetteer = gazetteer();
        assert!(matches!(
            gazetteer.geocode("a"),
            Err(GeocodeError::Ambiguous(names)) if names.len() == 4
        ));
        assert!(matches!(
            gazetteer.geocode("Eilat"),
            Err(GeocodeError::NotFound(_))
        ));
        assert!(matches!(gazetteer.geocode("   "), Err(GeocodeError::NotFound(_))));
    }

    #[test]
    fn test_rejects_invalid_place() {
        let data = "name,latitude,longitude\nMoon,100.0,0.0\n";
        assert!(matches!(
            CsvGazetteer::from_reader(data.as_bytes()),
            Err(GeocodeError::InvalidPlace(name)) if name == "Moon"
        ));
    }
}
