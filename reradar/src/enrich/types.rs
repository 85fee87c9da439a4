//! Display records sent to the front end.

use serde::Serialize;

/// Which list an aircraft list response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Nearest,
    MostTracked,
}

/// Envelope for both aircraft list replies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AircraftList<T> {
    pub category: Category,
    pub aircraft: Vec<T>,
}

impl<T> AircraftList<T> {
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            aircraft: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }
}

/// One aircraft near the observer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestAircraft {
    /// Catalog model name; empty when the type is not in the catalog.
    pub model: String,
    pub route: String,
    pub operator: String,
    pub registration: String,
    /// Great-circle distance from the observer in nautical miles.
    pub distance: f64,
    pub flight_id: String,
}

/// One entry of the most-tracked list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MostTrackedAircraft {
    pub model: String,
    pub route: String,
    pub flight: String,
    pub squawk: String,
    pub callsign: String,
    pub flight_id: String,
}

/// Detail view of a single flight.
///
/// The default value (all fields empty) is returned when the detail fetch
/// fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftDetail {
    #[serde(rename = "aircraftImageUrl")]
    pub image_url: String,
    pub country: String,
    pub model: String,
    pub registration: String,
    pub route: String,
    pub operator: String,
    pub callsign: String,
    pub flight_id: String,
    pub departure_airport: String,
    pub arrival_airport: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nearest_list_field_names() {
        let list = AircraftList {
            category: Category::Nearest,
            aircraft: vec![NearestAircraft {
                model: "BOEING 737-800".to_string(),
                route: "ATL->N/A".to_string(),
                operator: "Delta Air Lines".to_string(),
                registration: "N12345".to_string(),
                distance: 12.5,
                flight_id: "3a8f7c21".to_string(),
            }],
        };

        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            json!({
                "category": "nearest",
                "aircraft": [{
                    "model": "BOEING 737-800",
                    "route": "ATL->N/A",
                    "operator": "Delta Air Lines",
                    "registration": "N12345",
                    "distance": 12.5,
                    "flightId": "3a8f7c21"
                }]
            })
        );
    }

    #[test]
    fn test_most_tracked_category_name() {
        let list: AircraftList<MostTrackedAircraft> = AircraftList::empty(Category::MostTracked);
        assert_eq!(
            serde_json::to_string(&list).unwrap(),
            r#"{"category":"mostTracked","aircraft":[]}"#
        );
    }

    #[test]
    fn test_detail_field_names() {
        let value = serde_json::to_value(AircraftDetail::default()).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        for key in [
            "aircraftImageUrl",
            "country",
            "model",
            "registration",
            "route",
            "operator",
            "callsign",
            "flightId",
            "departureAirport",
            "arrivalAirport",
        ] {
            assert!(keys.contains(&key), "missing {}", key);
        }
        assert_eq!(keys.len(), 10);
    }
}
