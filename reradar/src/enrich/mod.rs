//! Joins live telemetry against the reference datasets.
//!
//! The engine turns raw provider records into display records for three
//! request shapes:
//!
//! - [`EnrichmentEngine::nearest`]: aircraft inside a zone around an observer
//! - [`EnrichmentEngine::most_tracked`]: the provider's most-tracked list
//! - [`EnrichmentEngine::aircraft_detail`]: one flight in detail
//!
//! Every string field leaving the engine holds either a real value or one of
//! the placeholders from [`crate::fallback`], with one exception: the nearest
//! list reports an empty `model` for types missing from the catalog.

mod types;

pub use types::{AircraftDetail, AircraftList, Category, MostTrackedAircraft, NearestAircraft};

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::fallback::{first_non_empty, first_non_empty_of, route, NOT_AVAILABLE, PRIVATE_OWNER};
use crate::geo::{distance_nm, Coordinate};
use crate::provider::{FeedFlight, FlightDetail, FlightProvider, MostTrackedFlight};
use crate::reference::{ReferenceError, ReferenceStore};

/// Formats telemetry using a shared [`ReferenceStore`].
#[derive(Debug, Clone)]
pub struct EnrichmentEngine {
    store: Arc<ReferenceStore>,
}

impl EnrichmentEngine {
    pub fn new(store: Arc<ReferenceStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<ReferenceStore> {
        &self.store
    }

    /// Formats every flight in a zone feed relative to `observer`.
    ///
    /// An unavailable airline registry yields an empty list; an unavailable
    /// catalog is returned as an error. Output order follows the map and is
    /// therefore unspecified.
    pub fn nearest(
        &self,
        flights: &HashMap<String, FeedFlight>,
        observer: Coordinate,
    ) -> Result<AircraftList<NearestAircraft>, ReferenceError> {
        let catalog = self.store.aircraft_types()?;
        let airlines = match self.store.airlines() {
            Ok(registry) => registry,
            Err(e) => {
                warn!(error = %e, "Airline registry unavailable, returning no aircraft");
                return Ok(AircraftList::empty(Category::Nearest));
            }
        };

        let aircraft = flights
            .iter()
            .map(|(flight_id, flight)| {
                let model = catalog
                    .get(&flight.aircraft_code)
                    .map(|t| t.model_full_name.clone())
                    .unwrap_or_default();
                let operator = airlines
                    .get(&flight.airline_icao)
                    .map(|a| a.name.as_str())
                    .unwrap_or_default();
                let position = Coordinate::new(flight.latitude, flight.longitude);

                NearestAircraft {
                    model,
                    route: route(
                        &flight.origin_airport_iata,
                        &flight.destination_airport_iata,
                    ),
                    operator: first_non_empty(operator, PRIVATE_OWNER).to_string(),
                    registration: first_non_empty(&flight.registration, NOT_AVAILABLE).to_string(),
                    distance: distance_nm(observer, position),
                    flight_id: flight_id.clone(),
                }
            })
            .collect::<Vec<_>>();

        debug!(count = aircraft.len(), "Formatted nearest aircraft");
        Ok(AircraftList {
            category: Category::Nearest,
            aircraft,
        })
    }

    /// Formats the most-tracked list, preserving its order.
    pub fn most_tracked(
        &self,
        flights: &[MostTrackedFlight],
    ) -> Result<AircraftList<MostTrackedAircraft>, ReferenceError> {
        let catalog = self.store.aircraft_types()?;

        let aircraft = flights
            .iter()
            .map(|flight| {
                let catalog_name = catalog
                    .get(&flight.model)
                    .map(|t| t.model_full_name.as_str())
                    .unwrap_or_default();

                MostTrackedAircraft {
                    model: first_non_empty_of(
                        [catalog_name, flight.model.as_str(), flight.aircraft_type.as_str()],
                        NOT_AVAILABLE,
                    )
                    .to_string(),
                    route: route(&flight.from_iata, &flight.to_iata),
                    flight: first_non_empty(&flight.flight, PRIVATE_OWNER).to_string(),
                    squawk: first_non_empty(&flight.squawk, NOT_AVAILABLE).to_string(),
                    callsign: first_non_empty(&flight.callsign, NOT_AVAILABLE).to_string(),
                    flight_id: flight.flight_id.clone(),
                }
            })
            .collect();

        Ok(AircraftList {
            category: Category::MostTracked,
            aircraft,
        })
    }

    /// Fetches and formats one flight.
    ///
    /// A failed fetch yields [`AircraftDetail::default`].
    pub fn aircraft_detail(
        &self,
        provider: &dyn FlightProvider,
        flight_id: &str,
    ) -> AircraftDetail {
        match provider.flight_details(flight_id) {
            Ok(detail) => format_detail(&detail),
            Err(e) => {
                warn!(flight_id, error = %e, "Flight detail unavailable");
                AircraftDetail::default()
            }
        }
    }
}

/// Maps a fetched detail to its display form.
pub fn format_detail(detail: &FlightDetail) -> AircraftDetail {
    let images = &detail.aircraft.images;
    let image_url = [&images.large, &images.medium, &images.thumbnails]
        .into_iter()
        .find_map(|set| set.first())
        .map(|image| image.src.clone())
        .unwrap_or_default();

    let origin = &detail.airport.origin;
    let destination = &detail.airport.destination;

    AircraftDetail {
        image_url,
        country: detail.aircraft.country.name.clone(),
        model: detail.aircraft.model.text.clone(),
        registration: detail.aircraft.registration.clone(),
        route: route(&origin.code.iata, &destination.code.iata),
        operator: first_non_empty_of(
            [detail.airline.name.as_str(), detail.owner.name.as_str()],
            PRIVATE_OWNER,
        )
        .to_string(),
        callsign: detail.identification.callsign.clone(),
        flight_id: detail.identification.id.clone(),
        departure_airport: origin.name.clone(),
        arrival_airport: destination.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::haversine_nm;
    use crate::provider::{AircraftImage, MockFlightProvider};
    use crate::reference::tests::CountingSource;

    const CATALOG: &str = r#"[
        {"Designator": "B738", "ModelFullName": "Boeing 737-800"},
        {"Designator": "A359", "ModelFullName": "AIRBUS A-350-900"}
    ]"#;
    const REGISTRY: &str = "\
Delta Air Lines,DL,DAL,DELTA,United States,Y
Ghost Air,GH,,DAL,Nowhere,N
";

    fn engine() -> EnrichmentEngine {
        EnrichmentEngine::new(Arc::new(ReferenceStore::new(CountingSource::new(
            CATALOG, REGISTRY,
        ))))
    }

    fn delta_flight() -> FeedFlight {
        FeedFlight {
            aircraft_code: "B738".to_string(),
            airline_icao: "DAL".to_string(),
            origin_airport_iata: "ATL".to_string(),
            registration: "N12345".to_string(),
            latitude: 33.0,
            longitude: -84.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_nearest_joins_catalog_and_registry() {
        let flights = HashMap::from([("3a8f7c21".to_string(), delta_flight())]);
        let observer = Coordinate::new(33.5, -84.5);

        let list = engine().nearest(&flights, observer).unwrap();
        assert_eq!(list.category, Category::Nearest);
        assert_eq!(list.len(), 1);

        let record = &list.aircraft[0];
        assert_eq!(record.model, "Boeing 737-800");
        assert_eq!(record.route, "ATL->N/A");
        assert_eq!(record.operator, "Delta Air Lines");
        assert_eq!(record.registration, "N12345");
        assert_eq!(record.flight_id, "3a8f7c21");
        assert_eq!(record.distance, haversine_nm(33.5, -84.5, 33.0, -84.0));
    }

    #[test]
    fn test_nearest_unmatched_fields() {
        let flight = FeedFlight {
            aircraft_code: "ZZZZ".to_string(),
            ..Default::default()
        };
        let flights = HashMap::from([("abc".to_string(), flight)]);

        let list = engine().nearest(&flights, Coordinate::new(0.0, 0.0)).unwrap();
        let record = &list.aircraft[0];
        assert_eq!(record.model, "");
        assert_eq!(record.route, "N/A->N/A");
        assert_eq!(record.operator, "private owner");
        assert_eq!(record.registration, "N/A");
        assert_eq!(record.distance, 0.0);
    }

    #[test]
    fn test_nearest_never_matches_empty_icao_entry() {
        let flight = FeedFlight {
            airline_icao: String::new(),
            ..delta_flight()
        };
        let flights = HashMap::from([("abc".to_string(), flight)]);

        let list = engine()
            .nearest(&flights, Coordinate::new(33.0, -84.0))
            .unwrap();
        assert_eq!(list.aircraft[0].operator, "private owner");
    }

    #[test]
    fn test_nearest_degrades_without_registry() {
        let source = CountingSource {
            aircraft_types: Some(CATALOG.to_string()),
            airlines: None,
            ..Default::default()
        };
        let engine = EnrichmentEngine::new(Arc::new(ReferenceStore::new(source)));
        let flights = HashMap::from([("3a8f7c21".to_string(), delta_flight())]);

        let list = engine.nearest(&flights, Coordinate::new(33.0, -84.0)).unwrap();
        assert_eq!(list.category, Category::Nearest);
        assert!(list.is_empty());
    }

    #[test]
    fn test_catalog_failure_is_error() {
        let engine = EnrichmentEngine::new(Arc::new(ReferenceStore::new(CountingSource::new(
            "not json", REGISTRY,
        ))));
        let flights = HashMap::from([("3a8f7c21".to_string(), delta_flight())]);

        assert!(engine.nearest(&flights, Coordinate::new(0.0, 0.0)).is_err());
        assert!(engine.most_tracked(&[]).is_err());
    }

    #[test]
    fn test_nearest_empty_feed() {
        let list = engine()
            .nearest(&HashMap::new(), Coordinate::new(0.0, 0.0))
            .unwrap();
        assert!(list.is_empty());
    }

    fn tracked(model: &str, aircraft_type: &str) -> MostTrackedFlight {
        MostTrackedFlight {
            flight_id: "3a9b0c11".to_string(),
            model: model.to_string(),
            aircraft_type: aircraft_type.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_most_tracked_model_fallback_chain() {
        let flights = vec![
            tracked("A359", "Airbus A350-941"),
            tracked("C55B", "Cessna 550"),
            tracked("", "A320"),
            tracked("", ""),
        ];

        let list = engine().most_tracked(&flights).unwrap();
        let models: Vec<&str> = list.aircraft.iter().map(|a| a.model.as_str()).collect();
        assert_eq!(models, ["AIRBUS A-350-900", "C55B", "A320", "N/A"]);
    }

    #[test]
    fn test_most_tracked_placeholders_and_order() {
        let mut first = tracked("B738", "");
        first.flight_id = "first".to_string();
        first.flight = "DL1".to_string();
        first.squawk = "7700".to_string();
        first.callsign = "DAL1".to_string();
        first.from_iata = "ATL".to_string();
        first.to_iata = "JFK".to_string();
        let mut second = tracked("", "");
        second.flight_id = "second".to_string();

        let list = engine().most_tracked(&[first, second]).unwrap();
        assert_eq!(list.category, Category::MostTracked);

        let a = &list.aircraft[0];
        assert_eq!(a.flight_id, "first");
        assert_eq!(a.route, "ATL->JFK");
        assert_eq!(a.flight, "DL1");
        assert_eq!(a.squawk, "7700");
        assert_eq!(a.callsign, "DAL1");

        let b = &list.aircraft[1];
        assert_eq!(b.flight_id, "second");
        assert_eq!(b.route, "N/A->N/A");
        assert_eq!(b.flight, "private owner");
        assert_eq!(b.squawk, "N/A");
        assert_eq!(b.callsign, "N/A");
    }

    fn image(src: &str) -> AircraftImage {
        AircraftImage {
            src: src.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_detail_image_priority() {
        let mut detail = FlightDetail::default();
        detail.aircraft.images.thumbnails = vec![image("thumb")];
        assert_eq!(format_detail(&detail).image_url, "thumb");

        detail.aircraft.images.medium = vec![image("medium")];
        assert_eq!(format_detail(&detail).image_url, "medium");

        detail.aircraft.images.large = vec![image("large"), image("other")];
        assert_eq!(format_detail(&detail).image_url, "large");

        assert_eq!(format_detail(&FlightDetail::default()).image_url, "");
    }

    #[test]
    fn test_detail_operator_fallback() {
        let mut detail = FlightDetail::default();
        assert_eq!(format_detail(&detail).operator, "private owner");

        detail.owner.name = "NetJets".to_string();
        assert_eq!(format_detail(&detail).operator, "NetJets");

        detail.airline.name = "Air France".to_string();
        assert_eq!(format_detail(&detail).operator, "Air France");
    }

    #[test]
    fn test_detail_fields() {
        let mut detail = FlightDetail::default();
        detail.identification.id = "3a9b0c11".to_string();
        detail.identification.callsign = "AFR1".to_string();
        detail.aircraft.model.text = "Airbus A350-941".to_string();
        detail.aircraft.registration = "F-HTYA".to_string();
        detail.aircraft.country.name = "France".to_string();
        detail.airport.origin.name = "New York JFK".to_string();
        detail.airport.origin.code.iata = "JFK".to_string();

        let formatted = format_detail(&detail);
        assert_eq!(formatted.flight_id, "3a9b0c11");
        assert_eq!(formatted.callsign, "AFR1");
        assert_eq!(formatted.model, "Airbus A350-941");
        assert_eq!(formatted.registration, "F-HTYA");
        assert_eq!(formatted.country, "France");
        assert_eq!(formatted.route, "JFK->N/A");
        assert_eq!(formatted.departure_airport, "New York JFK");
        assert_eq!(formatted.arrival_airport, "");
    }

    #[test]
    fn test_detail_fetch_failure_is_zero_value() {
        let provider = MockFlightProvider::default();
        let detail = engine().aircraft_detail(&provider, "3a9b0c11");
        assert_eq!(detail, AircraftDetail::default());
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_detail_does_not_load_store() {
        let engine = engine();
        let provider = MockFlightProvider {
            detail: Some(FlightDetail::default()),
            ..Default::default()
        };
        engine.aircraft_detail(&provider, "3a9b0c11");
        assert!(!engine.store().is_aircraft_types_loaded());
    }
}
