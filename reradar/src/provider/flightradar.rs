//! Flightradar24 live feed provider.
//!
//! Three public, unauthenticated endpoints are used:
//!
//! - zone feed: every flight inside a bounding box, as positional arrays
//! - most tracked: the list of flights with the most viewers
//! - click handler: full detail for one flight id
//!
//! # URL Patterns
//!
//! `{zone_feed}?bounds={n},{s},{w},{e}&faa=1&...`
//! `{most_tracked}`
//! `{flight_details}?version=1.5&flight={id}`

use std::collections::HashMap;

use tracing::debug;

use crate::geo::Bounds;
use crate::provider::{
    parse_zone_feed, FeedFlight, FlightDetail, FlightProvider, HttpClient, MostTrackedFeed,
    ProviderError,
};

/// Zone feed endpoint.
pub const ZONE_FEED_URL: &str = "https://data-cloud.flightradar24.com/zones/fcgi/feed.js";

/// Most-tracked endpoint.
pub const MOST_TRACKED_URL: &str = "https://www.flightradar24.com/flights/most-tracked";

/// Flight detail endpoint.
pub const FLIGHT_DETAILS_URL: &str = "https://data-live.flightradar24.com/clickhandler/";

/// Query flags requesting every source and vehicle class.
const ZONE_FEED_FLAGS: &str = "faa=1&satellite=1&mlat=1&flarm=1&adsb=1&gnd=1&air=1\
&vehicles=1&estimated=1&maxage=14400&gliders=1&stats=1";

/// Base URLs for the three feed endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEndpoints {
    pub zone_feed: String,
    pub most_tracked: String,
    pub flight_details: String,
}

impl Default for FeedEndpoints {
    fn default() -> Self {
        Self {
            zone_feed: ZONE_FEED_URL.to_string(),
            most_tracked: MOST_TRACKED_URL.to_string(),
            flight_details: FLIGHT_DETAILS_URL.to_string(),
        }
    }
}

/// Flightradar24 feed client.
///
/// # Example
///
/// ```ignore
/// use reradar::provider::{Flightradar24Provider, ReqwestClient};
///
/// let client = ReqwestClient::new().unwrap();
/// let provider = Flightradar24Provider::new(client);
/// ```
pub struct Flightradar24Provider<C: HttpClient> {
    http_client: C,
    endpoints: FeedEndpoints,
}

impl<C: HttpClient> Flightradar24Provider<C> {
    /// Creates a provider against the public endpoints.
    pub fn new(http_client: C) -> Self {
        Self::with_endpoints(http_client, FeedEndpoints::default())
    }

    pub fn with_endpoints(http_client: C, endpoints: FeedEndpoints) -> Self {
        Self {
            http_client,
            endpoints,
        }
    }

    fn zone_url(&self, bounds: &Bounds) -> String {
        format!(
            "{}?bounds={}&{}",
            self.endpoints.zone_feed, bounds, ZONE_FEED_FLAGS
        )
    }

    fn details_url(&self, flight_id: &str) -> String {
        format!(
            "{}?version=1.5&flight={}",
            self.endpoints.flight_details, flight_id
        )
    }
}

/// Feed ids are short hex strings; anything else would alter the query.
fn validate_flight_id(flight_id: &str) -> Result<(), ProviderError> {
    if flight_id.is_empty() || !flight_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ProviderError::InvalidFlightId(flight_id.to_string()));
    }
    Ok(())
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ProviderError> {
    serde_json::from_slice(body).map_err(|e| ProviderError::ParseError(e.to_string()))
}

impl<C: HttpClient> FlightProvider for Flightradar24Provider<C> {
    fn zone_flights(&self, bounds: &Bounds) -> Result<HashMap<String, FeedFlight>, ProviderError> {
        let url = self.zone_url(bounds);
        debug!(%bounds, "Querying zone feed");
        let body = self.http_client.get(&url)?;
        let flights = parse_zone_feed(&body)?;
        debug!(count = flights.len(), "Zone feed returned flights");
        Ok(flights)
    }

    fn most_tracked(&self) -> Result<MostTrackedFeed, ProviderError> {
        let body = self.http_client.get(&self.endpoints.most_tracked)?;
        parse_json(&body)
    }

    fn flight_details(&self, flight_id: &str) -> Result<FlightDetail, ProviderError> {
        validate_flight_id(flight_id)?;
        let body = self.http_client.get(&self.details_url(flight_id))?;
        parse_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockHttpClient;

    fn bounds() -> Bounds {
        Bounds {
            north: 34.0,
            south: 32.0,
            west: -85.0,
            east: -83.0,
        }
    }

    #[test]
    fn test_zone_url_construction() {
        let provider = Flightradar24Provider::new(MockHttpClient::ok("{}"));
        let url = provider.zone_url(&bounds());
        assert!(url.starts_with(
            "https://data-cloud.flightradar24.com/zones/fcgi/feed.js?bounds=34.000000,32.000000,-85.000000,-83.000000&"
        ));
        assert!(url.contains("gnd=1"));
        assert!(url.ends_with("stats=1"));
    }

    #[test]
    fn test_details_url_construction() {
        let provider = Flightradar24Provider::new(MockHttpClient::ok("{}"));
        assert_eq!(
            provider.details_url("3a8f7c21"),
            "https://data-live.flightradar24.com/clickhandler/?version=1.5&flight=3a8f7c21"
        );
    }

    #[test]
    fn test_zone_flights_success() {
        let body = r#"{"full_count": 1, "version": 4,
            "3a8f7c21": ["A1B2C3", 33.0, -84.0, 270, 35000, 450, "1200", "F-KATL1", "B738",
                         "N12345", 1718000000, "ATL", "", "DL1234", 0, 0, "DAL1234", 0, "DAL"]}"#;
        let provider = Flightradar24Provider::new(MockHttpClient::ok(body));

        let flights = provider.zone_flights(&bounds()).unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights["3a8f7c21"].aircraft_code, "B738");
    }

    #[test]
    fn test_zone_flights_network_error() {
        let provider = Flightradar24Provider::new(MockHttpClient::failing("connection refused"));
        assert!(matches!(
            provider.zone_flights(&bounds()),
            Err(ProviderError::HttpError(_))
        ));
    }

    #[test]
    fn test_most_tracked_parse_error() {
        let provider = Flightradar24Provider::new(MockHttpClient::ok("<html>"));
        assert!(matches!(
            provider.most_tracked(),
            Err(ProviderError::ParseError(_))
        ));
    }

    #[test]
    fn test_most_tracked_uses_endpoint() {
        let client = MockHttpClient::ok(r#"{"version": "1", "data": []}"#);
        let provider = Flightradar24Provider::with_endpoints(
            client,
            FeedEndpoints {
                most_tracked: "http://localhost/most".to_string(),
                ..FeedEndpoints::default()
            },
        );

        assert!(provider.most_tracked().unwrap().into_flights().is_empty());
        assert_eq!(
            provider.http_client.last_url().as_deref(),
            Some("http://localhost/most")
        );
    }

    #[test]
    fn test_flight_details_rejects_unsafe_id() {
        let provider = Flightradar24Provider::new(MockHttpClient::ok("{}"));
        assert!(matches!(
            provider.flight_details("abc&flight=def"),
            Err(ProviderError::InvalidFlightId(_))
        ));
        assert!(matches!(
            provider.flight_details(""),
            Err(ProviderError::InvalidFlightId(_))
        ));
        assert!(provider.http_client.last_url().is_none());
    }

    #[test]
    fn test_flight_details_success() {
        let body = r#"{"identification": {"id": "3a8f7c21", "callsign": "DAL1234"}}"#;
        let provider = Flightradar24Provider::new(MockHttpClient::ok(body));
        let detail = provider.flight_details("3a8f7c21").unwrap();
        assert_eq!(detail.identification.callsign, "DAL1234");
    }
}
