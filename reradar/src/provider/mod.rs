//! Live flight feed abstraction
//!
//! This module provides the [`FlightProvider`] trait the enrichment engine
//! queries, and a Flightradar24 implementation over a pluggable
//! [`HttpClient`].
//!
//! ```ignore
//! use reradar::provider::{Flightradar24Provider, ReqwestClient};
//!
//! let http_client = ReqwestClient::new()?;
//! let provider = Flightradar24Provider::new(http_client);
//! let feed = provider.most_tracked()?;
//! ```

mod flightradar;
mod http;
#[cfg(test)]
mod mock;
mod types;

pub use flightradar::{
    FeedEndpoints, Flightradar24Provider, FLIGHT_DETAILS_URL, MOST_TRACKED_URL, ZONE_FEED_URL,
};
pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use types::{
    parse_zone_feed, AircraftImage, AircraftImages, AircraftModel, AirportCode, DetailAircraft,
    DetailAirport, DetailAirports, FeedFlight, FlightDetail, FlightNumber, FlightProvider,
    FlightStatus, Identification, MostTrackedFeed, MostTrackedFlight, NamedEntity, ProviderError,
};

#[cfg(test)]
pub use http::tests::MockHttpClient;
#[cfg(test)]
pub use mock::MockFlightProvider;
