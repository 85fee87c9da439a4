//! Live feed data shapes and provider error type.
//!
//! These are our own types, decoupled from any third-party SDK. Only the
//! fields the enrichment engine needs are modelled; everything else in the
//! feed responses is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::geo::Bounds;

/// Errors that can occur when querying the live feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Response body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Flight identifier contains characters the feed never produces.
    #[error("Invalid flight id: '{0}'")]
    InvalidFlightId(String),
}

/// Source of live flight telemetry.
///
/// Calls are blocking; the session runs them on the blocking pool.
pub trait FlightProvider: Send + Sync {
    /// All flights currently inside `bounds`, keyed by flight id.
    fn zone_flights(&self, bounds: &Bounds) -> Result<HashMap<String, FeedFlight>, ProviderError>;

    /// The feed's most-tracked flights list.
    fn most_tracked(&self) -> Result<MostTrackedFeed, ProviderError>;

    /// Full detail for a single flight.
    fn flight_details(&self, flight_id: &str) -> Result<FlightDetail, ProviderError>;
}

/// Null-tolerant field helpers: JSON `null` and missing both become `Default`.
pub(crate) mod nullable {
    use super::*;

    pub fn value<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

// =============================================================================
// Zone feed
// =============================================================================

/// One aircraft from the zone feed.
///
/// The feed encodes each flight as a positional JSON array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedFlight {
    pub icao_24bit: String,
    pub latitude: f64,
    pub longitude: f64,
    pub heading: i64,
    pub altitude: i64,
    pub ground_speed: i64,
    pub squawk: String,
    pub radar: String,
    pub aircraft_code: String,
    pub registration: String,
    pub time: i64,
    pub origin_airport_iata: String,
    pub destination_airport_iata: String,
    pub number: String,
    pub on_ground: bool,
    pub vertical_speed: i64,
    pub callsign: String,
    pub airline_icao: String,
}

impl FeedFlight {
    /// Minimum array length for a usable record (through `callsign`).
    const MIN_FIELDS: usize = 17;

    /// Decodes the positional array form.
    ///
    /// Returns `None` when the array is too short or the position is missing.
    pub fn from_values(values: &[Value]) -> Option<Self> {
        if values.len() < Self::MIN_FIELDS {
            return None;
        }

        let str_at = |i: usize| {
            values
                .get(i)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let int_at = |i: usize| values.get(i).and_then(Value::as_i64).unwrap_or_default();

        Some(Self {
            icao_24bit: str_at(0),
            latitude: values[1].as_f64()?,
            longitude: values[2].as_f64()?,
            heading: int_at(3),
            altitude: int_at(4),
            ground_speed: int_at(5),
            squawk: str_at(6),
            radar: str_at(7),
            aircraft_code: str_at(8),
            registration: str_at(9),
            time: int_at(10),
            origin_airport_iata: str_at(11),
            destination_airport_iata: str_at(12),
            number: str_at(13),
            on_ground: int_at(14) != 0,
            vertical_speed: int_at(15),
            callsign: str_at(16),
            airline_icao: str_at(18),
        })
    }
}

/// Parses a zone feed body into flights keyed by flight id.
///
/// Non-flight members (`full_count`, `version`, `stats`) are skipped, as are
/// arrays that cannot be decoded.
pub fn parse_zone_feed(body: &[u8]) -> Result<HashMap<String, FeedFlight>, ProviderError> {
    let members: serde_json::Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| ProviderError::ParseError(e.to_string()))?;

    Ok(members
        .into_iter()
        .filter_map(|(id, value)| match value {
            Value::Array(values) => FeedFlight::from_values(&values).map(|f| (id, f)),
            _ => None,
        })
        .collect())
}

// =============================================================================
// Most tracked
// =============================================================================

/// One entry of the most-tracked list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MostTrackedFlight {
    #[serde(deserialize_with = "nullable::value")]
    pub flight_id: String,
    #[serde(deserialize_with = "nullable::value")]
    pub flight: String,
    #[serde(deserialize_with = "nullable::value")]
    pub callsign: String,
    #[serde(deserialize_with = "nullable::value")]
    pub squawk: String,
    #[serde(deserialize_with = "nullable::value")]
    pub clicks: u64,
    #[serde(deserialize_with = "nullable::value")]
    pub from_iata: String,
    #[serde(deserialize_with = "nullable::value")]
    pub from_city: String,
    #[serde(deserialize_with = "nullable::value")]
    pub to_iata: String,
    #[serde(deserialize_with = "nullable::value")]
    pub to_city: String,
    /// Type designator, e.g. `B738`.
    #[serde(deserialize_with = "nullable::value")]
    pub model: String,
    /// Free-text aircraft type, e.g. `Boeing 737-8H4`.
    #[serde(rename = "type", deserialize_with = "nullable::value")]
    pub aircraft_type: String,
}

/// The most-tracked response envelope.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MostTrackedFeed {
    #[serde(deserialize_with = "nullable::value")]
    pub version: String,
    #[serde(deserialize_with = "nullable::value")]
    pub data: Vec<MostTrackedFlight>,
}

impl MostTrackedFeed {
    /// Flattens the envelope into the ordered list of flights.
    pub fn into_flights(self) -> Vec<MostTrackedFlight> {
        self.data
    }
}

// =============================================================================
// Flight detail
// =============================================================================

/// Full detail for one flight.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlightDetail {
    #[serde(deserialize_with = "nullable::value")]
    pub identification: Identification,
    #[serde(deserialize_with = "nullable::value")]
    pub status: FlightStatus,
    #[serde(deserialize_with = "nullable::value")]
    pub aircraft: DetailAircraft,
    #[serde(deserialize_with = "nullable::value")]
    pub airline: NamedEntity,
    #[serde(deserialize_with = "nullable::value")]
    pub owner: NamedEntity,
    #[serde(deserialize_with = "nullable::value")]
    pub airport: DetailAirports,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Identification {
    #[serde(deserialize_with = "nullable::value")]
    pub id: String,
    #[serde(deserialize_with = "nullable::value")]
    pub callsign: String,
    #[serde(deserialize_with = "nullable::value")]
    pub number: FlightNumber,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlightNumber {
    #[serde(deserialize_with = "nullable::value")]
    pub default: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlightStatus {
    #[serde(deserialize_with = "nullable::value")]
    pub text: String,
    #[serde(deserialize_with = "nullable::value")]
    pub live: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetailAircraft {
    #[serde(deserialize_with = "nullable::value")]
    pub model: AircraftModel,
    #[serde(deserialize_with = "nullable::value")]
    pub registration: String,
    #[serde(deserialize_with = "nullable::value")]
    pub country: NamedEntity,
    #[serde(deserialize_with = "nullable::value")]
    pub images: AircraftImages,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AircraftModel {
    #[serde(deserialize_with = "nullable::value")]
    pub code: String,
    #[serde(deserialize_with = "nullable::value")]
    pub text: String,
}

/// Any `{ "name": ... }` object: airline, owner, country.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NamedEntity {
    #[serde(deserialize_with = "nullable::value")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AircraftImages {
    #[serde(deserialize_with = "nullable::value")]
    pub thumbnails: Vec<AircraftImage>,
    #[serde(deserialize_with = "nullable::value")]
    pub medium: Vec<AircraftImage>,
    #[serde(deserialize_with = "nullable::value")]
    pub large: Vec<AircraftImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AircraftImage {
    #[serde(deserialize_with = "nullable::value")]
    pub src: String,
    #[serde(deserialize_with = "nullable::value")]
    pub link: String,
    #[serde(deserialize_with = "nullable::value")]
    pub copyright: String,
    #[serde(deserialize_with = "nullable::value")]
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetailAirports {
    #[serde(deserialize_with = "nullable::value")]
    pub origin: DetailAirport,
    #[serde(deserialize_with = "nullable::value")]
    pub destination: DetailAirport,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetailAirport {
    #[serde(deserialize_with = "nullable::value")]
    pub name: String,
    #[serde(deserialize_with = "nullable::value")]
    pub code: AirportCode,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AirportCode {
    #[serde(deserialize_with = "nullable::value")]
    pub iata: String,
    #[serde(deserialize_with = "nullable::value")]
    pub icao: String,
}
