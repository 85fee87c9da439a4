//! Message codes and request bodies exchanged with the host.
//!
//! Every message carries a numeric type and an opaque payload. Requests carry
//! UTF-8 JSON (possibly empty); replies always carry a JSON document or an
//! error string.

use serde::Deserialize;

/// Request: aircraft near a point.
pub const NEAREST_AIRCRAFT_REQUEST: u32 = 1;
/// Request: most-tracked flights.
pub const MOST_TRACKED_REQUEST: u32 = 2;
/// Request: saved waypoints.
pub const WAYPOINTS_REQUEST: u32 = 3;
/// Request: detail for one flight.
pub const AIRCRAFT_INFO_REQUEST: u32 = 4;

/// Reply to both aircraft list requests; consumers tell them apart by `category`.
pub const AIRCRAFT_LIST_RESPONSE: u32 = 101;
pub const WAYPOINTS_RESPONSE: u32 = 102;
pub const AIRCRAFT_INFO_RESPONSE: u32 = 103;

/// Acknowledgement sent for host initialisation codes.
pub const INIT_ACK: u32 = 200;
/// Payload of the init acknowledgement.
pub const INIT_ACK_PAYLOAD: &str = "Init";
/// Codes strictly above this are host initialisation messages.
pub const INIT_THRESHOLD: u32 = 1000;

/// Terminate code: the session stops without replying.
pub const TERMINATE: u32 = u32::MAX;

/// Inbound message from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub msg_type: u32,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(msg_type: u32, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            msg_type,
            payload: payload.into(),
        }
    }
}

/// Outbound message to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub msg_type: u32,
    pub payload: String,
}

impl Reply {
    pub fn new(msg_type: u32, payload: impl Into<String>) -> Self {
        Self {
            msg_type,
            payload: payload.into(),
        }
    }

    pub fn init_ack() -> Self {
        Self::new(INIT_ACK, INIT_ACK_PAYLOAD)
    }
}

/// Known request kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    NearestAircraft,
    MostTracked,
    Waypoints,
    AircraftInfo,
}

impl RequestKind {
    /// Maps a request code to its kind, or `None` for codes without a handler.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            NEAREST_AIRCRAFT_REQUEST => Some(Self::NearestAircraft),
            MOST_TRACKED_REQUEST => Some(Self::MostTracked),
            WAYPOINTS_REQUEST => Some(Self::Waypoints),
            AIRCRAFT_INFO_REQUEST => Some(Self::AircraftInfo),
            _ => None,
        }
    }

    /// Code of the reply carrying this request's result.
    pub fn response_code(self) -> u32 {
        match self {
            Self::NearestAircraft | Self::MostTracked => AIRCRAFT_LIST_RESPONSE,
            Self::Waypoints => WAYPOINTS_RESPONSE,
            Self::AircraftInfo => AIRCRAFT_INFO_RESPONSE,
        }
    }
}

/// Body of a nearest-aircraft request.
///
/// Missing fields decode as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NearestAircraftRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in nautical miles.
    pub radius: f64,
}

/// Body of an aircraft-info request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AircraftInfoRequest {
    #[serde(rename = "flightId")]
    pub flight_id: String,
}

/// Error text for a request body that failed to decode.
pub fn parse_error(detail: impl std::fmt::Display) -> String {
    format!("Error parsing request body: {}", detail)
}

/// Error text for a result that failed to encode.
pub fn format_error(detail: impl std::fmt::Display) -> String {
    format!("Error formatting response: {}", detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_codes_map_to_replies() {
        let expected = [
            (1, AIRCRAFT_LIST_RESPONSE),
            (2, AIRCRAFT_LIST_RESPONSE),
            (3, WAYPOINTS_RESPONSE),
            (4, AIRCRAFT_INFO_RESPONSE),
        ];
        for (code, reply) in expected {
            let kind = RequestKind::from_code(code).unwrap();
            assert_eq!(kind.response_code(), reply);
        }
    }

    #[test]
    fn test_unknown_codes() {
        for code in [0, 5, 101, 999, 1000, INIT_THRESHOLD + 1, TERMINATE] {
            assert!(RequestKind::from_code(code).is_none(), "code {}", code);
        }
    }

    #[test]
    fn test_nearest_request_decode() {
        let req: NearestAircraftRequest =
            serde_json::from_str(r#"{"latitude": 33.0, "longitude": -84.0, "radius": 25}"#)
                .unwrap();
        assert_eq!(req.radius, 25.0);

        let empty: NearestAircraftRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, NearestAircraftRequest::default());
    }

    #[test]
    fn test_nearest_request_wrong_type_is_error() {
        let result = serde_json::from_str::<NearestAircraftRequest>(r#"{"latitude": "north"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_info_request_decode() {
        let req: AircraftInfoRequest = serde_json::from_str(r#"{"flightId": "3a8f7c21"}"#).unwrap();
        assert_eq!(req.flight_id, "3a8f7c21");
    }

    #[test]
    fn test_error_texts() {
        assert_eq!(parse_error("eof"), "Error parsing request body: eof");
        assert_eq!(format_error("nan"), "Error formatting response: nan");
        assert_eq!(Reply::init_ack(), Reply::new(200, "Init"));
    }
}
