//! Routes host messages to their handlers.
//!
//! The dispatcher is synchronous: each call decodes one message, runs the
//! blocking provider or file work it needs, and returns the replies to send.
//! Sequencing and transport concerns belong to [`crate::session`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::enrich::{AircraftList, EnrichmentEngine, MostTrackedAircraft, NearestAircraft};
use crate::geo::{bounds_from_point, Coordinate, GeoError, METERS_PER_NM};
use crate::protocol::{
    format_error, parse_error, AircraftInfoRequest, Message, NearestAircraftRequest, Reply,
    RequestKind, INIT_THRESHOLD, TERMINATE,
};
use crate::provider::FlightProvider;
use crate::reference::ReferenceError;
use crate::waypoints::{WaypointStore, WaypointsResponse};

/// Result of dispatching one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Replies to send, in order. May be empty.
    Replies(Vec<Reply>),
    /// The host asked the session to stop.
    Terminate,
}

/// Maps inbound messages to enrichment, provider and waypoint calls.
#[derive(Clone)]
pub struct Dispatcher {
    engine: EnrichmentEngine,
    provider: Arc<dyn FlightProvider>,
    waypoints: Arc<dyn WaypointStore>,
}

impl Dispatcher {
    pub fn new(
        engine: EnrichmentEngine,
        provider: Arc<dyn FlightProvider>,
        waypoints: Arc<dyn WaypointStore>,
    ) -> Self {
        Self {
            engine,
            provider,
            waypoints,
        }
    }

    pub fn engine(&self) -> &EnrichmentEngine {
        &self.engine
    }

    /// Handles one message.
    ///
    /// Request-level problems become error replies. The only error returned
    /// is an unavailable aircraft type catalog, which ends the session.
    pub fn dispatch(&self, message: &Message) -> Result<Outcome, ReferenceError> {
        debug!(
            msg_type = message.msg_type,
            payload = %String::from_utf8_lossy(&message.payload),
            "Received message"
        );

        if message.msg_type == TERMINATE {
            info!("Received termination message");
            return Ok(Outcome::Terminate);
        }

        let mut replies = Vec::new();
        if message.msg_type > INIT_THRESHOLD {
            replies.push(Reply::init_ack());
        }

        let Some(kind) = RequestKind::from_code(message.msg_type) else {
            if replies.is_empty() {
                debug!(msg_type = message.msg_type, "Ignoring unrecognized message");
            }
            return Ok(Outcome::Replies(replies));
        };

        let reply = self.handle(kind, &message.payload)?;
        replies.push(reply);
        Ok(Outcome::Replies(replies))
    }

    /// Convenience for callers that only need the replies.
    pub fn dispatch_replies(&self, message: &Message) -> Result<Vec<Reply>, ReferenceError> {
        match self.dispatch(message)? {
            Outcome::Replies(replies) => Ok(replies),
            Outcome::Terminate => Ok(Vec::new()),
        }
    }

    fn handle(&self, kind: RequestKind, payload: &[u8]) -> Result<Reply, ReferenceError> {
        let code = kind.response_code();
        let body = match kind {
            RequestKind::NearestAircraft => match decode_nearest(payload) {
                Ok(request) => encode(&self.nearest(request)?),
                Err(message) => Err(message),
            },
            RequestKind::MostTracked => encode(&self.most_tracked()?),
            RequestKind::Waypoints => encode(&WaypointsResponse {
                waypoints: self.waypoints.read_waypoints(),
            }),
            RequestKind::AircraftInfo => {
                match serde_json::from_slice::<AircraftInfoRequest>(payload) {
                    Ok(request) => encode(
                        &self
                            .engine
                            .aircraft_detail(self.provider.as_ref(), &request.flight_id),
                    ),
                    Err(e) => Err(parse_error(e)),
                }
            }
        };

        Ok(match body {
            Ok(json) => Reply::new(code, json),
            Err(message) => {
                warn!(?kind, %message, "Request failed");
                Reply::new(code, message)
            }
        })
    }

    fn nearest(
        &self,
        request: NearestAircraftRequest,
    ) -> Result<AircraftList<NearestAircraft>, ReferenceError> {
        let bounds = bounds_from_point(
            request.latitude,
            request.longitude,
            request.radius * METERS_PER_NM,
        );

        let flights = match self.provider.zone_flights(&bounds) {
            Ok(flights) => flights,
            Err(e) => {
                warn!(%bounds, error = %e, "Zone query failed, treating as empty");
                Default::default()
            }
        };

        self.engine.nearest(
            &flights,
            Coordinate::new(request.latitude, request.longitude),
        )
    }

    fn most_tracked(&self) -> Result<AircraftList<MostTrackedAircraft>, ReferenceError> {
        let flights = match self.provider.most_tracked() {
            Ok(feed) => feed.into_flights(),
            Err(e) => {
                warn!(error = %e, "Most-tracked query failed, treating as empty");
                Vec::new()
            }
        };
        self.engine.most_tracked(&flights)
    }
}

/// Decodes and validates a nearest-aircraft body.
fn decode_nearest(payload: &[u8]) -> Result<NearestAircraftRequest, String> {
    let request: NearestAircraftRequest = serde_json::from_slice(payload).map_err(parse_error)?;
    validate_nearest(&request).map_err(parse_error)?;
    Ok(request)
}

fn validate_nearest(request: &NearestAircraftRequest) -> Result<(), GeoError> {
    Coordinate::new(request.latitude, request.longitude).validated()?;
    if !request.radius.is_finite() || request.radius < 0.0 {
        return Err(GeoError::InvalidRadius(request.radius));
    }
    Ok(())
}

fn encode<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(format_error)
}
