//! Canned flight provider for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::types::{FeedFlight, FlightDetail, FlightProvider, MostTrackedFeed, ProviderError};
use crate::geo::Bounds;

/// Provider returning fixed responses and counting calls.
#[derive(Default)]
pub struct MockFlightProvider {
    pub zone: HashMap<String, FeedFlight>,
    pub most_tracked: MostTrackedFeed,
    pub detail: Option<FlightDetail>,
    pub fail_zone: bool,
    pub calls: AtomicUsize,
    pub last_bounds: Mutex<Option<Bounds>>,
}

impl MockFlightProvider {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FlightProvider for MockFlightProvider {
    fn zone_flights(&self, bounds: &Bounds) -> Result<HashMap<String, FeedFlight>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_bounds.lock() = Some(*bounds);
        if self.fail_zone {
            return Err(ProviderError::HttpError("zone unavailable".to_string()));
        }
        Ok(self.zone.clone())
    }

    fn most_tracked(&self) -> Result<MostTrackedFeed, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.most_tracked.clone())
    }

    fn flight_details(&self, flight_id: &str) -> Result<FlightDetail, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.detail
            .clone()
            .ok_or_else(|| ProviderError::HttpError(format!("no detail for {}", flight_id)))
    }
}
