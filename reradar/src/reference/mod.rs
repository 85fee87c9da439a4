//! Reference datasets joined against live telemetry.
//!
//! Two static datasets ship with the program:
//!
//! - the aircraft type catalog (`AircraftTypes.json`), keyed by designator
//! - the airline registry (`airlines.csv`), keyed by ICAO code
//!
//! [`ReferenceStore`] loads each one lazily on first access and keeps it for
//! the lifetime of the store. A store is an ordinary value shared through an
//! `Arc`, so tests get a fresh cache simply by building a new store.
//!
//! # Failure policy
//!
//! The catalog is mandatory: a load failure is returned to the caller, which
//! treats it as fatal for the session. The registry is optional: callers
//! degrade to empty results when it cannot be loaded.
//!
//! # Example
//!
//! ```
//! use reradar::reference::{EmbeddedDatasets, ReferenceStore};
//!
//! let store = ReferenceStore::new(EmbeddedDatasets);
//! let catalog = store.aircraft_types().unwrap();
//! assert!(catalog.get("B738").is_some());
//! ```

mod aircraft;
mod airlines;
mod error;
mod source;

pub use aircraft::{
    AircraftDescription, AircraftTypeCatalog, AircraftTypeEntry, EngineType,
    WakeTurbulenceCategory, WakeTurbulenceGroup,
};
pub use airlines::{AirlineEntry, AirlineRegistry, AIRLINE_COLUMNS};
pub use error::ReferenceError;
pub use source::{
    DatasetSource, DirectoryDatasets, EmbeddedDatasets, AIRCRAFT_TYPES_FILE, AIRLINES_FILE,
};

use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::info;

/// Lazily populated, read-only cache of both reference datasets.
///
/// Each dataset has its own init gate: concurrent first callers serialize on
/// the gate, exactly one reads the resource, and everyone observes the fully
/// built value through the `OnceLock`. Once populated the fast path takes no
/// lock at all.
pub struct ReferenceStore {
    source: Box<dyn DatasetSource>,
    aircraft_types: OnceLock<AircraftTypeCatalog>,
    airlines: OnceLock<AirlineRegistry>,
    aircraft_types_gate: Mutex<()>,
    airlines_gate: Mutex<()>,
}

impl ReferenceStore {
    /// Creates an empty store reading from `source` on first access.
    pub fn new<S: DatasetSource + 'static>(source: S) -> Self {
        Self {
            source: Box::new(source),
            aircraft_types: OnceLock::new(),
            airlines: OnceLock::new(),
            aircraft_types_gate: Mutex::new(()),
            airlines_gate: Mutex::new(()),
        }
    }

    /// Creates a store over the datasets compiled into the binary.
    pub fn embedded() -> Self {
        Self::new(EmbeddedDatasets)
    }

    /// Returns the aircraft type catalog, loading it on first call.
    pub fn aircraft_types(&self) -> Result<&AircraftTypeCatalog, ReferenceError> {
        if let Some(catalog) = self.aircraft_types.get() {
            return Ok(catalog);
        }

        let _gate = self.aircraft_types_gate.lock();
        if let Some(catalog) = self.aircraft_types.get() {
            return Ok(catalog);
        }

        let reader = self
            .source
            .open_aircraft_types()
            .map_err(|e| ReferenceError::open(AIRCRAFT_TYPES_FILE, e))?;
        let catalog = AircraftTypeCatalog::from_reader(reader)?;

        info!(
            count = catalog.len(),
            source = %self.source.describe(),
            first = catalog.entries().first().map(|e| e.model_full_name.as_str()).unwrap_or(""),
            "Loaded aircraft type catalog"
        );

        Ok(self.aircraft_types.get_or_init(|| catalog))
    }

    /// Returns the airline registry, loading it on first call.
    pub fn airlines(&self) -> Result<&AirlineRegistry, ReferenceError> {
        if let Some(registry) = self.airlines.get() {
            return Ok(registry);
        }

        let _gate = self.airlines_gate.lock();
        if let Some(registry) = self.airlines.get() {
            return Ok(registry);
        }

        let reader = self
            .source
            .open_airlines()
            .map_err(|e| ReferenceError::open(AIRLINES_FILE, e))?;
        let registry = AirlineRegistry::from_reader(reader)?;

        info!(
            count = registry.len(),
            source = %self.source.describe(),
            "Loaded airline registry"
        );

        Ok(self.airlines.get_or_init(|| registry))
    }

    /// True once the catalog has been loaded.
    pub fn is_aircraft_types_loaded(&self) -> bool {
        self.aircraft_types.get().is_some()
    }

    /// True once the registry has been loaded.
    pub fn is_airlines_loaded(&self) -> bool {
        self.airlines.get().is_some()
    }
}

impl std::fmt::Debug for ReferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceStore")
            .field("source", &self.source.describe())
            .field("aircraft_types_loaded", &self.is_aircraft_types_loaded())
            .field("airlines_loaded", &self.is_airlines_loaded())
            .finish()
    }
}
