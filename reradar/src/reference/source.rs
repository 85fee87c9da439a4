//! Where the reference datasets are read from.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

/// File name of the aircraft type catalog.
pub const AIRCRAFT_TYPES_FILE: &str = "AircraftTypes.json";

/// File name of the airline registry.
pub const AIRLINES_FILE: &str = "airlines.csv";

static EMBEDDED_AIRCRAFT_TYPES: &[u8] = include_bytes!("../../datasets/AircraftTypes.json");
static EMBEDDED_AIRLINES: &[u8] = include_bytes!("../../datasets/airlines.csv");

/// Provides readers over the two reference resources.
pub trait DatasetSource: Send + Sync {
    /// Opens the aircraft type catalog (JSON array).
    fn open_aircraft_types(&self) -> io::Result<Box<dyn Read + '_>>;

    /// Opens the airline registry (headerless CSV).
    fn open_airlines(&self) -> io::Result<Box<dyn Read + '_>>;

    /// Human-readable origin for log messages.
    fn describe(&self) -> String;
}

/// Datasets compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedDatasets;

impl DatasetSource for EmbeddedDatasets {
    fn open_aircraft_types(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(EMBEDDED_AIRCRAFT_TYPES))
    }

    fn open_airlines(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(EMBEDDED_AIRLINES))
    }

    fn describe(&self) -> String {
        "embedded".to_string()
    }
}

/// Datasets read from files in a directory.
///
/// The directory must contain [`AIRCRAFT_TYPES_FILE`] and [`AIRLINES_FILE`].
#[derive(Debug, Clone)]
pub struct DirectoryDatasets {
    directory: PathBuf,
}

impl DirectoryDatasets {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(self.directory.join(name))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

impl DatasetSource for DirectoryDatasets {
    fn open_aircraft_types(&self) -> io::Result<Box<dyn Read + '_>> {
        self.open(AIRCRAFT_TYPES_FILE)
    }

    fn open_airlines(&self) -> io::Result<Box<dyn Read + '_>> {
        self.open(AIRLINES_FILE)
    }

    fn describe(&self) -> String {
        self.directory.display().to_string()
    }
}
