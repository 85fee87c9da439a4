//! Airline registry (OpenFlights `airlines.csv` layout).

use std::collections::HashMap;
use std::io::Read;

use tracing::debug;

/// Number of columns in a well-formed registry row.
pub const AIRLINE_COLUMNS: usize = 6;

/// One airline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AirlineEntry {
    pub name: String,
    pub iata_code: String,
    pub icao_code: String,
    pub callsign: String,
    pub country: String,
    pub active: bool,
}

/// Airline registry indexed by ICAO code.
///
/// Entries with an empty ICAO code are kept in [`entries`](Self::entries)
/// but can never be matched by [`get`](Self::get).
#[derive(Debug, Default)]
pub struct AirlineRegistry {
    entries: Vec<AirlineEntry>,
    by_icao: HashMap<String, usize>,
}

impl AirlineRegistry {
    /// Builds a registry from entries in source order; first ICAO match wins.
    pub fn from_entries(entries: Vec<AirlineEntry>) -> Self {
        let mut by_icao = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if entry.icao_code.is_empty() {
                continue;
            }
            by_icao.entry(entry.icao_code.clone()).or_insert(i);
        }
        Self { entries, by_icao }
    }

    /// Parses headerless CSV rows of `name,IATA,ICAO,callsign,country,active`.
    ///
    /// Rows with any other column count are skipped. Invalid UTF-8 inside a
    /// field is replaced rather than rejected.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut entries = Vec::new();
        let mut skipped = 0usize;
        for result in csv_reader.byte_records() {
            let record = result?;
            if record.len() != AIRLINE_COLUMNS {
                debug!(
                    columns = record.len(),
                    line = record.position().map(|p| p.line()),
                    "Skipping airline row with invalid column count"
                );
                skipped += 1;
                continue;
            }

            entries.push(AirlineEntry {
                name: lossy(&record[0]),
                iata_code: lossy(&record[1]),
                icao_code: lossy(&record[2]),
                callsign: lossy(&record[3]),
                country: lossy(&record[4]),
                active: &record[5] == b"Y",
            });
        }

        debug!(loaded = entries.len(), skipped, "Parsed airline registry");
        Ok(Self::from_entries(entries))
    }

    /// Looks up an airline by ICAO code. Empty codes never match.
    pub fn get(&self, icao_code: &str) -> Option<&AirlineEntry> {
        if icao_code.is_empty() {
            return None;
        }
        self.by_icao.get(icao_code).map(|&i| &self.entries[i])
    }

    /// All entries in source order, including those without an ICAO code.
    pub fn entries(&self) -> &[AirlineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn lossy(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}
