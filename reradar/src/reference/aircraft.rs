//! Aircraft type catalog (ICAO Doc 8643 designators).

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;

/// ICAO wake turbulence category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum WakeTurbulenceCategory {
    #[serde(rename = "L")]
    Light,
    #[serde(rename = "L/M")]
    LightMedium,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "H")]
    Heavy,
    #[serde(rename = "J")]
    Super,
    #[default]
    #[serde(other)]
    Unknown,
}

/// RECAT-EU wake turbulence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum WakeTurbulenceGroup {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    Z,
    #[serde(other)]
    Unknown,
}

/// Engine family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum EngineType {
    Electric,
    Jet,
    Piston,
    Rocket,
    #[serde(rename = "Turboprop/Turboshaft")]
    TurbopropTurboshaft,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Airframe class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum AircraftDescription {
    Amphibian,
    Gyrocopter,
    Helicopter,
    LandPlane,
    SeaPlane,
    Tiltrotor,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One row of the aircraft type catalog.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AircraftTypeEntry {
    /// Type designator, e.g. `B738`.
    pub designator: String,
    /// Manufacturer and model, e.g. `BOEING 737-800`.
    pub model_full_name: String,
    /// ICAO type description code, e.g. `L2J`.
    pub description: String,
    #[serde(rename = "WTC")]
    pub wake_turbulence_category: WakeTurbulenceCategory,
    #[serde(rename = "WTG")]
    pub wake_turbulence_group: Option<WakeTurbulenceGroup>,
    pub manufacturer_code: String,
    /// Engine count as published; `C` marks coupled engines.
    pub engine_count: String,
    pub engine_type: EngineType,
    pub show_in_part3_only: bool,
    pub aircraft_description: AircraftDescription,
}

/// Catalog of aircraft types indexed by designator.
///
/// Duplicate designators keep the first occurrence for lookups.
#[derive(Debug, Default)]
pub struct AircraftTypeCatalog {
    entries: Vec<AircraftTypeEntry>,
    by_designator: HashMap<String, usize>,
}

impl AircraftTypeCatalog {
    /// Builds a catalog from entries in source order.
    pub fn from_entries(entries: Vec<AircraftTypeEntry>) -> Self {
        let mut by_designator = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            by_designator.entry(entry.designator.clone()).or_insert(i);
        }
        Self {
            entries,
            by_designator,
        }
    }

    /// Parses a JSON array of catalog entries.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        let entries: Vec<AircraftTypeEntry> = serde_json::from_reader(reader)?;
        Ok(Self::from_entries(entries))
    }

    /// Looks up a type by designator.
    pub fn get(&self, designator: &str) -> Option<&AircraftTypeEntry> {
        self.by_designator
            .get(designator)
            .map(|&i| &self.entries[i])
    }

    /// All entries in source order.
    pub fn entries(&self) -> &[AircraftTypeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "ModelFullName": "BOEING 737-800",
            "Description": "L2J",
            "WTC": "M",
            "WTG": "D",
            "Designator": "B738",
            "ManufacturerCode": "BOEING",
            "ShowInPart3Only": false,
            "AircraftDescription": "LandPlane",
            "EngineCount": "2",
            "EngineType": "Jet"
        },
        {
            "ModelFullName": "Boeing 737-800 (duplicate)",
            "Description": "L2J",
            "WTC": "M",
            "WTG": null,
            "Designator": "B738",
            "ManufacturerCode": "BOEING",
            "ShowInPart3Only": true,
            "AircraftDescription": "LandPlane",
            "EngineCount": "2",
            "EngineType": "Jet"
        },
        {
            "ModelFullName": "AIRBUS A-320",
            "Description": "L2J",
            "WTC": "M",
            "Designator": "A320",
            "ManufacturerCode": "AIRBUS",
            "ShowInPart3Only": false,
            "AircraftDescription": "LandPlane",
            "EngineCount": "2",
            "EngineType": "Jet"
        }
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = AircraftTypeCatalog::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);

        let b738 = catalog.get("B738").unwrap();
        assert_eq!(b738.model_full_name, "BOEING 737-800");
        assert_eq!(b738.wake_turbulence_category, WakeTurbulenceCategory::Medium);
        assert_eq!(b738.wake_turbulence_group, Some(WakeTurbulenceGroup::D));
        assert_eq!(b738.engine_type, EngineType::Jet);
        assert_eq!(b738.aircraft_description, AircraftDescription::LandPlane);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let catalog = AircraftTypeCatalog::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            catalog.get("B738").unwrap().model_full_name,
            "BOEING 737-800"
        );
        // Duplicates are still retained in the loaded set
        assert_eq!(
            catalog
                .entries()
                .iter()
                .filter(|e| e.designator == "B738")
                .count(),
            2
        );
    }

    #[test]
    fn test_missing_wtg_is_none() {
        let catalog = AircraftTypeCatalog::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(catalog.get("A320").unwrap().wake_turbulence_group, None);
    }

    #[test]
    fn test_unknown_enum_values_tolerated() {
        let json = r#"[{"Designator": "ZZZZ", "EngineType": "Nuclear", "WTC": "X"}]"#;
        let catalog = AircraftTypeCatalog::from_reader(json.as_bytes()).unwrap();
        let entry = catalog.get("ZZZZ").unwrap();
        assert_eq!(entry.engine_type, EngineType::Unknown);
        assert_eq!(entry.wake_turbulence_category, WakeTurbulenceCategory::Unknown);
        assert_eq!(entry.model_full_name, "");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = AircraftTypeCatalog::from_reader(SAMPLE.as_bytes()).unwrap();
        assert!(catalog.get("b738").is_none());
        assert!(catalog.get("").is_none());
    }

    #[test]
    fn test_malformed_catalog_is_error() {
        assert!(AircraftTypeCatalog::from_reader("{\"not\": \"an array\"}".as_bytes()).is_err());
        assert!(AircraftTypeCatalog::from_reader("[".as_bytes()).is_err());
    }
}
