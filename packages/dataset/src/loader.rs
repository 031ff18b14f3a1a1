//! Startup loading of the data directory into a [`Registry`].
//!
//! Expected layout under the data directory:
//!
//! ```text
//! count_level_summary.csv    county reference table
//! site_county_lookup.csv     site -> county bridge
//! soil/*.csv                 one measurement table per dataset
//! water/*.csv                one measurement table per dataset
//! counties.geojson           US county boundaries (read elsewhere)
//! ```
//!
//! The dataset identifier exposed to the UI is the file stem, so
//! `soil/arsenic_soil.csv` registers as `arsenic_soil` in the Soil
//! collection. Non-CSV files are skipped.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use geohazard_map_dataset_models::{CountySummary, SiteCountyLookup, SiteMeasurement};
use serde::de::DeserializeOwned;

use crate::{Registry, RegistryError};

/// File name of the county reference table.
pub const SUMMARY_FILE: &str = "count_level_summary.csv";

/// File name of the site-to-county bridge table.
pub const LOOKUP_FILE: &str = "site_county_lookup.csv";

/// Sub-directory holding soil measurement tables.
pub const SOIL_DIR: &str = "soil";

/// Sub-directory holding water measurement tables.
pub const WATER_DIR: &str = "water";

/// File name of the US county boundary file, loaded by the geography
/// crate from the same data directory.
pub const COUNTIES_GEOJSON: &str = "counties.geojson";

/// Loads every table under `data_dir` into a fresh [`Registry`].
///
/// # Errors
///
/// Returns [`RegistryError`] if any expected file is missing, unreadable,
/// or fails CSV deserialization. Loading is all-or-nothing: a malformed
/// file fails startup rather than serving a partial registry.
pub fn load(data_dir: &Path) -> Result<Registry, RegistryError> {
    let county_summary: Vec<CountySummary> = read_csv_file(&data_dir.join(SUMMARY_FILE))?;
    let site_county_lookup: Vec<SiteCountyLookup> = read_csv_file(&data_dir.join(LOOKUP_FILE))?;
    let soil = read_measurement_dir(&data_dir.join(SOIL_DIR))?;
    let water = read_measurement_dir(&data_dir.join(WATER_DIR))?;

    log::info!(
        "Loaded {} counties, {} site lookups, {} soil datasets, {} water datasets",
        county_summary.len(),
        site_county_lookup.len(),
        soil.len(),
        water.len()
    );

    Ok(Registry::from_parts(
        soil,
        water,
        county_summary,
        site_county_lookup,
    ))
}

/// Reads every `*.csv` file in `dir` into a dataset map keyed by file
/// stem. Files without a `.csv` extension are ignored.
fn read_measurement_dir(
    dir: &Path,
) -> Result<BTreeMap<String, Vec<SiteMeasurement>>, RegistryError> {
    let entries = fs::read_dir(dir).map_err(|source| RegistryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut datasets = BTreeMap::new();

    for entry in entries {
        let entry = entry.map_err(|source| RegistryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let rows: Vec<SiteMeasurement> = read_csv_file(&path)?;
        log::debug!("Loaded dataset `{stem}` ({} rows) from {}", rows.len(), path.display());
        datasets.insert(stem.to_string(), rows);
    }

    Ok(datasets)
}

/// Reads one CSV file into typed rows, attaching the path to any error.
fn read_csv_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, RegistryError> {
    let file = fs::File::open(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(file).map_err(|source| RegistryError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Deserializes CSV rows from any reader. Extra columns are ignored, so
/// the bridge table can carry the full site survey export.
fn parse_csv<T: DeserializeOwned>(reader: impl Read) -> Result<Vec<T>, csv::Error> {
    csv::Reader::from_reader(reader)
        .into_deserialize()
        .collect()
}
