#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV loading and the immutable dataset registry.
//!
//! The registry holds every table the dashboard serves: the county
//! reference table, the site-to-county bridge, and one measurement table
//! per dataset file found under the `soil/` and `water/` data
//! directories. It is built once at startup by [`loader::load`] and is
//! read-only for the remainder of the process; handlers share it via
//! `Arc`.

pub mod loader;

use std::collections::BTreeMap;
use std::path::PathBuf;

use geohazard_map_dataset_models::{CountySummary, Domain, SiteCountyLookup, SiteMeasurement};
use thiserror::Error;

/// Errors that can occur while building or querying the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The requested dataset id is not registered for the domain. Routine:
    /// some datasets are incomplete by design, so callers surface this to
    /// the user instead of treating it as fatal.
    #[error("no {domain} dataset named `{dataset_id}`")]
    NotFound {
        /// Domain that was searched.
        domain: Domain,
        /// The missing dataset identifier.
        dataset_id: String,
    },

    /// A data file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the offending file or directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A data file could not be parsed as CSV with the expected columns.
    #[error("failed to parse {path}: {source}")]
    Csv {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
}

/// Process-wide read-only table store.
///
/// Measurement tables are keyed by dataset identifier (the source file
/// stem) within each [`Domain`] collection. `BTreeMap` keeps the id
/// listing sorted for dropdown population.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    soil: BTreeMap<String, Vec<SiteMeasurement>>,
    water: BTreeMap<String, Vec<SiteMeasurement>>,
    county_summary: Vec<CountySummary>,
    site_county_lookup: Vec<SiteCountyLookup>,
}

impl Registry {
    /// Builds a registry from already-loaded tables.
    #[must_use]
    pub const fn from_parts(
        soil: BTreeMap<String, Vec<SiteMeasurement>>,
        water: BTreeMap<String, Vec<SiteMeasurement>>,
        county_summary: Vec<CountySummary>,
        site_county_lookup: Vec<SiteCountyLookup>,
    ) -> Self {
        Self {
            soil,
            water,
            county_summary,
            site_county_lookup,
        }
    }

    const fn collection(&self, domain: Domain) -> &BTreeMap<String, Vec<SiteMeasurement>> {
        match domain {
            Domain::Soil => &self.soil,
            Domain::Water => &self.water,
        }
    }

    /// Returns the measurement rows for `(domain, dataset_id)`, in the
    /// order they were loaded.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the id is absent from the
    /// domain's collection.
    pub fn get(&self, domain: Domain, dataset_id: &str) -> Result<&[SiteMeasurement], RegistryError> {
        self.collection(domain)
            .get(dataset_id)
            .map(Vec::as_slice)
            .ok_or_else(|| RegistryError::NotFound {
                domain,
                dataset_id: dataset_id.to_string(),
            })
    }

    /// Returns all dataset identifiers registered for `domain`, sorted.
    /// Used to populate selection dropdowns.
    #[must_use]
    pub fn dataset_ids(&self, domain: Domain) -> Vec<&str> {
        self.collection(domain).keys().map(String::as_str).collect()
    }

    /// The fixed county reference table.
    #[must_use]
    pub fn county_summary(&self) -> &[CountySummary] {
        &self.county_summary
    }

    /// The fixed site-to-county bridge table.
    #[must_use]
    pub fn site_county_lookup(&self) -> &[SiteCountyLookup] {
        &self.site_county_lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(site: &str, counts: f64) -> SiteMeasurement {
        SiteMeasurement {
            site_name: site.to_string(),
            longitude: -84.0,
            latitude: 33.0,
            counts,
        }
    }

    fn registry() -> Registry {
        let mut soil = BTreeMap::new();
        soil.insert(
            "arsenic_soil".to_string(),
            vec![measurement("A", 5.0), measurement("B", 3.0)],
        );
        soil.insert("lead_soil".to_string(), vec![measurement("C", 2.0)]);
        let water = BTreeMap::new();
        Registry::from_parts(soil, water, Vec::new(), Vec::new())
    }

    #[test]
    fn get_returns_rows_in_load_order() {
        let reg = registry();
        let rows = reg.get(Domain::Soil, "arsenic_soil").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].site_name, "A");
        assert_eq!(rows[1].site_name, "B");
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let reg = registry();
        let err = reg.get(Domain::Soil, "nonexistent").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::NotFound { domain: Domain::Soil, ref dataset_id }
                if dataset_id == "nonexistent"
        ));
    }

    #[test]
    fn get_checks_the_requested_domain_only() {
        let reg = registry();
        assert!(reg.get(Domain::Water, "arsenic_soil").is_err());
    }

    #[test]
    fn dataset_ids_are_sorted_per_domain() {
        let reg = registry();
        assert_eq!(reg.dataset_ids(Domain::Soil), vec!["arsenic_soil", "lead_soil"]);
        assert!(reg.dataset_ids(Domain::Water).is_empty());
    }
}
