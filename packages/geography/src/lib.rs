#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! County boundary `GeoJSON` loading and state sub-setting.
//!
//! The data directory carries the Census Bureau's nationwide county
//! boundary `FeatureCollection` (FIPS-coded properties). The map view
//! only plots Georgia, so this crate subsets the collection to features
//! whose `STATE` property is `13` and hands the result to the choropleth
//! builder. The choropleth joins on the `NAME` property.

use std::fs;
use std::path::{Path, PathBuf};

use geojson::{Feature, FeatureCollection, GeoJson};
use thiserror::Error;

/// State FIPS code for Georgia.
pub const GEORGIA_STATE_FIPS: &str = "13";

/// Feature property the choropleth joins county names against.
pub const COUNTY_NAME_PROPERTY: &str = "NAME";

/// Errors that can occur while loading boundary data.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The boundary file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The boundary file is not valid `GeoJSON`.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying `GeoJSON` error.
        #[source]
        source: geojson::Error,
    },

    /// The boundary file parsed, but is not a `FeatureCollection`.
    #[error("{path} is not a GeoJSON FeatureCollection")]
    NotACollection {
        /// Path of the offending file.
        path: PathBuf,
    },
}

/// Loads a county boundary `FeatureCollection` from `path`.
///
/// # Errors
///
/// Returns [`GeoError`] if the file is missing, unparsable, or not a
/// `FeatureCollection`.
pub fn load_counties(path: &Path) -> Result<FeatureCollection, GeoError> {
    let raw = fs::read_to_string(path).map_err(|source| GeoError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let geojson: GeoJson = raw.parse().map_err(|source| GeoError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match geojson {
        GeoJson::FeatureCollection(collection) => {
            log::info!(
                "Loaded {} county boundary features from {}",
                collection.features.len(),
                path.display()
            );
            Ok(collection)
        }
        GeoJson::Feature(_) | GeoJson::Geometry(_) => Err(GeoError::NotACollection {
            path: path.to_path_buf(),
        }),
    }
}

/// Subsets a nationwide county collection to Georgia's counties.
#[must_use]
pub fn georgia_counties(counties: &FeatureCollection) -> FeatureCollection {
    let features: Vec<Feature> = counties
        .features
        .iter()
        .filter(|feature| state_fips(feature) == Some(GEORGIA_STATE_FIPS))
        .cloned()
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Reads the `STATE` FIPS property of a boundary feature.
fn state_fips(feature: &Feature) -> Option<&str> {
    feature
        .properties
        .as_ref()
        .and_then(|props| props.get("STATE"))
        .and_then(serde_json::Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn county_feature(state: &str, name: &str) -> Feature {
        let value: GeoJson = format!(
            r#"{{
                "type": "Feature",
                "properties": {{ "STATE": "{state}", "NAME": "{name}" }},
                "geometry": {{
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }}
            }}"#
        )
        .parse()
        .unwrap();
        match value {
            GeoJson::Feature(feature) => feature,
            _ => unreachable!(),
        }
    }

    #[test]
    fn subsets_to_georgia_only() {
        let nationwide = FeatureCollection {
            bbox: None,
            features: vec![
                county_feature("13", "Fulton"),
                county_feature("06", "Alameda"),
                county_feature("13", "DeKalb"),
            ],
            foreign_members: None,
        };

        let georgia = georgia_counties(&nationwide);
        let names: Vec<&str> = georgia
            .features
            .iter()
            .filter_map(|f| {
                f.properties
                    .as_ref()
                    .and_then(|p| p.get(COUNTY_NAME_PROPERTY))
                    .and_then(serde_json::Value::as_str)
            })
            .collect();
        assert_eq!(names, vec!["Fulton", "DeKalb"]);
    }

    #[test]
    fn features_without_state_property_are_dropped() {
        let mut feature = county_feature("13", "Fulton");
        feature.properties = None;
        let collection = FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        };
        assert!(georgia_counties(&collection).features.is_empty());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_counties(Path::new("/nonexistent/counties.geojson")).unwrap_err();
        assert!(matches!(err, GeoError::Io { ref path, .. }
            if path.ends_with("counties.geojson")));
    }
}
