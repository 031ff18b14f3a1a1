#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the geohazard map server.
//!
//! Query parameters deserialize straight into the dataset enums, so an
//! unknown domain, field, or level is rejected by Actix as a 400 before
//! a handler runs.

use geohazard_map_dataset_models::{CategoryField, Domain, PercentileLevel, TrendField};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Always `true` when the server is up.
    pub healthy: bool,
    /// Crate version.
    pub version: String,
}

/// Error payload for user-facing failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// What went wrong.
    pub error: String,
    /// Optional recovery suggestion shown in the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Query parameters for the dataset id listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainQuery {
    /// Which measurement collection to list.
    pub domain: Domain,
}

/// Query parameters for the per-site view endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteViewQuery {
    /// Measurement domain.
    pub domain: Domain,
    /// Dataset identifier within the domain.
    pub dataset: String,
}

/// Query parameters for the county stats endpoint. The two filter
/// parameters must be supplied together or not at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountyStatsQuery {
    /// Measurement domain.
    pub domain: Domain,
    /// Dataset identifier within the domain.
    pub dataset: String,
    /// Categorical field to filter on.
    pub filter_by: Option<CategoryField>,
    /// Level the filtered field must equal.
    pub filter_level: Option<PercentileLevel>,
}

/// Query parameters for the map view endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapQuery {
    /// Measurement domain.
    pub domain: Domain,
    /// Dataset identifier within the domain.
    pub dataset: String,
    /// Demographic field driving the county color scale.
    pub county_var: TrendField,
}

/// Query parameters for the county trends endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendQuery {
    /// Measurement domain.
    pub domain: Domain,
    /// Dataset identifier within the domain.
    pub dataset: String,
    /// Demographic field plotted on the x-axis.
    pub plot_var: TrendField,
}
