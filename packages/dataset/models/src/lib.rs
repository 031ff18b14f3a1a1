#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Row and enum types for the contaminant site dataset tables.
//!
//! This crate defines the canonical vocabulary shared across the whole
//! geohazard-map system: measurement rows loaded from the per-dataset CSV
//! files, the county reference table, and the enums naming its demographic
//! fields. Field names mirror the CSV column headers so that every crate
//! (loader, pipeline, renderers) speaks the same dialect.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Measurement domain: which collection a dataset belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Domain {
    /// Soil contaminant measurements.
    Soil,
    /// Water contaminant measurements.
    Water,
}

impl Domain {
    /// Returns both domains, in dropdown order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Soil, Self::Water]
    }
}

/// Ordinal percentile bucket assigned to a county for one demographic
/// dimension.
///
/// The derived `Ord` follows the ordinal ladder (`VeryLow` < `Low` < …),
/// not the string forms.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum PercentileLevel {
    /// Bottom bucket.
    #[serde(rename = "very low")]
    #[strum(serialize = "very low")]
    VeryLow,
    /// Second bucket.
    #[serde(rename = "low")]
    #[strum(serialize = "low")]
    Low,
    /// Middle bucket.
    #[serde(rename = "medium")]
    #[strum(serialize = "medium")]
    Medium,
    /// Fourth bucket.
    #[serde(rename = "high")]
    #[strum(serialize = "high")]
    High,
    /// Top bucket.
    #[serde(rename = "very high")]
    #[strum(serialize = "very high")]
    VeryHigh,
}

impl PercentileLevel {
    /// Returns all levels in ascending ordinal order, for dropdowns.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::VeryLow,
            Self::Low,
            Self::Medium,
            Self::High,
            Self::VeryHigh,
        ]
    }
}

/// Names the five categorical (bucketed) fields of [`CountySummary`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum CategoryField {
    /// Population size bucket.
    #[serde(rename = "population_category")]
    #[strum(serialize = "population_category")]
    PopulationCategory,
    /// Percent-black percentile bucket.
    #[serde(rename = "black_percentile_category")]
    #[strum(serialize = "black_percentile_category")]
    BlackPercentileCategory,
    /// Poverty-rate percentile bucket.
    #[serde(rename = "poor_percentile_category")]
    #[strum(serialize = "poor_percentile_category")]
    PoorPercentileCategory,
    /// Age-18-24 percentile bucket.
    #[serde(rename = "age_18_24_percentile_category")]
    #[strum(serialize = "age_18_24_percentile_category")]
    Age1824PercentileCategory,
    /// Educational-attainment (25+) percentile bucket.
    #[serde(rename = "educational_score_25_over_percentile_category")]
    #[strum(serialize = "educational_score_25_over_percentile_category")]
    EducationalScore25OverPercentileCategory,
}

impl CategoryField {
    /// Returns all categorical fields, in dropdown order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::PopulationCategory,
            Self::BlackPercentileCategory,
            Self::PoorPercentileCategory,
            Self::Age1824PercentileCategory,
            Self::EducationalScore25OverPercentileCategory,
        ]
    }
}

/// Names the five continuous (non-bucketed) fields of [`CountySummary`],
/// used for choropleth coloring and trend scatter axes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum TrendField {
    /// Average population.
    #[serde(rename = "avg_pop")]
    #[strum(serialize = "avg_pop")]
    AvgPop,
    /// Percent of population identifying as black.
    #[serde(rename = "percent_black")]
    #[strum(serialize = "percent_black")]
    PercentBlack,
    /// Poverty rate.
    #[serde(rename = "poverty_rate")]
    #[strum(serialize = "poverty_rate")]
    PovertyRate,
    /// Age-18-24 score.
    #[serde(rename = "age_18_24_score")]
    #[strum(serialize = "age_18_24_score")]
    Age1824Score,
    /// Educational attainment score for residents 25 and over.
    #[serde(rename = "educational_score_25_over")]
    #[strum(serialize = "educational_score_25_over")]
    EducationalScore25Over,
}

impl TrendField {
    /// Returns all numeric fields, in dropdown order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::AvgPop,
            Self::PercentBlack,
            Self::PovertyRate,
            Self::Age1824Score,
            Self::EducationalScore25Over,
        ]
    }
}

/// One measurement record for a contaminant site, as loaded from a
/// per-dataset CSV file. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMeasurement {
    /// Site name; the join key against [`SiteCountyLookup`].
    #[serde(rename = "Site Name")]
    pub site_name: String,
    /// Site longitude.
    pub longitude: f64,
    /// Site latitude.
    pub latitude: f64,
    /// Number of chemicals detected at the site. Non-negative.
    pub counts: f64,
}

/// Maps a site name to its county. Pure join bridge; sites missing from
/// this table are excluded from county aggregates (inner-join semantics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteCountyLookup {
    /// Site name.
    #[serde(rename = "Site Name")]
    pub site_name: String,
    /// County the site sits in.
    #[serde(rename = "County")]
    pub county: String,
}

/// One row per Georgia county: continuous demographic statistics plus
/// their percentile buckets. Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountySummary {
    /// County name; the join key against aggregated site counts.
    #[serde(rename = "Geography")]
    pub geography: String,
    /// Average population.
    pub avg_pop: f64,
    /// Percent of population identifying as black.
    pub percent_black: f64,
    /// Poverty rate.
    pub poverty_rate: f64,
    /// Age-18-24 score.
    pub age_18_24_score: f64,
    /// Educational attainment score for residents 25 and over.
    pub educational_score_25_over: f64,
    /// Population size bucket.
    pub population_category: PercentileLevel,
    /// Percent-black percentile bucket.
    pub black_percentile_category: PercentileLevel,
    /// Poverty-rate percentile bucket.
    pub poor_percentile_category: PercentileLevel,
    /// Age-18-24 percentile bucket.
    pub age_18_24_percentile_category: PercentileLevel,
    /// Educational-attainment percentile bucket.
    pub educational_score_25_over_percentile_category: PercentileLevel,
}

impl CountySummary {
    /// Returns the value of the named categorical field.
    #[must_use]
    pub const fn category(&self, field: CategoryField) -> PercentileLevel {
        match field {
            CategoryField::PopulationCategory => self.population_category,
            CategoryField::BlackPercentileCategory => self.black_percentile_category,
            CategoryField::PoorPercentileCategory => self.poor_percentile_category,
            CategoryField::Age1824PercentileCategory => self.age_18_24_percentile_category,
            CategoryField::EducationalScore25OverPercentileCategory => {
                self.educational_score_25_over_percentile_category
            }
        }
    }

    /// Returns the value of the named continuous field.
    #[must_use]
    pub const fn metric(&self, field: TrendField) -> f64 {
        match field {
            TrendField::AvgPop => self.avg_pop,
            TrendField::PercentBlack => self.percent_black,
            TrendField::PovertyRate => self.poverty_rate,
            TrendField::Age1824Score => self.age_18_24_score,
            TrendField::EducationalScore25Over => self.educational_score_25_over,
        }
    }
}

/// County-level aggregate of site counts, joined to the categorical
/// demographic buckets. Derived per query; never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedCounty {
    /// County name.
    pub county: String,
    /// Sum of `counts` across all sites resolved to this county.
    pub counts: f64,
    /// Population size bucket.
    pub population_category: PercentileLevel,
    /// Percent-black percentile bucket.
    pub black_percentile_category: PercentileLevel,
    /// Poverty-rate percentile bucket.
    pub poor_percentile_category: PercentileLevel,
    /// Age-18-24 percentile bucket.
    pub age_18_24_percentile_category: PercentileLevel,
    /// Educational-attainment percentile bucket.
    pub educational_score_25_over_percentile_category: PercentileLevel,
}

impl AggregatedCounty {
    /// Returns the value of the named categorical field.
    #[must_use]
    pub const fn category(&self, field: CategoryField) -> PercentileLevel {
        match field {
            CategoryField::PopulationCategory => self.population_category,
            CategoryField::BlackPercentileCategory => self.black_percentile_category,
            CategoryField::PoorPercentileCategory => self.poor_percentile_category,
            CategoryField::Age1824PercentileCategory => self.age_18_24_percentile_category,
            CategoryField::EducationalScore25OverPercentileCategory => {
                self.educational_score_25_over_percentile_category
            }
        }
    }
}

/// County-level aggregate of site counts, joined to the continuous
/// demographic fields. Input table for trend scatter plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    /// County name.
    pub county: String,
    /// Sum of `counts` across all sites resolved to this county.
    pub counts: f64,
    /// Average population.
    pub avg_pop: f64,
    /// Percent of population identifying as black.
    pub percent_black: f64,
    /// Poverty rate.
    pub poverty_rate: f64,
    /// Age-18-24 score.
    pub age_18_24_score: f64,
    /// Educational attainment score for residents 25 and over.
    pub educational_score_25_over: f64,
}

impl TrendRow {
    /// Returns the value of the named continuous field.
    #[must_use]
    pub const fn metric(&self, field: TrendField) -> f64 {
        match field {
            TrendField::AvgPop => self.avg_pop,
            TrendField::PercentBlack => self.percent_black,
            TrendField::PovertyRate => self.poverty_rate,
            TrendField::Age1824Score => self.age_18_24_score,
            TrendField::EducationalScore25Over => self.educational_score_25_over,
        }
    }
}

/// Exact-match predicate over one categorical field of a county row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    /// Which categorical field to test.
    pub field: CategoryField,
    /// The level a row must equal (case-sensitive, no partial match).
    pub level: PercentileLevel,
}

impl CategoryFilter {
    /// Returns `true` if the row's value in `field` equals `level`.
    #[must_use]
    pub fn matches(&self, row: &AggregatedCounty) -> bool {
        row.category(self.field) == self.level
    }
}
