#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Join-and-aggregate pipeline over the dataset registry.
//!
//! Every dashboard tab is backed by one of three pure functions here:
//! the raw per-site view, the county aggregate (joined to the categorical
//! demographic buckets), and the trend view (joined to the continuous
//! demographic fields). All joins are inner joins: a site without a
//! county lookup entry, or a county without a summary row, is silently
//! dropped rather than reported. Results are computed fresh per call and
//! never cached.

use std::cmp::Ordering;
use std::collections::HashMap;

use geohazard_map_dataset::{Registry, RegistryError};
use geohazard_map_dataset_models::{
    AggregatedCounty, CategoryFilter, Domain, SiteMeasurement, TrendRow,
};

/// Returns the measurement rows for `(domain, dataset_id)` exactly as
/// loaded, in original order.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] if the id is absent from the
/// domain's collection.
pub fn per_site_view<'a>(
    registry: &'a Registry,
    domain: Domain,
    dataset_id: &str,
) -> Result<&'a [SiteMeasurement], RegistryError> {
    registry.get(domain, dataset_id)
}

/// Sums site counts per county and attaches the five categorical
/// demographic buckets, sorted descending by summed counts.
///
/// Sites without a lookup entry and counties without a summary row are
/// dropped. A county with zero matching sites never appears (no
/// zero-fill). When `filter` is given, only rows whose value in the
/// filter's field equals its level exactly are kept; a filter matching
/// nothing yields an empty vec, not an error.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] if the id is absent from the
/// domain's collection.
pub fn county_aggregate(
    registry: &Registry,
    domain: Domain,
    dataset_id: &str,
    filter: Option<&CategoryFilter>,
) -> Result<Vec<AggregatedCounty>, RegistryError> {
    let grouped = grouped_counts(registry, domain, dataset_id)?;

    let summaries: HashMap<&str, _> = registry
        .county_summary()
        .iter()
        .map(|row| (row.geography.as_str(), row))
        .collect();

    let mut rows: Vec<AggregatedCounty> = grouped
        .into_iter()
        .filter_map(|(county, counts)| {
            let summary = summaries.get(county.as_str())?;
            Some(AggregatedCounty {
                county,
                counts,
                population_category: summary.population_category,
                black_percentile_category: summary.black_percentile_category,
                poor_percentile_category: summary.poor_percentile_category,
                age_18_24_percentile_category: summary.age_18_24_percentile_category,
                educational_score_25_over_percentile_category: summary
                    .educational_score_25_over_percentile_category,
            })
        })
        .collect();

    sort_by_counts_desc(&mut rows, |row| row.counts);

    if let Some(filter) = filter {
        rows.retain(|row| filter.matches(row));
    }

    Ok(rows)
}

/// Sums site counts per county and attaches the five continuous
/// demographic fields, sorted descending by summed counts. Input table
/// for trend scatter plots; the x-axis field is the caller's choice.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] if the id is absent from the
/// domain's collection.
pub fn county_trend_view(
    registry: &Registry,
    domain: Domain,
    dataset_id: &str,
) -> Result<Vec<TrendRow>, RegistryError> {
    let grouped = grouped_counts(registry, domain, dataset_id)?;

    let summaries: HashMap<&str, _> = registry
        .county_summary()
        .iter()
        .map(|row| (row.geography.as_str(), row))
        .collect();

    let mut rows: Vec<TrendRow> = grouped
        .into_iter()
        .filter_map(|(county, counts)| {
            let summary = summaries.get(county.as_str())?;
            Some(TrendRow {
                county,
                counts,
                avg_pop: summary.avg_pop,
                percent_black: summary.percent_black,
                poverty_rate: summary.poverty_rate,
                age_18_24_score: summary.age_18_24_score,
                educational_score_25_over: summary.educational_score_25_over,
            })
        })
        .collect();

    sort_by_counts_desc(&mut rows, |row| row.counts);

    Ok(rows)
}

/// Inner-joins the dataset's measurements against the site-county bridge
/// and sums counts per county. Counties appear in first-appearance order
/// of their sites; a site whose county cannot be resolved contributes
/// nothing.
fn grouped_counts(
    registry: &Registry,
    domain: Domain,
    dataset_id: &str,
) -> Result<Vec<(String, f64)>, RegistryError> {
    let measurements = registry.get(domain, dataset_id)?;

    // Each site maps to exactly one county; keep the first entry so a
    // duplicated bridge row can never double-count a site.
    let mut site_to_county: HashMap<&str, &str> = HashMap::new();
    for lookup in registry.site_county_lookup() {
        site_to_county
            .entry(lookup.site_name.as_str())
            .or_insert(lookup.county.as_str());
    }

    let mut totals: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in measurements {
        let Some(&county) = site_to_county.get(row.site_name.as_str()) else {
            continue;
        };
        if let Some(&i) = index.get(county) {
            totals[i].1 += row.counts;
        } else {
            index.insert(county.to_string(), totals.len());
            totals.push((county.to_string(), row.counts));
        }
    }

    Ok(totals)
}

/// Stable descending sort on the summed counts; ties keep input order.
fn sort_by_counts_desc<T>(rows: &mut [T], counts: impl Fn(&T) -> f64) {
    rows.sort_by(|a, b| {
        counts(b)
            .partial_cmp(&counts(a))
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use geohazard_map_dataset_models::{
        CategoryField, CountySummary, PercentileLevel, SiteCountyLookup,
    };

    use super::*;

    fn measurement(site: &str, counts: f64) -> SiteMeasurement {
        SiteMeasurement {
            site_name: site.to_string(),
            longitude: -84.0,
            latitude: 33.0,
            counts,
        }
    }

    fn lookup(site: &str, county: &str) -> SiteCountyLookup {
        SiteCountyLookup {
            site_name: site.to_string(),
            county: county.to_string(),
        }
    }

    fn summary(county: &str, pop_cat: PercentileLevel, avg_pop: f64) -> CountySummary {
        CountySummary {
            geography: county.to_string(),
            avg_pop,
            percent_black: 30.0,
            poverty_rate: 15.0,
            age_18_24_score: 10.0,
            educational_score_25_over: 40.0,
            population_category: pop_cat,
            black_percentile_category: PercentileLevel::Medium,
            poor_percentile_category: PercentileLevel::Medium,
            age_18_24_percentile_category: PercentileLevel::Medium,
            educational_score_25_over_percentile_category: PercentileLevel::Medium,
        }
    }

    /// Soil dataset `arsenic_soil`: sites A(5) and B(3) in Fulton,
    /// C(4) in DeKalb, D(7) with no county lookup entry, and E(2) in
    /// Towns, which has no summary row.
    fn registry() -> Registry {
        let mut soil = BTreeMap::new();
        soil.insert(
            "arsenic_soil".to_string(),
            vec![
                measurement("A", 5.0),
                measurement("B", 3.0),
                measurement("C", 4.0),
                measurement("D", 7.0),
                measurement("E", 2.0),
            ],
        );
        Registry::from_parts(
            soil,
            BTreeMap::new(),
            vec![
                summary("Fulton", PercentileLevel::High, 1_000_000.0),
                summary("DeKalb", PercentileLevel::VeryHigh, 750_000.0),
            ],
            vec![
                lookup("A", "Fulton"),
                lookup("B", "Fulton"),
                lookup("C", "DeKalb"),
                lookup("E", "Towns"),
            ],
        )
    }

    #[test]
    fn per_site_view_returns_loaded_rows_in_order() {
        let reg = registry();
        let rows = per_site_view(&reg, Domain::Soil, "arsenic_soil").unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.site_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn per_site_view_unknown_id_is_not_found() {
        let reg = registry();
        assert!(matches!(
            per_site_view(&reg, Domain::Soil, "nonexistent"),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn aggregate_sums_per_county_and_sorts_descending() {
        let reg = registry();
        let rows = county_aggregate(&reg, Domain::Soil, "arsenic_soil", None).unwrap();
        assert_eq!(rows.len(), 2);
        // Fulton: 5 + 3 = 8, DeKalb: 4.
        assert_eq!(rows[0].county, "Fulton");
        assert!((rows[0].counts - 8.0).abs() < f64::EPSILON);
        assert_eq!(rows[0].population_category, PercentileLevel::High);
        assert_eq!(rows[1].county, "DeKalb");
        assert!((rows[1].counts - 4.0).abs() < f64::EPSILON);
        assert!(rows.windows(2).all(|w| w[0].counts >= w[1].counts));
    }

    #[test]
    fn aggregate_drops_unresolvable_joins() {
        let reg = registry();
        let rows = county_aggregate(&reg, Domain::Soil, "arsenic_soil", None).unwrap();
        // Site D has no lookup entry; Towns has no summary row.
        assert!(rows.iter().all(|r| r.county != "Towns"));
        let total: f64 = rows.iter().map(|r| r.counts).sum();
        assert!((total - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let reg = registry();
        let once = county_aggregate(&reg, Domain::Soil, "arsenic_soil", None).unwrap();
        let twice = county_aggregate(&reg, Domain::Soil, "arsenic_soil", None).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn duplicate_bridge_rows_never_double_count() {
        let mut soil = BTreeMap::new();
        soil.insert("arsenic_soil".to_string(), vec![measurement("A", 5.0)]);
        let reg = Registry::from_parts(
            soil,
            BTreeMap::new(),
            vec![summary("Fulton", PercentileLevel::High, 1_000_000.0)],
            vec![lookup("A", "Fulton"), lookup("A", "Fulton")],
        );
        let rows = county_aggregate(&reg, Domain::Soil, "arsenic_soil", None).unwrap();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].counts - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn filter_keeps_exact_level_matches_only() {
        let reg = registry();
        let unfiltered = county_aggregate(&reg, Domain::Soil, "arsenic_soil", None).unwrap();
        let filter = CategoryFilter {
            field: CategoryField::PopulationCategory,
            level: PercentileLevel::VeryHigh,
        };
        let filtered =
            county_aggregate(&reg, Domain::Soil, "arsenic_soil", Some(&filter)).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].county, "DeKalb");
        assert!(filtered.iter().all(|r| unfiltered.contains(r)));
        assert!(
            filtered
                .iter()
                .all(|r| r.category(filter.field) == filter.level)
        );
    }

    #[test]
    fn filter_matching_nothing_yields_empty_not_error() {
        let reg = registry();
        let filter = CategoryFilter {
            field: CategoryField::PoorPercentileCategory,
            level: PercentileLevel::VeryLow,
        };
        let rows = county_aggregate(&reg, Domain::Soil, "arsenic_soil", Some(&filter)).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let reg = registry();
        let filter = CategoryFilter {
            field: CategoryField::PopulationCategory,
            level: PercentileLevel::High,
        };
        let once = county_aggregate(&reg, Domain::Soil, "arsenic_soil", Some(&filter)).unwrap();
        let mut again = once.clone();
        again.retain(|row| filter.matches(row));
        assert_eq!(once, again);
    }

    #[test]
    fn trend_view_attaches_numeric_fields_sorted_descending() {
        let reg = registry();
        let rows = county_trend_view(&reg, Domain::Soil, "arsenic_soil").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].county, "Fulton");
        assert!((rows[0].avg_pop - 1_000_000.0).abs() < f64::EPSILON);
        assert!((rows[1].avg_pop - 750_000.0).abs() < f64::EPSILON);
        assert!(rows.windows(2).all(|w| w[0].counts >= w[1].counts));
    }

    #[test]
    fn trend_view_unknown_id_is_not_found() {
        let reg = registry();
        assert!(matches!(
            county_trend_view(&reg, Domain::Water, "arsenic_soil"),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn ties_preserve_first_appearance_order() {
        let mut soil = BTreeMap::new();
        soil.insert(
            "tied".to_string(),
            vec![measurement("A", 3.0), measurement("C", 3.0)],
        );
        let reg = Registry::from_parts(
            soil,
            BTreeMap::new(),
            vec![
                summary("Fulton", PercentileLevel::High, 1_000_000.0),
                summary("DeKalb", PercentileLevel::High, 750_000.0),
            ],
            vec![lookup("A", "Fulton"), lookup("C", "DeKalb")],
        );
        let rows = county_aggregate(&reg, Domain::Soil, "tied", None).unwrap();
        assert_eq!(rows[0].county, "Fulton");
        assert_eq!(rows[1].county, "DeKalb");
    }
}
