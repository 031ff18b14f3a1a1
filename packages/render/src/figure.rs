//! Plotly figure JSON builders for the map and trend tabs.
//!
//! Figures are plain `serde_json::Value`s in Plotly's
//! `{ "data": [...], "layout": {...} }` shape; the frontend feeds them
//! straight to `Plotly.newPlot`.

use geohazard_map_dataset_models::{CountySummary, Domain, SiteMeasurement, TrendField, TrendRow};
use geojson::FeatureCollection;
use serde_json::{Value, json};

/// Fixed colorscale for site markers (number of chemicals detected).
fn chemical_colorscale() -> Value {
    json!([
        [0, "rgb(0, 50, 50)"],
        [0.5, "rgb(0, 100, 50)"],
        [1, "rgb(0, 0, 200)"]
    ])
}

/// Builds the map view figure: a `scattergeo` trace of the dataset's
/// sites over a county choropleth colored by the selected demographic
/// field.
///
/// The choropleth joins `CountySummary.geography` against the boundary
/// features' `NAME` property, so `georgia` should already be subset to
/// Georgia's counties.
#[must_use]
pub fn site_map_figure(
    sites: &[SiteMeasurement],
    summary: &[CountySummary],
    georgia: &FeatureCollection,
    county_var: TrendField,
    dataset_id: &str,
    domain: Domain,
) -> Value {
    let lon: Vec<f64> = sites.iter().map(|s| s.longitude).collect();
    let lat: Vec<f64> = sites.iter().map(|s| s.latitude).collect();
    let text: Vec<&str> = sites.iter().map(|s| s.site_name.as_str()).collect();
    let counts: Vec<f64> = sites.iter().map(|s| s.counts).collect();

    let locations: Vec<&str> = summary.iter().map(|row| row.geography.as_str()).collect();
    let z: Vec<f64> = summary.iter().map(|row| row.metric(county_var)).collect();

    let scatter = json!({
        "type": "scattergeo",
        "lon": lon,
        "lat": lat,
        "text": text,
        "mode": "markers",
        "marker": {
            "color": counts,
            "colorscale": chemical_colorscale(),
            "colorbar": { "title": "Number of Chemicals", "x": 0.1 },
            "opacity": 0.5,
            "reversescale": false,
            "symbol": "circle",
            "showscale": true
        }
    });

    let choropleth = json!({
        "type": "choropleth",
        "geojson": georgia,
        "featureidkey": "properties.NAME",
        "locations": locations,
        "z": z,
        "colorscale": "Reds",
        "colorbar": { "title": county_var.to_string(), "x": 0.9 },
        "marker": { "line": { "width": 0 } }
    });

    json!({
        "data": [scatter, choropleth],
        "layout": {
            "title": { "text": format!("{county_var} & {dataset_id} - {domain}") },
            "geo": {
                "scope": "usa",
                "fitbounds": "locations",
                "visible": false
            }
        }
    })
}

/// Builds the county trend scatter: the selected demographic field on x,
/// summed counts on y, county name on hover.
#[must_use]
pub fn trend_figure(rows: &[TrendRow], x_field: TrendField) -> Value {
    let x: Vec<f64> = rows.iter().map(|row| row.metric(x_field)).collect();
    let y: Vec<f64> = rows.iter().map(|row| row.counts).collect();
    let text: Vec<&str> = rows.iter().map(|row| row.county.as_str()).collect();

    json!({
        "data": [{
            "type": "scatter",
            "mode": "markers",
            "x": x,
            "y": y,
            "text": text,
            "hovertemplate": "%{text}<br>%{xaxis.title.text}=%{x}<br>counts=%{y}<extra></extra>"
        }],
        "layout": {
            "xaxis": { "title": { "text": x_field.to_string() } },
            "yaxis": { "title": { "text": "counts" } }
        }
    })
}
