//! Striped HTML table fragments for the data and county stats tabs.

use geohazard_map_dataset_models::{AggregatedCounty, SiteMeasurement, TrendRow};

/// A row type that can render itself into table cells.
///
/// Headers use the CSV/table vocabulary the rest of the system speaks
/// (`Site Name`, `counts`, `population_category`, …) so the dashboard
/// shows the same column names the source files carry.
pub trait TableRow {
    /// Column headers, in display order.
    fn headers() -> &'static [&'static str];

    /// Cell text for this row, matching [`Self::headers`] order.
    fn cells(&self) -> Vec<String>;
}

impl TableRow for SiteMeasurement {
    fn headers() -> &'static [&'static str] {
        &["Site Name", "longitude", "latitude", "counts"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.site_name.clone(),
            fmt_num(self.longitude),
            fmt_num(self.latitude),
            fmt_num(self.counts),
        ]
    }
}

impl TableRow for AggregatedCounty {
    fn headers() -> &'static [&'static str] {
        &[
            "County",
            "counts",
            "population_category",
            "black_percentile_category",
            "poor_percentile_category",
            "age_18_24_percentile_category",
            "educational_score_25_over_percentile_category",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.county.clone(),
            fmt_num(self.counts),
            self.population_category.to_string(),
            self.black_percentile_category.to_string(),
            self.poor_percentile_category.to_string(),
            self.age_18_24_percentile_category.to_string(),
            self.educational_score_25_over_percentile_category.to_string(),
        ]
    }
}

impl TableRow for TrendRow {
    fn headers() -> &'static [&'static str] {
        &[
            "County",
            "counts",
            "avg_pop",
            "percent_black",
            "poverty_rate",
            "age_18_24_score",
            "educational_score_25_over",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.county.clone(),
            fmt_num(self.counts),
            fmt_num(self.avg_pop),
            fmt_num(self.percent_black),
            fmt_num(self.poverty_rate),
            fmt_num(self.age_18_24_score),
            fmt_num(self.educational_score_25_over),
        ]
    }
}

/// Renders rows as a Bootstrap-striped HTML table fragment. All cell
/// text is HTML-escaped.
#[must_use]
pub fn html_table<T: TableRow>(rows: &[T]) -> String {
    let mut html = String::from("<table class=\"table table-striped\">\n<thead><tr>");
    for header in T::headers() {
        html.push_str("<th>");
        html.push_str(&escape(header));
        html.push_str("</th>");
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in rows {
        html.push_str("<tr>");
        for cell in row.cells() {
            html.push_str("<td>");
            html.push_str(&escape(&cell));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

/// Formats a numeric cell, dropping the fraction for whole values so a
/// count of `8.0` displays as `8`.
fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Minimal HTML escaping for text nodes and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use geohazard_map_dataset_models::PercentileLevel;

    use super::*;

    #[test]
    fn renders_headers_and_rows() {
        let rows = vec![SiteMeasurement {
            site_name: "Plant X".to_string(),
            longitude: -84.39,
            latitude: 33.75,
            counts: 5.0,
        }];
        let html = html_table(&rows);
        assert!(html.starts_with("<table class=\"table table-striped\">"));
        assert!(html.contains("<th>Site Name</th>"));
        assert!(html.contains("<td>Plant X</td>"));
        assert!(html.contains("<td>5</td>"));
        assert!(html.contains("<td>-84.39</td>"));
    }

    #[test]
    fn escapes_cell_text() {
        let rows = vec![SiteMeasurement {
            site_name: "<script>&\"x\"".to_string(),
            longitude: 0.0,
            latitude: 0.0,
            counts: 1.0,
        }];
        let html = html_table(&rows);
        assert!(html.contains("&lt;script&gt;&amp;&quot;x&quot;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn aggregate_rows_show_level_strings() {
        let rows = vec![AggregatedCounty {
            county: "Fulton".to_string(),
            counts: 8.0,
            population_category: PercentileLevel::High,
            black_percentile_category: PercentileLevel::VeryHigh,
            poor_percentile_category: PercentileLevel::Medium,
            age_18_24_percentile_category: PercentileLevel::Low,
            educational_score_25_over_percentile_category: PercentileLevel::VeryLow,
        }];
        let html = html_table(&rows);
        assert!(html.contains("<td>Fulton</td>"));
        assert!(html.contains("<td>8</td>"));
        assert!(html.contains("<td>very high</td>"));
        assert!(html.contains("<td>very low</td>"));
    }

    #[test]
    fn empty_input_renders_empty_body() {
        let html = html_table::<TrendRow>(&[]);
        assert!(html.contains("<tbody>\n</tbody>"));
        assert!(html.contains("<th>avg_pop</th>"));
    }

    #[test]
    fn fractional_values_keep_their_fraction() {
        assert_eq!(fmt_num(8.0), "8");
        assert_eq!(fmt_num(13.2), "13.2");
        assert_eq!(fmt_num(-84.39), "-84.39");
    }
}
