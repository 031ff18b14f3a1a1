#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTML table fragments and Plotly figure JSON builders.
//!
//! The server hands pipeline output to this crate and gets back either an
//! HTML `<table>` fragment or a Plotly figure as `serde_json::Value`. The
//! frontend renders the figure JSON with Plotly.js from CDN, so no
//! plotting happens server-side.

pub mod figure;
pub mod table;

pub use figure::{site_map_figure, trend_figure};
pub use table::{TableRow, html_table};
