//! HTTP handler functions for the dashboard API.
//!
//! The handlers are the presentation adapter: they translate a selection
//! into a pipeline call and forward the result to a renderer. A missing
//! dataset is a routine condition (some datasets are incomplete by
//! design) and maps to a 404 with a recovery hint, never a crash.

use actix_web::{HttpResponse, web};
use geohazard_map_dataset::RegistryError;
use geohazard_map_dataset_models::{CategoryFilter, Domain};
use geohazard_map_pipeline as pipeline;
use geohazard_map_render::{html_table, site_map_figure, trend_figure};
use geohazard_map_server_models::{
    ApiError, ApiHealth, CountyStatsQuery, DomainQuery, MapQuery, SiteViewQuery, TrendQuery,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/domains`
///
/// Lists the measurement domains, for the type dropdown.
pub async fn domains() -> HttpResponse {
    HttpResponse::Ok().json(Domain::all())
}

/// `GET /api/datasets?domain=`
///
/// Lists the dataset identifiers registered for a domain, for the key
/// dropdown.
pub async fn datasets(state: web::Data<AppState>, params: web::Query<DomainQuery>) -> HttpResponse {
    HttpResponse::Ok().json(state.registry.dataset_ids(params.domain))
}

/// `GET /api/sites?domain=&dataset=`
///
/// The per-site view as an HTML table fragment.
pub async fn sites(state: web::Data<AppState>, params: web::Query<SiteViewQuery>) -> HttpResponse {
    match pipeline::per_site_view(&state.registry, params.domain, &params.dataset) {
        Ok(rows) => html_fragment(html_table(rows)),
        Err(e) => registry_error_response(&e),
    }
}

/// `GET /api/county-stats?domain=&dataset=[&filterBy=&filterLevel=]`
///
/// The county aggregate as an HTML table fragment. `filterBy` and
/// `filterLevel` must arrive together or not at all.
pub async fn county_stats(
    state: web::Data<AppState>,
    params: web::Query<CountyStatsQuery>,
) -> HttpResponse {
    let filter = match (params.filter_by, params.filter_level) {
        (Some(field), Some(level)) => Some(CategoryFilter { field, level }),
        (None, None) => None,
        _ => {
            return HttpResponse::BadRequest().json(ApiError {
                error: "filterBy and filterLevel must be supplied together".to_string(),
                hint: None,
            });
        }
    };

    match pipeline::county_aggregate(&state.registry, params.domain, &params.dataset, filter.as_ref())
    {
        Ok(rows) => html_fragment(html_table(&rows)),
        Err(e) => registry_error_response(&e),
    }
}

/// `GET /api/map?domain=&dataset=&countyVar=`
///
/// The map view figure: site markers over the county choropleth.
pub async fn map_view(state: web::Data<AppState>, params: web::Query<MapQuery>) -> HttpResponse {
    match pipeline::per_site_view(&state.registry, params.domain, &params.dataset) {
        Ok(rows) => HttpResponse::Ok().json(site_map_figure(
            rows,
            state.registry.county_summary(),
            &state.georgia,
            params.county_var,
            &params.dataset,
            params.domain,
        )),
        Err(e) => registry_error_response(&e),
    }
}

/// `GET /api/trends?domain=&dataset=&plotVar=`
///
/// The county trend scatter figure.
pub async fn trends(state: web::Data<AppState>, params: web::Query<TrendQuery>) -> HttpResponse {
    match pipeline::county_trend_view(&state.registry, params.domain, &params.dataset) {
        Ok(rows) => HttpResponse::Ok().json(trend_figure(&rows, params.plot_var)),
        Err(e) => registry_error_response(&e),
    }
}

/// Wraps a rendered table in an HTML response.
fn html_fragment(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Maps a registry error to a user-facing response.
fn registry_error_response(error: &RegistryError) -> HttpResponse {
    match error {
        RegistryError::NotFound { .. } => HttpResponse::NotFound().json(ApiError {
            error: error.to_string(),
            hint: Some(
                "This dataset is not finished yet. Please try another variable.".to_string(),
            ),
        }),
        // Load errors only occur at startup; a post-startup sighting is a bug.
        RegistryError::Io { .. } | RegistryError::Csv { .. } => {
            log::error!("Unexpected registry error while serving a view: {error}");
            HttpResponse::InternalServerError().json(ApiError {
                error: "Internal error".to_string(),
                hint: None,
            })
        }
    }
}
