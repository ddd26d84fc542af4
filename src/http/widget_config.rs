//! Live widget configuration endpoint.
//!
//! `GET /api/widget-config?domain=&pathname=` answers the matched profile's
//! render configuration, or JSON `null`. Called cross-origin from embedding
//! pages; CORS headers are applied by the router.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::http::error::{blocking, ApiError};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::profiles::{find_matching_profile, ProfileConfig};

pub const ROUTE: &str = "/api/widget-config";

#[derive(Debug, Deserialize)]
pub struct WidgetConfigQuery {
    pub domain: Option<String>,
    pub pathname: Option<String>,
}

/// GET /api/widget-config: resolve a profile for the calling page.
pub async fn get_config(
    State(state): State<AppState>,
    Query(query): Query<WidgetConfigQuery>,
) -> Result<Json<Option<ProfileConfig>>, ApiError> {
    let (Some(domain), Some(pathname)) = (
        query.domain.filter(|d| !d.is_empty()),
        query.pathname.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::BadRequest("Missing domain or pathname".into()));
    };

    let lookup = (domain.clone(), pathname.clone());
    let profile = blocking(move || {
        let (domain, pathname) = lookup;
        Ok(find_matching_profile(
            state.rules.as_ref(),
            state.profiles.as_ref(),
            &domain,
            &pathname,
        )?)
    })
    .await?;
    metrics::record_config_request(profile.is_some());
    tracing::debug!(
        domain = %domain,
        pathname = %pathname,
        profile_id = profile.as_ref().map(|p| p.id.as_str()),
        "Widget config lookup"
    );

    Ok(Json(profile.map(|p| p.config)))
}

/// OPTIONS preflight. Empty body, CORS headers only.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
