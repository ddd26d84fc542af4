//! Profile CRUD routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::http::error::{blocking, json_body, ApiError};
use crate::http::server::AppState;
use crate::profiles::{validate_id, Profile, ProfileConfig};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub config: Option<ProfileConfig>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub config: Option<ProfileConfig>,
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn not_found() -> ApiError {
    ApiError::NotFound("Profile not found".into())
}

/// GET /api/profiles
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, ApiError> {
    let profiles = state.profiles.clone();
    let all = blocking(move || Ok(profiles.list_all()?)).await?;
    Ok(Json(all))
}

/// POST /api/profiles
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateProfile>, JsonRejection>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let body = json_body(payload)?;
    let name = body
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("name is required".into()))?;
    let config = body
        .config
        .ok_or_else(|| ApiError::BadRequest("config is required".into()))?;

    let id = match body.id.filter(|id| !id.is_empty()) {
        Some(id) => {
            validate_id(&id)?;
            id
        }
        None => Uuid::new_v4().to_string(),
    };

    let now = now_rfc3339();
    let profile = Profile {
        id,
        name,
        config,
        created_at: body.created_at.unwrap_or_else(|| now.clone()),
        updated_at: now,
    };

    let profiles = state.profiles.clone();
    let profile = blocking(move || {
        profiles.put(&profile)?;
        Ok(profile)
    })
    .await?;

    tracing::info!(profile_id = %profile.id, "Profile created");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/profiles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    validate_id(&id)?;
    let profiles = state.profiles.clone();
    blocking(move || profiles.get(&id)?.map(Json).ok_or_else(not_found)).await
}

/// PUT /api/profiles/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProfile>, JsonRejection>,
) -> Result<Json<Profile>, ApiError> {
    validate_id(&id)?;
    let body = json_body(payload)?;

    let profiles = state.profiles.clone();
    let updated = blocking(move || {
        let existing = profiles.get(&id)?.ok_or_else(not_found)?;
        let updated = Profile {
            name: body.name.unwrap_or(existing.name),
            config: body.config.unwrap_or(existing.config),
            updated_at: now_rfc3339(),
            ..existing
        };
        profiles.put(&updated)?;
        Ok(updated)
    })
    .await?;

    tracing::info!(profile_id = %updated.id, "Profile updated");
    Ok(Json(updated))
}

/// DELETE /api/profiles/{id}. Rules referencing the profile are left in place.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    validate_id(&id)?;
    let profiles = state.profiles.clone();
    let id = blocking(move || {
        profiles.get(&id)?.ok_or_else(not_found)?;
        profiles.delete(&id)?;
        Ok(id)
    })
    .await?;

    tracing::info!(profile_id = %id, "Profile deleted");
    Ok(Json(json!({ "success": true })))
}
