//! Rule CRUD routes.
//!
//! Priority is always recomputed from the path pattern; any client-supplied
//! `priority` field is ignored.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::http::error::{blocking, json_body, ApiError};
use crate::http::server::AppState;
use crate::profiles::{validate_id, Rule};
use crate::routing::calculate_specificity;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesQuery {
    pub profile_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRule {
    pub id: Option<String>,
    pub profile_id: Option<String>,
    pub domain: Option<String>,
    pub path_pattern: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRule {
    pub profile_id: Option<String>,
    pub domain: Option<String>,
    pub path_pattern: Option<String>,
    pub enabled: Option<bool>,
}

fn not_found() -> ApiError {
    ApiError::NotFound("Rule not found".into())
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{field} is required")))
}

/// GET /api/rules[?profileId=]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<RulesQuery>,
) -> Result<Json<Vec<Rule>>, ApiError> {
    let store = state.rules.clone();
    let rules = blocking(move || {
        Ok(match query.profile_id {
            Some(profile_id) => store.list_by_profile(&profile_id)?,
            None => store.list_all()?,
        })
    })
    .await?;
    Ok(Json(rules))
}

/// POST /api/rules
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateRule>, JsonRejection>,
) -> Result<(StatusCode, Json<Rule>), ApiError> {
    let body = json_body(payload)?;
    let path_pattern = required(body.path_pattern, "pathPattern")?;
    let profile_id = required(body.profile_id, "profileId")?;
    validate_id(&profile_id)?;

    let id = match body.id.filter(|id| !id.is_empty()) {
        Some(id) => {
            validate_id(&id)?;
            id
        }
        None => Uuid::new_v4().to_string(),
    };

    let rule = Rule {
        id,
        profile_id,
        domain: required(body.domain, "domain")?,
        priority: calculate_specificity(&path_pattern),
        path_pattern,
        enabled: body.enabled.unwrap_or(true),
    };

    let store = state.rules.clone();
    let rule = blocking(move || {
        store.put(&rule)?;
        Ok(rule)
    })
    .await?;

    tracing::info!(rule_id = %rule.id, priority = rule.priority, "Rule created");
    Ok((StatusCode::CREATED, Json(rule)))
}

/// GET /api/rules/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Rule>, ApiError> {
    validate_id(&id)?;
    let store = state.rules.clone();
    blocking(move || store.get(&id)?.map(Json).ok_or_else(not_found)).await
}

/// PUT /api/rules/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRule>, JsonRejection>,
) -> Result<Json<Rule>, ApiError> {
    validate_id(&id)?;
    let body = json_body(payload)?;
    if let Some(profile_id) = &body.profile_id {
        validate_id(profile_id)?;
    }

    let store = state.rules.clone();
    let updated = blocking(move || {
        let existing = store.get(&id)?.ok_or_else(not_found)?;
        let path_pattern = body.path_pattern.unwrap_or(existing.path_pattern);
        let updated = Rule {
            id: existing.id,
            profile_id: body.profile_id.unwrap_or(existing.profile_id),
            domain: body.domain.unwrap_or(existing.domain),
            priority: calculate_specificity(&path_pattern),
            path_pattern,
            enabled: body.enabled.unwrap_or(existing.enabled),
        };
        store.put(&updated)?;
        Ok(updated)
    })
    .await?;

    tracing::info!(rule_id = %updated.id, priority = updated.priority, "Rule updated");
    Ok(Json(updated))
}

/// DELETE /api/rules/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    validate_id(&id)?;
    let store = state.rules.clone();
    let id = blocking(move || {
        store.get(&id)?.ok_or_else(not_found)?;
        store.delete(&id)?;
        Ok(id)
    })
    .await?;

    tracing::info!(rule_id = %id, "Rule deleted");
    Ok(Json(json!({ "success": true })))
}
