//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and address formats
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::http::server::RESERVED_ROUTES;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("snapshot.route must start with '/', got '{0}'")]
    RouteNotAbsolute(String),

    #[error("snapshot.route '{0}' is already served by the API")]
    RouteReserved(String),

    #[error("snapshot.route must be a literal path, got '{0}'")]
    RouteNotLiteral(String),
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_snapshot_route(route: &str, errors: &mut Vec<ValidationError>) {
    if !route.starts_with('/') {
        errors.push(ValidationError::RouteNotAbsolute(route.to_string()));
    }
    if route.contains(['{', '}']) {
        errors.push(ValidationError::RouteNotLiteral(route.to_string()));
    }
    let normalized = route.trim_end_matches('/');
    if RESERVED_ROUTES.contains(&normalized) {
        errors.push(ValidationError::RouteReserved(route.to_string()));
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address("listener.bind_address", &config.listener.bind_address, &mut errors);
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if config.store.profiles_dir.trim().is_empty() {
        errors.push(ValidationError::Empty("store.profiles_dir"));
    }
    if config.store.rules_dir.trim().is_empty() {
        errors.push(ValidationError::Empty("store.rules_dir"));
    }
    if config.snapshot.path.trim().is_empty() {
        errors.push(ValidationError::Empty("snapshot.path"));
    }
    check_snapshot_route(&config.snapshot.route, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "nope".into();
        config.timeouts.request_secs = 0;
        config.store.rules_dir = " ".into();
        config.snapshot.route = "manifest.json".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::Zero("timeouts.request_secs")));
        assert!(errors.contains(&ValidationError::Empty("store.rules_dir")));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ServerConfig::default();
        config.observability.metrics_address = "bad".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_snapshot_route_must_not_shadow_api_routes() {
        let reserved = [
            "/health",
            "/api/widget-config",
            "/api/rules",
            "/api/profiles/",
            "/api/shorten",
        ];
        for route in reserved {
            let mut config = ServerConfig::default();
            config.snapshot.route = route.into();
            let errors = validate_config(&config).unwrap_err();
            assert_eq!(errors, vec![ValidationError::RouteReserved(route.into())]);
        }
    }

    #[test]
    fn test_snapshot_route_must_be_literal() {
        let mut config = ServerConfig::default();
        config.snapshot.route = "/manifests/{name}".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::RouteNotLiteral("/manifests/{name}".into())]
        );

        config.snapshot.route = "/static/widget-manifest.json".into();
        assert!(validate_config(&config).is_ok());
    }
}
