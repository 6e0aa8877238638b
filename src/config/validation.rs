//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, status codes, addresses)
//! - Detect conflicting routes (duplicates, unreachable literals)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::{ObservabilityConfig, RouteConfig, ServerConfig};
use crate::routing::Route;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{0} has an empty name")]
    EmptyRouteName(usize),

    #[error("route name {0:?} cannot be sent as a response header")]
    InvalidRouteName(String),

    #[error("route name '{0}' is used more than once")]
    DuplicateRouteName(String),

    #[error("route '{route}': pattern '{pattern}' must start with '/'")]
    InvalidPattern { route: String, pattern: String },

    #[error("route '{route}': invalid method '{method}'")]
    InvalidMethod { route: String, method: String },

    #[error("route '{route}': content type {content_type:?} is not a valid header value")]
    InvalidContentType { route: String, content_type: String },

    #[error("route '{route}': invalid status code {status}")]
    InvalidStatus { route: String, status: u16 },

    #[error("route '{route}' repeats the pattern of route '{previous}'")]
    DuplicateRoute { route: String, previous: String },

    #[error("route '{route}' is unreachable, route '{by}' always matches first")]
    ShadowedRoute { route: String, by: String },

    #[error("invalid listener bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("unknown log level '{0}'")]
    InvalidLogLevel(String),

    #[error("unknown log format '{0}'")]
    InvalidLogFormat(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    validate_observability(&config.observability, &mut errors);
    validate_routes(&config.routes, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_observability(config: &ObservabilityConfig, errors: &mut Vec<ValidationError>) {
    if !LOG_LEVELS.contains(&config.log_level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.log_level.clone()));
    }
    if !LOG_FORMATS.contains(&config.log_format.as_str()) {
        errors.push(ValidationError::InvalidLogFormat(config.log_format.clone()));
    }
    if config.metrics_enabled && config.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.metrics_address.clone(),
        ));
    }
}

fn validate_routes(routes: &[RouteConfig], errors: &mut Vec<ValidationError>) {
    let mut names = HashSet::new();

    for (index, route) in routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName(index));
        } else if !is_header_value(&route.name) {
            errors.push(ValidationError::InvalidRouteName(route.name.clone()));
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }

        if !route.pattern.starts_with('/') {
            errors.push(ValidationError::InvalidPattern {
                route: route.name.clone(),
                pattern: route.pattern.clone(),
            });
        }

        if !is_valid_method(&route.method) {
            errors.push(ValidationError::InvalidMethod {
                route: route.name.clone(),
                method: route.method.clone(),
            });
        }

        if !is_header_value(&route.content_type) {
            errors.push(ValidationError::InvalidContentType {
                route: route.name.clone(),
                content_type: route.content_type.clone(),
            });
        }

        // 1xx codes are interim responses and cannot end a request.
        if !(200..=599).contains(&route.status) {
            errors.push(ValidationError::InvalidStatus {
                route: route.name.clone(),
                status: route.status,
            });
        }
    }

    detect_conflicts(routes, errors);
}

/// Route names and content types are sent back as response headers.
fn is_header_value(value: &str) -> bool {
    HeaderValue::from_str(value).is_ok()
}

fn is_valid_method(method: &str) -> bool {
    method == "*" || (!method.is_empty() && method.bytes().all(|b| b.is_ascii_alphabetic()))
}

/// Flags routes that can never be selected because an earlier route wins.
///
/// Only literal routes are checked for shadowing; deciding whether one glob
/// pattern covers another is not attempted.
fn detect_conflicts(routes: &[RouteConfig], errors: &mut Vec<ValidationError>) {
    let compiled: Vec<Route> = routes.iter().map(Route::from).collect();

    for (index, route) in compiled.iter().enumerate() {
        let earlier = &compiled[..index];

        if let Some(previous) = earlier.iter().find(|r| r.pattern() == route.pattern()) {
            errors.push(ValidationError::DuplicateRoute {
                route: route.name.clone(),
                previous: previous.name.clone(),
            });
            continue;
        }

        if !route.is_literal() {
            continue;
        }
        if let Some(by) = earlier.iter().find(|r| r.matches_candidate(route.pattern())) {
            errors.push(ValidationError::ShadowedRoute {
                route: route.name.clone(),
                by: by.name.clone(),
            });
        }
    }
}
