//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route identity (names present and unique, backend group set)
//! - Validate host patterns (no empty labels)
//! - Detect conflicting routes by compiling them into a scratch tree
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::RouterConfig;
use crate::routing::labels::split_labels;
use crate::routing::tree::{LabelTree, TreeError};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty name")]
    EmptyRouteName { index: usize },

    #[error("route name {name:?} is used more than once")]
    DuplicateRouteName { name: String },

    #[error("route {route:?} has an empty backend_group")]
    EmptyBackendGroup { route: String },

    #[error("route {route:?} has invalid host {host:?}: {source}")]
    InvalidHost {
        route: String,
        host: String,
        source: TreeError,
    },

    #[error("route {route:?} host {host:?} collides with an earlier route")]
    ConflictingHost { route: String, host: String },

    #[error("invalid log_level {0:?}")]
    InvalidLogLevel(String),

    #[error("invalid metrics_address {0:?}")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();
    let mut scratch = LabelTree::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName { index });
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName {
                name: route.name.clone(),
            });
        }

        if route.backend_group.is_empty() {
            errors.push(ValidationError::EmptyBackendGroup {
                route: route.name.clone(),
            });
        }

        if let Err(source) = split_labels(&route.host) {
            errors.push(ValidationError::InvalidHost {
                route: route.name.clone(),
                host: route.host.clone(),
                source,
            });
            continue;
        }

        if let Err(TreeError::AlreadyExists) = scratch.add(&route.host, ()) {
            errors.push(ValidationError::ConflictingHost {
                route: route.name.clone(),
                host: route.host.clone(),
            });
        }
    }

    let observability = &config.observability;
    if EnvFilter::try_new(&observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(observability.log_level.clone()));
    }
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
