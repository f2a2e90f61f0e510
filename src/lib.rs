//! Host label routing.
//!
//! Maps dotted host names (`Host` header, TLS SNI) to routes through a
//! label tree with single-label `*` wildcards.

pub mod config;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use routing::{HostRouter, LabelTree, TreeError};
