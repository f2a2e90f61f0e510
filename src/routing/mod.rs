//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming host (Host header or SNI)
//!     → matcher.rs (strip port / trailing dot, lowercase)
//!     → labels.rs (split on '.', reverse: com → example → www)
//!     → tree.rs (walk exact labels, fall back to '*')
//!     → Return: matched RouteTarget or NoRoute
//!
//! Route Compilation (at startup and on reload):
//!     RouteConfig[]
//!     → router.rs inserts every host pattern into a fresh LabelTree
//!     → any failure rejects the generation
//!     → atomic swap of the published table
//! ```
//!
//! # Design Decisions
//! - Routes compiled up front, immutable while serving
//! - No regex in hot path (label-by-label walk only)
//! - Deterministic: same input always matches same route
//! - Exact labels win over wildcards at every level

pub mod labels;
pub mod matcher;
pub mod router;
pub mod tree;

#[cfg(test)]
mod proptests;

pub use labels::{reverse_labels, split_labels, WILDCARD};
pub use router::{HostRouter, RouteTable, RouteTarget, RouterError};
pub use tree::{LabelTree, TreeError};
