//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router and config subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - The label tree itself never logs; errors are values and the
//!   router logs where it handles them
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
