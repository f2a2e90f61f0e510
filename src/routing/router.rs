//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Compile configured routes into a label tree
//! - Look up the route for a host name
//! - Swap in a new route table on reload
//!
//! # Design Decisions
//! - A compiled table is immutable; reload builds a fresh one
//! - Readers load the current table through `ArcSwap`, never a lock
//! - Any route that fails to insert rejects the whole generation
//! - Generations only move forward: a reload that finishes compiling after
//!   a newer one was published is dropped
//! - Explicit NoRoute rather than silent default

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;

use crate::config::RouteConfig;
use crate::observability::metrics;
use crate::routing::matcher::normalize_host;
use crate::routing::tree::{LabelTree, TreeError};

/// Errors from compiling or querying routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A route's host pattern could not be inserted.
    #[error("route {route:?} with host {host:?} rejected: {source}")]
    Compile {
        route: String,
        host: String,
        #[source]
        source: TreeError,
    },

    /// No route matches the host.
    #[error("no route for host {host:?}")]
    NoRoute { host: String },

    /// The host reaches a shared prefix of other routes, but no route of its own.
    #[error("host {host:?} has no route of its own")]
    NoContext { host: String },

    /// A newer generation was published while this one compiled.
    #[error("route generation {generation} superseded by generation {current}")]
    Superseded { generation: u64, current: u64 },

    /// The host could not be looked up at all.
    #[error("lookup for host {host:?} failed: {source}")]
    Lookup {
        host: String,
        #[source]
        source: TreeError,
    },
}

/// What a matched route points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    /// Route identifier for logging/metrics.
    pub name: String,
    /// Backend group name to forward to.
    pub backend_group: String,
}

impl From<&RouteConfig> for RouteTarget {
    fn from(config: &RouteConfig) -> Self {
        Self {
            name: config.name.clone(),
            backend_group: config.backend_group.clone(),
        }
    }
}

/// One compiled generation of routes.
#[derive(Debug)]
pub struct RouteTable {
    tree: LabelTree<Arc<RouteTarget>>,
    routes: usize,
    generation: u64,
}

impl RouteTable {
    /// Compile routes into a table. Stops at the first route that fails.
    pub fn compile(routes: &[RouteConfig], generation: u64) -> Result<Self, RouterError> {
        let mut tree = LabelTree::new();
        for route in routes {
            tree.add(&route.host, Arc::new(RouteTarget::from(route)))
                .map_err(|source| RouterError::Compile {
                    route: route.name.clone(),
                    host: route.host.clone(),
                    source,
                })?;
        }

        Ok(Self {
            tree,
            routes: routes.len(),
            generation,
        })
    }

    /// Look up an already normalized host.
    pub fn lookup(&self, host: &str) -> Result<Arc<RouteTarget>, RouterError> {
        match self.tree.get(host) {
            Ok(Some(target)) => Ok(Arc::clone(target)),
            Ok(None) => Err(RouterError::NoContext { host: host.to_string() }),
            Err(TreeError::NotFound) => Err(RouterError::NoRoute { host: host.to_string() }),
            Err(source) => Err(RouterError::Lookup {
                host: host.to_string(),
                source,
            }),
        }
    }

    /// Number of routes in this table.
    pub fn len(&self) -> usize {
        self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes == 0
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Host router shared by every connection handler.
#[derive(Debug)]
pub struct HostRouter {
    table: ArcSwap<RouteTable>,
    next_generation: AtomicU64,
}

impl HostRouter {
    /// Build a router from the configured routes.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, RouterError> {
        let table = RouteTable::compile(routes, 0)?;
        metrics::record_route_count(table.len());
        tracing::info!(routes = table.len(), "Route table compiled");

        Ok(Self {
            table: ArcSwap::from_pointee(table),
            next_generation: AtomicU64::new(1),
        })
    }

    /// Resolve a raw host value (`Host` header or SNI) to its route.
    pub fn resolve(&self, host: &str) -> Result<Arc<RouteTarget>, RouterError> {
        let host = normalize_host(host);
        let result = self.table.load().lookup(&host);

        match &result {
            Ok(target) => {
                tracing::trace!(host = %host, route = %target.name, "Route matched");
                metrics::record_lookup("hit");
            }
            Err(e) => {
                tracing::debug!(host = %host, error = %e, "No route for host");
                metrics::record_lookup("miss");
            }
        }

        result
    }

    /// Compile `routes` and swap them in. The running table is kept on failure.
    pub fn reload(&self, routes: &[RouteConfig]) -> Result<u64, RouterError> {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let table = match RouteTable::compile(routes, generation) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!(
                    generation,
                    error = %e,
                    "Route reload rejected, keeping current routes"
                );
                metrics::record_reload("rejected");
                return Err(e);
            }
        };

        self.publish(table)
    }

    /// Swap `table` in unless a newer generation is already serving.
    fn publish(&self, table: RouteTable) -> Result<u64, RouterError> {
        let generation = table.generation();
        let routes = table.len();
        let table = Arc::new(table);

        let previous = self.table.rcu(|current| {
            if current.generation() > generation {
                Arc::clone(current)
            } else {
                Arc::clone(&table)
            }
        });

        if previous.generation() > generation {
            let current = previous.generation();
            tracing::warn!(generation, current, "Route reload superseded, discarding");
            metrics::record_reload("superseded");
            return Err(RouterError::Superseded { generation, current });
        }

        metrics::record_reload("applied");
        metrics::record_route_count(routes);
        tracing::info!(generation, routes, "Route table reloaded");

        Ok(generation)
    }

    /// The table currently serving lookups.
    pub fn snapshot(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }
}
