//! Host router CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!     routes.toml ──▶ config loader ──▶ validation ──▶ HostRouter (LabelTree)
//!          │                                               ▲      │
//!          └──── watcher (notify) ── reload ───────────────┘      ▼
//!                                                      resolve(host) → route
//! ```
//!
//! # Commands
//! - `check`: load and validate a route file
//! - `resolve <host>...`: look hosts up against the route file
//! - `watch`: keep a router live, reloading on file changes until Ctrl-C

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use host_router::config::watcher::ConfigWatcher;
use host_router::config::{load_config, ObservabilityConfig};
use host_router::observability::{logging, metrics};
use host_router::routing::HostRouter;

#[derive(Parser)]
#[command(name = "host-router")]
#[command(about = "Resolve host names against a wildcard route table", long_about = None)]
struct Cli {
    /// Route configuration file (TOML).
    #[arg(short, long, default_value = "host-router.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route file
    Check,
    /// Resolve host names to routes
    Resolve {
        /// Host names to look up
        #[arg(required = true)]
        hosts: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve lookups from the route file, reloading it on change
    Watch,
}

#[derive(Serialize)]
struct Resolution {
    host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backend_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            let _ = logging::init_logging(&ObservabilityConfig::default());
            tracing::error!(path = ?cli.config, error = %e, "Failed to load configuration");
            return Ok(ExitCode::FAILURE);
        }
    };
    logging::init_logging(&config.observability)?;

    tracing::debug!(
        path = ?cli.config,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Check => {
            println!("{}: {} routes OK", cli.config.display(), config.routes.len());
        }
        Commands::Resolve { hosts, json } => {
            let router = HostRouter::from_config(&config.routes)?;
            let resolutions: Vec<Resolution> = hosts
                .into_iter()
                .map(|host| match router.resolve(&host) {
                    Ok(target) => Resolution {
                        host,
                        route: Some(target.name.clone()),
                        backend_group: Some(target.backend_group.clone()),
                        error: None,
                    },
                    Err(e) => Resolution {
                        host,
                        route: None,
                        backend_group: None,
                        error: Some(e.to_string()),
                    },
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&resolutions)?);
            } else {
                for r in &resolutions {
                    match (&r.route, &r.backend_group, &r.error) {
                        (Some(route), Some(group), _) => {
                            println!("{} -> {} ({})", r.host, route, group)
                        }
                        (_, _, Some(error)) => println!("{} -> error: {}", r.host, error),
                        _ => println!("{} -> ?", r.host),
                    }
                }
            }

            if resolutions.iter().any(|r| r.error.is_some()) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Watch => {
            let router = HostRouter::from_config(&config.routes)?;

            if config.observability.metrics_enabled {
                let addr: SocketAddr = config.observability.metrics_address.parse()?;
                metrics::init_metrics(addr)?;
            }

            let (watcher, mut updates) = ConfigWatcher::new(&cli.config);
            let _watcher = watcher.run()?;

            loop {
                tokio::select! {
                    Some(new_config) = updates.recv() => {
                        // Rejections are logged by the router; the old table keeps serving.
                        let _ = router.reload(&new_config.routes);
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Shutdown signal received");
                        break;
                    }
                }
            }

            tracing::info!(
                generation = router.snapshot().generation(),
                "Shutdown complete"
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
