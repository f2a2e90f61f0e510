//! Shared utilities for integration testing.

use std::fs;
use std::path::PathBuf;

use host_router::config::RouteConfig;

/// Route file used across tests.
#[allow(dead_code)]
pub const ROUTES_TOML: &str = r#"
[observability]
log_level = "warn"

[[routes]]
name = "api"
host = "api.example.com"
backend_group = "api"

[[routes]]
name = "sites"
host = "*.example.com"
backend_group = "web"

[[routes]]
name = "regional"
host = "www.example.*"
backend_group = "web"
"#;

/// A config file in the system temp dir, removed on drop.
#[allow(dead_code)]
pub struct TempConfig {
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TempConfig {
    pub fn new(name: &str, content: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "host-router-{}-{}.toml",
            std::process::id(),
            name
        ));
        fs::write(&path, content).unwrap();
        Self { path }
    }
}

impl Drop for TempConfig {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// A scratch directory in the system temp dir, removed on drop.
#[allow(dead_code)]
pub struct TempDir {
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TempDir {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "host-router-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// A one-route file whose route is named `name`.
#[allow(dead_code)]
pub fn single_route_toml(name: &str) -> String {
    format!(
        r#"
[[routes]]
name = "{name}"
host = "{name}.example.com"
backend_group = "web"
"#
    )
}

#[allow(dead_code)]
pub fn route(name: &str, host: &str, group: &str) -> RouteConfig {
    RouteConfig {
        name: name.into(),
        host: host.into(),
        backend_group: group.into(),
    }
}
