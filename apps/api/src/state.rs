use std::sync::Arc;

use crate::analyze::CareerAnalyzer;
use crate::config::Config;
use crate::store::local::LocalStore;
use crate::store::remote::RemoteStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Offline-first draft cache. Always present.
    pub local: Arc<LocalStore>,
    /// Per-user remote store seam. `None` when `DATABASE_URL` is not
    /// configured; the service then runs in anonymous/local-only mode.
    pub remote: Option<Arc<dyn RemoteStore>>,
    /// Pluggable provider seam. Production wires the LLM client; tests inject
    /// a mock so no run touches the network.
    pub analyzer: Arc<dyn CareerAnalyzer>,
    /// Startup configuration, kept for handlers that grow settings later.
    #[allow(dead_code)]
    pub config: Config,
}
