//! Application state shared by the CLI commands and the REST API.

use std::path::PathBuf;
use std::sync::Arc;

use concierge_core::assistant::ReplyResolver;
use concierge_core::chat::WidgetRegistry;
use concierge_infra::config::load_config;
use concierge_types::config::ConciergeConfig;

/// Shared application state.
///
/// Cheap to clone: the registry and config sit behind `Arc`s and the
/// resolver is a pointer to the static rule table.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConciergeConfig>,
    pub resolver: ReplyResolver,
    pub registry: Arc<WidgetRegistry>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load `config.toml` from `data_dir`, let the caller override it, and
    /// wire the registry.
    pub async fn init(
        data_dir: PathBuf,
        overrides: impl FnOnce(&mut ConciergeConfig),
    ) -> Self {
        let mut config = load_config(&data_dir).await;
        overrides(&mut config);
        Self::new(config, data_dir)
    }

    pub fn new(config: ConciergeConfig, data_dir: PathBuf) -> Self {
        let resolver = ReplyResolver::new();
        let registry = WidgetRegistry::new(resolver, config.widget.clone());
        Self {
            config: Arc::new(config),
            resolver,
            registry: Arc::new(registry),
            data_dir,
        }
    }
}
