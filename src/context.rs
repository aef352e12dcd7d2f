//! The application context shared by the TUI and `main`.

use crate::assets::AssetResolver;
use crate::config::Config;
use crate::error::Result;
use crate::navigation::{DEFAULT_VIEW, ViewNavigator, ViewRegistry};
use crate::search::{SearchBackend, SearchForm};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Everything the application needs, built once at start-up and passed explicitly.
pub struct ApplicationContext {
    config: Config,
    assets: AssetResolver,
    navigator: ViewNavigator,
    backend: Box<dyn SearchBackend>,
}

impl ApplicationContext {
    /// Build the context with the standard views.
    ///
    /// Starts at `config.start_view`, or at the default view if that is not registered.
    pub fn new(config: Config, backend: Box<dyn SearchBackend>) -> Result<Self> {
        let registry = ViewRegistry::standard()?;

        let start = if registry.contains(&config.start_view) {
            config.start_view.clone()
        } else {
            warn!(
                "Configured start view '{}' does not exist, using '{}'",
                config.start_view, DEFAULT_VIEW
            );
            DEFAULT_VIEW.to_string()
        };
        let mut navigator = ViewNavigator::new(registry, &start)?;
        navigator.subscribe(|id| info!("View changed to '{}'", id));

        let assets_dir = match &config.assets_dir {
            Some(dir) => PathBuf::from(dir),
            None => AssetResolver::default_dir().unwrap_or_else(|e| {
                warn!("{}. Looking for images in ./images", e);
                PathBuf::from("images")
            }),
        };

        Ok(Self {
            config,
            assets: AssetResolver::new(assets_dir),
            navigator,
            backend,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn assets(&self) -> &AssetResolver {
        &self.assets
    }

    /// Look for images in `dir` for this run only. The config is not touched.
    pub fn set_assets_dir<P: AsRef<Path>>(&mut self, dir: P) {
        self.assets = AssetResolver::new(dir);
    }

    pub fn navigator(&self) -> &ViewNavigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut ViewNavigator {
        &mut self.navigator
    }

    /// Submit the search form to the configured backend.
    pub fn submit_search(&mut self, form: &SearchForm) -> bool {
        form.submit(self.backend.as_mut())
    }
}
