//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use crate::application::services::{CareerExplorer, TaxonomyService};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::infrastructure::traits::{BadgeNotifier, FileSystem, RealFileSystem, TracingBadgeNotifier};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Badge service
    pub notifier: Arc<dyn BadgeNotifier>,

    pub taxonomy_service: TaxonomyService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(TracingBadgeNotifier),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        notifier: Arc<dyn BadgeNotifier>,
    ) -> Self {
        let settings = Arc::new(settings);
        let taxonomy_service = TaxonomyService::new(fs.clone());

        Self {
            settings,
            fs,
            notifier,
            taxonomy_service,
        }
    }

    /// Write the config template to `path`, creating parent directories.
    ///
    /// Refuses to overwrite an existing file.
    pub fn init_config(&self, path: &Path) -> ApplicationResult<()> {
        if self.fs.exists(path) {
            return Err(ApplicationError::Config {
                message: format!("config already exists: {}", path.display()),
            });
        }
        let failed = |action: &str, e: std::io::Error| ApplicationError::OperationFailed {
            context: format!("{} {}", action, path.display()),
            source: Box::new(e),
        };
        self.fs
            .ensure_parent(path)
            .map_err(|e| failed("create dir for", e))?;
        self.fs
            .write(path, &Settings::template())
            .map_err(|e| failed("write", e))?;
        Ok(())
    }

    /// Build an explorer over the configured taxonomy (built-in when unset).
    pub fn explorer(&self) -> ApplicationResult<CareerExplorer> {
        let tree = self
            .taxonomy_service
            .load_tree(self.settings.taxonomy.as_deref(), self.settings.max_depth)?;
        CareerExplorer::new(tree, self.settings.layout.clone(), self.notifier.clone())
    }
}
