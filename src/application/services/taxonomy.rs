//! Taxonomy loading service
//!
//! Reads an authored taxonomy from a TOML or JSON file, or falls back to
//! the built-in catalog, and builds the career tree from it.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{builtin_taxonomy, CareerTree, Taxonomy, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Supported taxonomy file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyFormat {
    Toml,
    Json,
}

impl TaxonomyFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> ApplicationResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            _ => Err(ApplicationError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// Service for loading taxonomies and building trees.
pub struct TaxonomyService {
    fs: Arc<dyn FileSystem>,
}

impl TaxonomyService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Parse the taxonomy file at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Taxonomy> {
        let format = TaxonomyFormat::from_path(path)?;
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("read taxonomy {}", path.display()),
                source: Box::new(e),
            })?;
        let taxonomy = match format {
            TaxonomyFormat::Toml => Taxonomy::from_toml_str(&content)?,
            TaxonomyFormat::Json => Taxonomy::from_json_str(&content)?,
        };
        debug!(
            "loaded taxonomy {} with {} streams",
            path.display(),
            taxonomy.streams.len()
        );
        Ok(taxonomy)
    }

    /// Build the tree from `path`, or from the built-in catalog when None.
    pub fn load_tree(&self, path: Option<&Path>, max_depth: usize) -> ApplicationResult<CareerTree> {
        let taxonomy = match path {
            Some(p) => self.load(p)?,
            None => builtin_taxonomy()?,
        };
        Ok(TreeBuilder::new(max_depth).build(&taxonomy)?)
    }
}
