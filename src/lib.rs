//! blog-gen: turns headless CMS JSON exports into Jekyll sources
//!
//! Posts and press releases become Markdown files with YAML front-matter in
//! their collection directories, and the blog home becomes a single
//! front-matter-only landing page.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use commands::generate::RunReport;

/// A Jekyll site fed by CMS exports
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Jekyll source directory, where collections are written
    pub source_dir: PathBuf,
    /// Data directory holding the CMS feeds
    pub data_dir: PathBuf,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config = Self::load_config(base_dir.as_ref())?;
        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let source_dir = base_dir.as_ref().join(&config.source);
        let data_dir = source_dir.join(&config.data_dir);

        Self {
            config,
            source_dir,
            data_dir,
        }
    }

    /// Load `_config.yml` from a directory, falling back to defaults
    pub fn load_config(base_dir: &Path) -> Result<config::SiteConfig> {
        let config_path = base_dir.join("_config.yml");
        if config_path.exists() {
            config::SiteConfig::load(&config_path)
        } else {
            Ok(config::SiteConfig::default())
        }
    }

    /// Feed reader for this site's data directory
    pub fn store(&self) -> content::ContentStore {
        content::ContentStore::new(&self.data_dir, &self.config.locale)
    }

    /// Document writer for this site's source directory
    pub fn emitter(&self) -> generator::Emitter {
        generator::Emitter::new(&self.source_dir)
    }

    /// Generate posts, the blog home and press releases
    pub fn generate(&self) -> Result<RunReport> {
        commands::generate::run(self)
    }

    /// Remove generated documents
    pub fn clean(&self) -> Result<usize> {
        commands::clean::run(self)
    }
}
