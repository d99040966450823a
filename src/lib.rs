//! vitrine: a small agency marketing site served straight from markdown
//!
//! Landing page, blog listing and detail pages are rendered per request from
//! a directory of front-matter + markdown files; contact and newsletter forms
//! forward to an external transactional-email provider.

pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod server;
pub mod submission;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The assembled site: configuration plus resolved directories
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content store directory
    pub content_dir: PathBuf,
    /// Static assets directory
    pub assets_dir: PathBuf,
}

impl Site {
    /// Create a new Site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("site.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let assets_dir = base_dir.join(&config.assets_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            assets_dir,
        })
    }
}
