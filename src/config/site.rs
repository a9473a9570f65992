//! Site configuration (config.yml / config.toml)

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the invocation directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "./config.yml";

/// Main site configuration
///
/// Every field has a default, so a config file only needs the keys it
/// overrides. Directory fields may be absolute or relative; see
/// [`crate::Site::from_config`] for how relative paths are resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directories
    /// Relative to the config file's directory
    pub base_dir: PathBuf,
    /// Relative to `base_dir`
    pub out_dir: PathBuf,
    /// Relative to `base_dir`
    pub src_dir: PathBuf,
    /// Relative to `src_dir`
    #[serde(alias = "asset_dir")]
    pub static_dir: PathBuf,
    /// Relative to `src_dir`
    #[serde(alias = "page_dir")]
    pub content_dir: PathBuf,
    /// Relative to `src_dir`
    pub layout_dir: PathBuf,

    // Conventions
    /// Template inside `layout_dir` every HTML page is composed with
    pub layout_file: String,
    /// Directory name whose files default to the `post` layout; `null` disables
    pub posts_dir: Option<String>,

    #[serde(default)]
    pub markdown: MarkdownConfig,

    #[serde(default)]
    pub site: SiteInfo,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            out_dir: PathBuf::from("out"),
            src_dir: PathBuf::from("."),
            static_dir: PathBuf::from("static"),
            content_dir: PathBuf::from("content"),
            layout_dir: PathBuf::from("layout"),

            layout_file: "default.html".to_string(),
            posts_dir: Some("posts".to_string()),

            markdown: MarkdownConfig::default(),
            site: SiteInfo::default(),
            extra: IndexMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    ///
    /// `.toml` files are parsed as TOML, everything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config {:?}", path))?,
            _ => serde_yaml::from_str::<Option<SiteConfig>>(&content)
                .with_context(|| format!("Failed to parse YAML config {:?}", path))?
                .unwrap_or_default(),
        };

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing or broken
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        tracing::debug!("Loading config from {:?}", path);

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Using default config: {:#}", e);
                Self::default()
            }
        }
    }
}

/// Public site information exposed to templates as `site`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfo {
    pub url: String,
    pub title: String,
    pub description: String,
    pub image: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            url: "https://example.com".to_string(),
            title: "My Site".to_string(),
            description: String::new(),
            image: "/banner.png".to_string(),
        }
    }
}

/// Markdown rendering options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// syntect theme used for fenced code blocks; plain `<pre><code>` when unset
    pub highlight_theme: Option<String>,
}
