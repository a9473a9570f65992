//! sitepress: a small static site generator
//!
//! Content files (templates, Markdown, Sass/SCSS) are rendered one by one,
//! enriched with inferred metadata, aggregated into a site context and
//! written through a shared layout template.

pub mod commands;
pub mod config;
pub mod content;
pub mod layout;
pub mod site;

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

use commands::watch::FailurePolicy;
use config::{SiteConfig, DEFAULT_CONFIG_FILE};
use content::InferenceContext;

/// A site ready to build
///
/// Every directory in `config` is absolute once constructed.
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration with resolved directories
    pub config: SiteConfig,
    /// Config file the site was loaded from (it need not exist)
    pub config_file: PathBuf,
}

impl Site {
    /// Load a site from a config file, relative to the current directory
    ///
    /// A missing or unreadable config file means default settings.
    pub fn new(config_file: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let config_file = normalize(&cwd.join(config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE))));
        let config = SiteConfig::load_or_default(&config_file);
        Ok(Self::from_config(config, config_file))
    }

    /// Resolve the directories of an already loaded config
    ///
    /// `base_dir` is relative to the config file's directory, `out_dir` and
    /// `src_dir` to `base_dir`, the source subdirectories to `src_dir`.
    pub fn from_config<P: Into<PathBuf>>(mut config: SiteConfig, config_file: P) -> Self {
        let config_file = config_file.into();
        let config_root = config_file.parent().unwrap_or(Path::new("/"));

        config.base_dir = resolve(config_root, &config.base_dir);
        config.out_dir = resolve(&config.base_dir, &config.out_dir);
        config.src_dir = resolve(&config.base_dir, &config.src_dir);
        config.static_dir = resolve(&config.src_dir, &config.static_dir);
        config.content_dir = resolve(&config.src_dir, &config.content_dir);
        config.layout_dir = resolve(&config.src_dir, &config.layout_dir);

        tracing::debug!("Site directories: {:#?}", config);

        Self {
            config,
            config_file,
        }
    }

    /// Settings the metadata inference pipeline needs
    pub fn inference_context(&self) -> InferenceContext<'_> {
        InferenceContext {
            content_dir: &self.config.content_dir,
            out_dir: &self.config.out_dir,
            site_url: &self.config.site.url,
            posts_dir: self.config.posts_dir.as_deref(),
        }
    }

    /// Build the site once
    pub fn build(&self) -> Result<commands::build::BuildSummary> {
        commands::build::run(self)
    }

    /// Build, then rebuild on every content change
    pub async fn watch(&self, policy: FailurePolicy) -> Result<()> {
        commands::watch::watch(self, policy).await
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<PathBuf> {
        commands::new::create_post(self, title)
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    normalize(&root.join(path))
}

/// Drop `.` and fold `..` components without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let site = Site::from_config(SiteConfig::default(), "/proj/config.yml");
        let c = &site.config;
        assert_eq!(c.base_dir, Path::new("/proj"));
        assert_eq!(c.out_dir, Path::new("/proj/out"));
        assert_eq!(c.src_dir, Path::new("/proj"));
        assert_eq!(c.static_dir, Path::new("/proj/static"));
        assert_eq!(c.content_dir, Path::new("/proj/content"));
        assert_eq!(c.layout_dir, Path::new("/proj/layout"));
    }

    #[test]
    fn test_src_dir_layout() {
        let config = SiteConfig {
            base_dir: "..".into(),
            src_dir: "src".into(),
            static_dir: "assets".into(),
            content_dir: "pages".into(),
            ..SiteConfig::default()
        };
        let site = Site::from_config(config, "/proj/conf/config.yml");
        let c = &site.config;
        assert_eq!(c.base_dir, Path::new("/proj"));
        assert_eq!(c.out_dir, Path::new("/proj/out"));
        assert_eq!(c.static_dir, Path::new("/proj/src/assets"));
        assert_eq!(c.content_dir, Path::new("/proj/src/pages"));
        assert_eq!(c.layout_dir, Path::new("/proj/src/layout"));
    }

    #[test]
    fn test_absolute_dirs_kept() {
        let config = SiteConfig {
            out_dir: "/var/www".into(),
            ..SiteConfig::default()
        };
        let site = Site::from_config(config, "/proj/config.yml");
        assert_eq!(site.config.out_dir, Path::new("/var/www"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), Path::new("/a/c"));
        assert_eq!(normalize(Path::new("a/../../b")), Path::new("../b"));
        assert_eq!(normalize(Path::new("../../x")), Path::new("../../x"));
        assert_eq!(normalize(Path::new("/../x")), Path::new("/x"));
    }

    #[test]
    fn test_inference_context() {
        let site = Site::from_config(SiteConfig::default(), "/proj/config.yml");
        let ctx = site.inference_context();
        assert_eq!(ctx.content_dir, Path::new("/proj/content"));
        assert_eq!(ctx.site_url, "https://example.com");
        assert_eq!(ctx.posts_dir, Some("posts"));
    }
}
