//! Scaffold a new post

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use super::ensure_dir;
use crate::Site;

/// Create a dated Markdown post and return its path
///
/// The file is named `YYYY-MM-DD-<slug>.md` and placed in the posts
/// directory, or the content root when the posts convention is disabled.
pub fn create_post(site: &Site, title: &str) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable file name", title);
    }

    let target_dir = match &site.config.posts_dir {
        Some(posts_dir) => site.config.content_dir.join(posts_dir),
        None => site.config.content_dir.clone(),
    };
    ensure_dir(&target_dir);

    let file_path = target_dir.join(format!("{}-{}.md", now.format("%Y-%m-%d"), slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: {}\ndate: {}\n---\n",
        yaml_string(title)?,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(&file_path, content)
        .with_context(|| format!("Failed to write {:?}", file_path))?;

    tracing::info!("Created {:?}", file_path);
    Ok(file_path)
}

/// Quote a scalar so any title survives the YAML round trip
fn yaml_string(s: &str) -> Result<String> {
    Ok(serde_yaml::to_string(s)?.trim_end().to_string())
}
