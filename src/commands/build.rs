//! Build the site: clean, copy static assets, render pages

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::ensure_dir;
use crate::content::{infer, walker, Inferred, Page, PageRenderer};
use crate::layout::LayoutCompositor;
use crate::site::SiteContext;
use crate::Site;

/// What one build produced
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Files copied from the static directory
    pub assets: usize,
    /// HTML pages written through the layout
    pub pages: usize,
    /// Non-HTML outputs such as compiled stylesheets
    pub artifacts: usize,
}

/// Run a full build
pub fn run(site: &Site) -> Result<BuildSummary> {
    let start = std::time::Instant::now();

    clean_output(site);
    let assets = copy_assets(site)?;
    let mut summary = render_pages(site)?;
    summary.assets = assets;

    let duration = start.elapsed();
    tracing::info!(
        "Built {} pages, {} artifacts and {} assets in {:.2}s",
        summary.pages,
        summary.artifacts,
        summary.assets,
        duration.as_secs_f64()
    );

    Ok(summary)
}

/// Make sure the output directory exists; existing contents are kept
pub fn clean_output(site: &Site) {
    tracing::debug!("Preparing output directory {:?}", site.config.out_dir);
    ensure_dir(&site.config.out_dir);
}

/// Copy the static directory into the output root
///
/// A missing static directory is not an error.
pub fn copy_assets(site: &Site) -> Result<usize> {
    let static_dir = &site.config.static_dir;
    if !static_dir.is_dir() {
        tracing::info!("No static directory at {:?}, skipping assets", static_dir);
        return Ok(0);
    }

    tracing::info!("Copying static files from {:?}", static_dir);
    copy_dir(static_dir, &site.config.out_dir)
}

fn copy_dir(src: &Path, dest: &Path) -> Result<usize> {
    let mut count = 0;

    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to list {:?}", src))?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&target);
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {:?} to {:?}", entry.path(), target))?;
            count += 1;
        }
    }

    Ok(count)
}

/// Render, infer, aggregate and lay out every content file
pub fn render_pages(site: &Site) -> Result<BuildSummary> {
    let config = &site.config;
    let renderer = PageRenderer::new(&config.markdown);
    let ctx = site.inference_context();

    let files = walker::collect_files(&config.content_dir)?;
    tracing::info!("Rendering {} files from {:?}", files.len(), config.content_dir);

    let mut summary = BuildSummary::default();
    let mut pages = Vec::new();

    for file in files {
        let page = renderer
            .render_file(&file)
            .with_context(|| format!("Failed to render {:?}", file))?;
        if page.main.is_none() {
            continue;
        }

        match infer::infer(page, &ctx).with_context(|| format!("Failed to infer {:?}", file))? {
            Inferred::Artifact(page) => {
                write_page(&page, page.main.as_deref().unwrap_or_default())?;
                summary.artifacts += 1;
            }
            Inferred::Document(page) => pages.push(page),
        }
    }

    let site_context = SiteContext::new(config, &pages);
    tracing::debug!(
        "Aggregated {} pages, {} posts, {} tags",
        site_context.pages.len(),
        site_context.posts.len(),
        site_context.tags.len()
    );

    let compositor = LayoutCompositor::load(&config.layout_dir, &config.layout_file)?;
    let base = LayoutCompositor::base_context(&site_context)?;

    for page in &pages {
        let html = compositor.compose(&base, page)?;
        write_page(page, &html)?;
        summary.pages += 1;
    }

    Ok(summary)
}

fn write_page(page: &Page, content: &str) -> Result<()> {
    ensure_dir(&page.out_dir);
    fs::write(&page.out_file, content)
        .with_context(|| format!("Failed to write {:?}", page.out_file))?;
    tracing::debug!("Wrote {:?}", page.out_file);
    Ok(())
}
