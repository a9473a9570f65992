//! Metadata inference
//!
//! Fills in whatever a page did not declare itself, in a fixed order:
//!
//! 1. output location ([`resolve_output`])
//! 2. non-HTML outputs stop here and become [`Inferred::Artifact`]
//! 3. publish date ([`resolve_date`])
//! 4. layout ([`resolve_layout`])
//! 5. URL and route ([`resolve_url`])
//!
//! Tag membership is derived afterwards by the site aggregator.

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::date::date_in;
use super::{Page, RenderError};

/// Everything inference needs to know about the site
#[derive(Debug, Clone, Copy)]
pub struct InferenceContext<'a> {
    /// Root of the content tree
    pub content_dir: &'a Path,
    /// Root of the output tree
    pub out_dir: &'a Path,
    /// Site base URL
    pub site_url: &'a str,
    /// Directory name marking posts; `None` disables the convention
    pub posts_dir: Option<&'a str>,
}

/// Result of running a page through inference
#[derive(Debug)]
pub enum Inferred {
    /// A finished non-HTML file (compiled CSS, ...) to be written as-is
    Artifact(Page),
    /// An HTML page that goes on to aggregation and layout
    Document(Page),
}

/// Run the whole inference pipeline on one page
pub fn infer(page: Page, ctx: &InferenceContext) -> Result<Inferred, RenderError> {
    let page = resolve_output(page, ctx);
    if !page.is_html() {
        return Ok(Inferred::Artifact(page));
    }

    let page = resolve_date(page, ctx)?;
    let page = resolve_layout(page, ctx);
    let page = resolve_url(page, ctx);

    Ok(Inferred::Document(page))
}

/// Mirror the source location under the output root
pub fn resolve_output(mut page: Page, ctx: &InferenceContext) -> Page {
    page.out_dir = ctx.out_dir.join(relative_dir(&page.file, ctx.content_dir));
    page.out_file = page
        .out_dir
        .join(format!("{}{}", page.name(), page.output_ext()));
    page
}

/// Front-matter date, else a `YYYY-MM-DD` in the file name, else in the
/// directory path below the content root, else the file's creation time
pub fn resolve_date(mut page: Page, ctx: &InferenceContext) -> Result<Page, RenderError> {
    if page.date.is_some() {
        return Ok(page);
    }

    let dir = relative_dir(&page.file, ctx.content_dir);
    let date = match date_in(page.name()).or_else(|| date_in(&dir.to_string_lossy())) {
        Some(date) => date,
        None => created_at(&page.file)?,
    };

    page.date = Some(date);
    Ok(page)
}

/// Front-matter layout, else `post` for non-index files directly inside the
/// posts directory, else `page`
pub fn resolve_layout(mut page: Page, ctx: &InferenceContext) -> Page {
    if page.layout.is_some() {
        return page;
    }

    let in_posts_dir = match ctx.posts_dir {
        Some(posts_dir) => page
            .file
            .parent()
            .and_then(|dir| dir.file_name())
            .is_some_and(|name| name == posts_dir),
        None => false,
    };

    let layout = if in_posts_dir && !page.is_index() {
        "post"
    } else {
        "page"
    };
    page.layout = Some(layout.to_string());
    page
}

/// Derive `url` and `path` from the output location unless `url` was given
///
/// `index` pages are addressed by their directory.
pub fn resolve_url(mut page: Page, ctx: &InferenceContext) -> Page {
    if page.url.is_some() {
        return page;
    }

    let target = if page.is_index() {
        &page.out_dir
    } else {
        &page.out_file
    };
    let route = url_path(target.strip_prefix(ctx.out_dir).unwrap_or(target));

    page.url = Some(format!("{}/{}", ctx.site_url.trim_end_matches('/'), route));
    if page.path.is_none() {
        page.path = Some(format!("/{}", route));
    }
    page
}

/// Directory of `file` relative to `root`
fn relative_dir(file: &Path, root: &Path) -> PathBuf {
    file.parent()
        .and_then(|dir| dir.strip_prefix(root).ok())
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Join path components with `/` regardless of platform
fn url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Creation time of a file, or its modification time where the platform
/// does not record creation
fn created_at(path: &Path) -> Result<DateTime<Local>, RenderError> {
    let io_err = |source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(path).map_err(io_err)?;
    let time = metadata
        .created()
        .or_else(|_| metadata.modified())
        .map_err(io_err)?;
    Ok(DateTime::<Local>::from(time))
}
