//! Layout composition: the second rendering pass

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use walkdir::WalkDir;

use crate::content::Page;
use crate::site::SiteContext;

/// Template extensions picked up from the layout directory besides the
/// layout file itself
const TEMPLATE_EXTENSIONS: &[&str] = &["html", "htm", "tera", "xml", "txt"];

/// Renders pages through the shared layout template
pub struct LayoutCompositor {
    tera: Tera,
    layout: String,
}

impl LayoutCompositor {
    /// Load the layout directory
    ///
    /// All templates in the directory are registered under their relative
    /// path, so the layout can `extends` or `include` its siblings. A
    /// missing directory is only an error once a page needs the layout.
    pub fn load(layout_dir: &Path, layout_file: &str) -> Result<Self> {
        let mut tera = Tera::default();

        // Generating HTML; escaping is the template's call
        tera.autoescape_on(vec![]);

        if layout_dir.is_dir() {
            let files = template_files(layout_dir, layout_file)?;
            tracing::debug!("Loaded {} layout templates from {:?}", files.len(), layout_dir);
            tera.add_template_files(files)
                .with_context(|| format!("Failed to load layout templates from {:?}", layout_dir))?;
        } else {
            tracing::warn!("Layout directory {:?} does not exist", layout_dir);
        }

        Ok(Self {
            tera,
            layout: layout_file.to_string(),
        })
    }

    /// Build the render context shared by every page of one build
    pub fn base_context(site: &SiteContext) -> Result<Context> {
        Context::from_serialize(site).context("Failed to serialize site context")
    }

    /// Render one page through the layout
    ///
    /// The page is available as `page`, next to everything in `base`.
    pub fn compose(&self, base: &Context, page: &Page) -> Result<String> {
        let mut context = base.clone();
        context.insert("page", page);

        self.tera
            .render(&self.layout, &context)
            .with_context(|| format!("Failed to render layout {:?} for {:?}", self.layout, page.file))
    }
}

/// Collect `(path, name)` pairs for every template in `dir`
fn template_files(dir: &Path, layout_file: &str) -> Result<Vec<(PathBuf, Option<String>)>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to list {:?}", dir))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let name = path
            .strip_prefix(dir)?
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let is_template = name == layout_file
            || path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| TEMPLATE_EXTENSIONS.contains(&e));
        if is_template {
            files.push((path.to_path_buf(), Some(name)));
        }
    }

    Ok(files)
}
