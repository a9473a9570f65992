//! Page renderer: one source file in, one page record out

use std::fs;
use std::path::Path;

use super::markdown::MarkdownRenderer;
use super::stylesheet::{self, StyleSyntax};
use super::{FrontMatter, Page, RenderError};
use crate::config::MarkdownConfig;

/// How a source file is converted, decided by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `.ejs`, `.html`, `.htm`: rendered as a standalone template
    Template,
    /// `.md`, `.markdown`: front-matter plus Markdown body
    Markdown,
    /// `.sass`, `.scss`: compiled to CSS
    Stylesheet(StyleSyntax),
}

impl SourceKind {
    /// Classify a path by its extension (case-sensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ejs" | "html" | "htm" => Some(SourceKind::Template),
            "md" | "markdown" => Some(SourceKind::Markdown),
            "sass" => Some(SourceKind::Stylesheet(StyleSyntax::Sass)),
            "scss" => Some(SourceKind::Stylesheet(StyleSyntax::Scss)),
            _ => None,
        }
    }
}

/// Renders source files into page records
#[derive(Default)]
pub struct PageRenderer {
    markdown: MarkdownRenderer,
}

impl PageRenderer {
    /// Create a renderer with the given Markdown options
    pub fn new(config: &MarkdownConfig) -> Self {
        let markdown = match config.highlight_theme.as_deref() {
            Some(theme) => MarkdownRenderer::with_theme(theme),
            None => MarkdownRenderer::new(),
        };
        Self { markdown }
    }

    /// Read and render one source file
    ///
    /// Files with an unrecognized extension are not read at all and come
    /// back as an empty record with no `main`.
    pub fn render_file(&self, path: &Path) -> Result<Page, RenderError> {
        let Some(kind) = SourceKind::from_path(path) else {
            tracing::debug!("Skipping unrecognized source {:?}", path);
            return Ok(Page::new(path));
        };

        tracing::debug!("Rendering {:?} as {:?}", path, kind);
        let content = fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.render_source(kind, &content, path)
    }

    /// Render already-read source text
    pub fn render_source(
        &self,
        kind: SourceKind,
        content: &str,
        path: &Path,
    ) -> Result<Page, RenderError> {
        match kind {
            SourceKind::Template => {
                let main = render_template(content)?;
                Ok(Page {
                    main: Some(main),
                    ..Page::new(path)
                })
            }
            SourceKind::Markdown => {
                let (fm, body) = FrontMatter::parse(content)?;
                let main = self.markdown.render(body);
                Page::from_front_matter(path, fm, main)
            }
            SourceKind::Stylesheet(syntax) => {
                let dir = path.parent().unwrap_or(Path::new("."));
                let css = stylesheet::compile(content, syntax, dir)?;
                Ok(Page {
                    main: Some(css),
                    ext: Some(".css".to_string()),
                    ..Page::new(path)
                })
            }
        }
    }
}

/// Render a template with no context at all
///
/// This is a syntax pass over the page itself; site data only becomes
/// available later, in the layout.
fn render_template(content: &str) -> Result<String, RenderError> {
    Ok(tera::Tera::one_off(content, &tera::Context::new(), false)?)
}
