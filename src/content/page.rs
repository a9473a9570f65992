//! Page model

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::date::parse_date_string;
use super::{FrontMatter, RenderError, Value};

/// Fields computed by the pipeline; front-matter may not shadow them
const RESERVED_KEYS: &[&str] = &["file", "main", "outDir", "outFile"];

/// One rendered content unit
///
/// The well-known fields are typed; any other front-matter key is kept in
/// `extra`. Serialized field names are camelCase (`outFile`, `outDir`) and
/// `extra` is flattened, so templates see one flat record.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Source file path
    pub file: PathBuf,

    /// Rendered body (HTML or CSS); `None` for unrecognized sources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    /// Output extension override, e.g. `.css`
    pub ext: Option<String>,

    /// Output directory, mirroring the source directory
    pub out_dir: PathBuf,

    /// Output file path
    pub out_file: PathBuf,

    /// Absolute public URL
    pub url: Option<String>,

    /// Public route (`/posts/hello.html`)
    pub path: Option<String>,

    /// Publish date
    pub date: Option<DateTime<Local>>,

    /// Logical page type (`post`, `page`, ...)
    pub layout: Option<String>,

    /// Tag names, in front-matter order
    pub tags: Vec<String>,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Page {
    /// Create an empty page for a source file
    pub fn new<P: Into<PathBuf>>(file: P) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    /// Build a page from parsed front-matter and its rendered body
    pub fn from_front_matter(
        file: &Path,
        fm: FrontMatter,
        main: String,
    ) -> Result<Self, RenderError> {
        let date = match fm.date {
            Some(raw) => {
                Some(parse_date_string(&raw).ok_or(RenderError::InvalidDate(raw))?)
            }
            None => None,
        };

        let extra = fm
            .extra
            .into_iter()
            .filter(|(key, _)| {
                let reserved = RESERVED_KEYS.contains(&key.as_str());
                if reserved {
                    tracing::debug!("Ignoring reserved front-matter key {:?} in {:?}", key, file);
                }
                !reserved
            })
            .map(|(key, value)| (key, Value::from(value)))
            .collect();

        Ok(Self {
            file: file.to_path_buf(),
            main: Some(main),
            ext: fm.ext,
            url: fm.url,
            path: fm.path,
            date,
            layout: fm.layout,
            tags: fm.tags,
            extra,
            ..Default::default()
        })
    }

    /// File name without extension
    pub fn name(&self) -> &str {
        self.file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// Whether the page is an `index` file, which owns its directory's URL
    pub fn is_index(&self) -> bool {
        self.name() == "index"
    }

    /// Extension the output file gets: the override, else `.html`
    pub fn output_ext(&self) -> String {
        match self.ext.as_deref() {
            Some(ext) if ext.starts_with('.') => ext.to_string(),
            Some(ext) if !ext.is_empty() => format!(".{}", ext),
            _ => ".html".to_string(),
        }
    }

    /// Whether the resolved output is an HTML document
    pub fn is_html(&self) -> bool {
        self.out_file
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".html"))
    }

    /// Whether the page resolved to the `post` layout
    pub fn is_post(&self) -> bool {
        self.layout.as_deref() == Some("post")
    }

    /// Title from front-matter, if any
    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(Value::as_str)
    }
}
