//! Page-level render errors

use std::path::PathBuf;
use thiserror::Error;

/// Failure while turning one source file into a page
///
/// Any of these aborts the build cycle the page belongs to.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed front-matter: {0}")]
    FrontMatter(String),

    #[error("Invalid date in front-matter: {0:?}")]
    InvalidDate(String),

    #[error("Template error")]
    Template(#[from] tera::Error),

    #[error("Stylesheet error: {0}")]
    Stylesheet(String),
}
