//! Content module - turns source files into pages

mod date;
mod error;
mod frontmatter;
pub mod infer;
mod markdown;
mod page;
pub mod renderer;
pub mod stylesheet;
mod value;
pub mod walker;

pub use error::RenderError;
pub use frontmatter::FrontMatter;
pub use infer::{InferenceContext, Inferred};
pub use markdown::MarkdownRenderer;
pub use page::Page;
pub use renderer::{PageRenderer, SourceKind};
pub use value::Value;
