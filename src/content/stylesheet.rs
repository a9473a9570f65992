//! Sass/SCSS compilation

use std::path::Path;

use super::RenderError;

/// Source syntax of a stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSyntax {
    /// Indented syntax (`.sass`)
    Sass,
    /// Brace syntax (`.scss`)
    Scss,
}

/// Compile a stylesheet to CSS
///
/// `@import`/`@use` resolve relative to `dir`, the source file's directory.
pub fn compile(source: &str, syntax: StyleSyntax, dir: &Path) -> Result<String, RenderError> {
    let input_syntax = match syntax {
        StyleSyntax::Sass => grass::InputSyntax::Sass,
        StyleSyntax::Scss => grass::InputSyntax::Scss,
    };
    let options = grass::Options::default()
        .input_syntax(input_syntax)
        .load_path(dir);

    grass::from_string(source.to_string(), &options)
        .map_err(|e| RenderError::Stylesheet(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_compile_scss() {
        let css = compile(
            "$c: red;\n.a { .b { color: $c; } }\n",
            StyleSyntax::Scss,
            Path::new("."),
        )
        .unwrap();
        assert!(css.contains(".a .b"));
        assert!(css.contains("color: red"));
    }

    #[test]
    fn test_compile_sass() {
        let css = compile(".a\n  color: blue\n", StyleSyntax::Sass, Path::new(".")).unwrap();
        assert!(css.contains("color: blue"));
    }

    #[test]
    fn test_import_relative_to_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_vars.scss"), "$w: 10px;\n").unwrap();
        let css = compile(
            "@import 'vars';\n.x { width: $w; }\n",
            StyleSyntax::Scss,
            dir.path(),
        )
        .unwrap();
        assert!(css.contains("width: 10px"));
    }

    #[test]
    fn test_syntax_error() {
        let err = compile(".a { color: ", StyleSyntax::Scss, Path::new(".")).unwrap_err();
        assert!(matches!(err, RenderError::Stylesheet(_)));
    }
}
