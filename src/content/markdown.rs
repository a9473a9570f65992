//! Markdown rendering with optional syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Loaded syntect assets for one theme
struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

/// Markdown renderer
///
/// Without a highlight theme, fenced code renders as a plain
/// `<pre><code class="language-…">` block.
#[derive(Default)]
pub struct MarkdownRenderer {
    highlighter: Option<Highlighter>,
}

impl MarkdownRenderer {
    /// Create a renderer without syntax highlighting
    pub fn new() -> Self {
        Self { highlighter: None }
    }

    /// Create a renderer that highlights code with the given syntect theme
    pub fn with_theme(theme: &str) -> Self {
        let theme_set = ThemeSet::load_defaults();
        if !theme_set.themes.contains_key(theme) {
            tracing::warn!("Unknown highlight theme {:?}, highlighting disabled", theme);
            return Self::new();
        }

        Self {
            highlighter: Some(Highlighter {
                syntax_set: SyntaxSet::load_defaults_newlines(),
                theme_set,
                theme_name: theme.to_string(),
            }),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is split off before we get here, so no metadata blocks
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut html_output = String::new();
        match &self.highlighter {
            None => html::push_html(&mut html_output, parser),
            Some(highlighter) => {
                html::push_html(&mut html_output, highlight_events(parser, highlighter).into_iter())
            }
        }

        html_output
    }
}

/// Replace fenced code blocks that name a language with highlighted HTML
fn highlight_events<'a>(parser: Parser<'a>, highlighter: &Highlighter) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    // Some(lang) while inside a fenced block we are highlighting
    let mut code_block_lang: Option<String> = None;
    let mut code_block_content = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref lang))) if !lang.is_empty() => {
                code_block_lang = Some(lang.to_string());
                code_block_content.clear();
            }
            Event::End(TagEnd::CodeBlock) if code_block_lang.is_some() => {
                let lang = code_block_lang.take().unwrap_or_default();
                let highlighted = highlighter.highlight(&code_block_content, &lang);
                events.push(Event::Html(CowStr::from(highlighted)));
            }
            Event::Text(text) if code_block_lang.is_some() => {
                code_block_content.push_str(&text);
            }
            _ => events.push(event),
        }
    }

    events
}

impl Highlighter {
    /// Highlight a code block
    fn highlight(&self, code: &str, lang: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let highlighted = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .and_then(|theme| {
                highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
            });

        match highlighted {
            Some(html) => html,
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_plain_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_highlighted_code_block() {
        let renderer = MarkdownRenderer::with_theme("base16-ocean.dark");
        let html = renderer.render("```rust\nfn main() {}\n```\n\nafter");
        assert!(html.contains("style="));
        assert!(!html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains("<p>after</p>"));
    }

    #[test]
    fn test_unknown_theme_disables_highlighting() {
        let renderer = MarkdownRenderer::with_theme("no-such-theme");
        let html = renderer.render("```rust\nlet x = 1;\n```");
        assert!(html.contains(r#"<code class="language-rust">"#));
    }

    #[test]
    fn test_tables_enabled() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
