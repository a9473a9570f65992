//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::RenderError;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a content file
///
/// Only the keys that drive inference get fields; everything else lands
/// in `extra` and is passed through to templates untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub date: Option<String>,
    pub layout: Option<String>,
    pub url: Option<String>,
    pub path: Option<String>,
    pub ext: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    ///
    /// A file without a front-matter block is valid and yields the default.
    /// A block that is present but does not parse is an error.
    pub fn parse(content: &str) -> Result<(Self, &str), RenderError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        // YAML front-matter (---)
        if let Some((block, body)) = split_block(content, "---", &["---", "..."]) {
            return Ok((Self::parse_yaml(block)?, body));
        }

        // JSON front-matter (;;;)
        if let Some((block, body)) = split_block(content, ";;;", &[";;;"]) {
            return Ok((Self::parse_json(block)?, body));
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(block: &str) -> Result<Self, RenderError> {
        if block.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        // A block holding only comments parses as null
        serde_yaml::from_str::<Option<FrontMatter>>(block)
            .map(Option::unwrap_or_default)
            .map_err(|e| RenderError::FrontMatter(e.to_string()))
    }

    fn parse_json(block: &str) -> Result<Self, RenderError> {
        if block.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        serde_json::from_str(block).map_err(|e| RenderError::FrontMatter(e.to_string()))
    }
}

/// Split off a delimited block at the very start of `content`
///
/// The first line must be exactly `open`; the block ends at the first line
/// equal to one of `close`. Returns `(block, body)`, or `None` when there is
/// no complete block.
fn split_block<'a>(content: &'a str, open: &str, close: &[&str]) -> Option<(&'a str, &'a str)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != open {
        return None;
    }

    let mut offset = first.len();
    for line in lines {
        if close.contains(&line.trim_end()) {
            let block = &content[first.len()..offset];
            let body = &content[offset + line.len()..];
            return Some((block, body));
        }
        offset += line.len();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
tags:
  - rust
  - web
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.extra.get("title").and_then(|v| v.as_str()),
            Some("Hello World")
        );
        assert_eq!(fm.date.as_deref(), Some("2024-01-15 10:30:00"));
        assert_eq!(fm.tags, vec!["rust", "web"]);
        assert_eq!(body, "\nThis is the content.\n");
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Test Post\", \"tags\": [\"a\", \"b\"]}\n;;;\nThis is content.\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.extra.get("title").and_then(|v| v.as_str()),
            Some("Test Post")
        );
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert_eq!(body, "This is content.\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just a heading\n\nBody.\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.extra.is_empty());
        assert!(fm.tags.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_block_is_body() {
        let content = "---\ntitle: never closed\n\nStill body.\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.extra.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_single_string_tags() {
        let content = "---\ntags: Notes\n---\nContent here.\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_dots_close_block() {
        let content = "---\nlayout: post\n...\nBody\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.layout.as_deref(), Some("post"));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\nBody\n";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(RenderError::FrontMatter(_))
        ));
    }

    #[test]
    fn test_scalar_yaml_is_error() {
        let content = "---\njust a sentence\n---\nBody\n";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_empty_and_comment_blocks() {
        let (fm, body) = FrontMatter::parse("---\n---\nBody\n").unwrap();
        assert!(fm.extra.is_empty());
        assert_eq!(body, "Body\n");

        let (fm, _) = FrontMatter::parse("---\n# nothing here\n---\nBody\n").unwrap();
        assert!(fm.extra.is_empty());
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\nlayout: page\r\n---\r\nBody\r\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.layout.as_deref(), Some("page"));
        assert_eq!(body, "Body\r\n");
    }
}
