//! Site aggregation: the context every layout render sees

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::Page;

/// Build-wide data passed to the layout
///
/// Serializes as the resolved config's fields plus `pages`, `posts` and
/// `tags`, all at the top level.
#[derive(Debug, Serialize)]
pub struct SiteContext<'a> {
    #[serde(flatten)]
    pub config: &'a SiteConfig,

    /// Every HTML page, in traversal order
    pub pages: &'a [Page],

    /// Pages whose layout is `post`, in traversal order
    pub posts: Vec<&'a Page>,

    /// Tag name to pages, in first-seen order
    pub tags: IndexMap<&'a str, Vec<&'a Page>>,
}

impl<'a> SiteContext<'a> {
    /// Derive the posts and tag views over a finished page list
    pub fn new(config: &'a SiteConfig, pages: &'a [Page]) -> Self {
        Self {
            config,
            pages,
            posts: posts(pages),
            tags: tags(pages),
        }
    }
}

/// Pages laid out as posts
pub fn posts(pages: &[Page]) -> Vec<&Page> {
    pages.iter().filter(|p| p.is_post()).collect()
}

/// Group pages by tag
///
/// Tags appear in the order they are first declared; each tag's pages are in
/// traversal order.
pub fn tags(pages: &[Page]) -> IndexMap<&str, Vec<&Page>> {
    let mut index: IndexMap<&str, Vec<&Page>> = IndexMap::new();
    for page in pages {
        for tag in &page.tags {
            index.entry(tag.as_str()).or_default().push(page);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(file: &str, layout: &str, tags: &[&str]) -> Page {
        let mut page = Page::new(file);
        page.layout = Some(layout.to_string());
        page.tags = tags.iter().map(|t| t.to_string()).collect();
        page
    }

    fn files<'a>(pages: &[&'a Page]) -> Vec<&'a str> {
        pages.iter().map(|p| p.file.to_str().unwrap()).collect()
    }

    #[test]
    fn test_posts_overlap_pages() {
        let pages = vec![
            page("a.md", "post", &[]),
            page("b.md", "page", &[]),
            page("c.md", "post", &[]),
        ];
        let config = SiteConfig::default();
        let site = SiteContext::new(&config, &pages);
        assert_eq!(site.pages.len(), 3);
        assert_eq!(files(&site.posts), vec!["a.md", "c.md"]);
    }

    #[test]
    fn test_tags_in_first_seen_order() {
        let pages = vec![
            page("a.md", "post", &["rust", "go"]),
            page("b.md", "page", &[]),
            page("c.md", "post", &["go"]),
        ];
        let index = tags(&pages);
        assert_eq!(index.keys().copied().collect::<Vec<_>>(), vec!["rust", "go"]);
        assert_eq!(files(&index["go"]), vec!["a.md", "c.md"]);
        assert_eq!(files(&index["rust"]), vec!["a.md"]);
    }

    #[test]
    fn test_serialized_shape() {
        let pages = vec![page("a.md", "post", &["go"])];
        let config = SiteConfig::default();
        let site = SiteContext::new(&config, &pages);
        let json = serde_json::to_value(&site).unwrap();

        assert_eq!(json["site"]["url"], "https://example.com");
        assert_eq!(json["layout_file"], "default.html");
        assert_eq!(json["pages"][0]["file"], "a.md");
        assert_eq!(json["posts"][0]["layout"], "post");
        assert_eq!(json["tags"]["go"][0]["file"], "a.md");
    }
}
