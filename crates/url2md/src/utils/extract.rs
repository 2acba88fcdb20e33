use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Elements that are structurally never content.
static STRIP_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script, style, nav, header, footer").expect("STRIP_SELECTOR should compile")
});

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("TITLE_SELECTOR should compile"));

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("BODY_SELECTOR should compile"));

/// Candidate content roots, tried in order, first match wins.
static CONTENT_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        "main",
        "article",
        r#"[role="main"]"#,
        ".main-content",
        "#main-content",
        ".content",
        "#content",
    ]
    .iter()
    .map(|raw| Selector::parse(raw).expect("content selector should compile"))
    .collect()
});

/// The region of a page selected for Markdown conversion.
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    pub title: String,
    /// Outer HTML of the selected content root.
    pub content_html: String,
    /// Plain text of the same region, for the renderer's fallback path.
    pub content_text: String,
}

/// Strip non-content chrome, then pick the best content root and the title.
pub fn extract_page(html: &str) -> ExtractedPage {
    let mut document = Html::parse_document(html);
    strip_chrome(&mut document);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "Untitled".to_string());

    let (content_html, content_text) = match find_content_root(&document) {
        Some(element) => (element.html(), element_text(element)),
        // parse_document synthesizes <body> even for fragments, so this
        // branch only fires on pathological input; fall back to everything.
        None => (
            document.root_element().html(),
            element_text(document.root_element()),
        ),
    };

    ExtractedPage {
        title,
        content_html,
        content_text,
    }
}

/// Detach script/style/nav/header/footer subtrees before extraction.
fn strip_chrome(document: &mut Html) {
    let doomed: Vec<_> = document
        .select(&STRIP_SELECTOR)
        .map(|element| element.id())
        .collect();

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn find_content_root(document: &Html) -> Option<ElementRef<'_>> {
    for selector in CONTENT_SELECTORS.iter() {
        if let Some(found) = document.select(selector).next() {
            return Some(found);
        }
    }
    document.select(&BODY_SELECTOR).next()
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that the semantic main tag wins over later candidates
    #[test]
    fn test_prefers_main_tag() {
        let html = "<html><body><article><p>Article</p></article>\
                    <main><p>Main</p></main></body></html>";
        let page = extract_page(html);
        assert!(page.content_html.contains("Main"));
        assert!(!page.content_html.contains("Article"));
    }

    /// Test that article is used when no main tag exists
    #[test]
    fn test_falls_back_to_article() {
        let html = "<html><body><div class=\"content\"><p>Div</p></div>\
                    <article><p>Article</p></article></body></html>";
        let page = extract_page(html);
        assert!(page.content_html.contains("Article"));
        assert!(!page.content_html.contains("Div"));
    }

    /// Test the ARIA role and class/id candidates
    #[test]
    fn test_selector_cascade_order() {
        let role = extract_page("<html><body><div role=\"main\"><p>Role</p></div></body></html>");
        assert!(role.content_html.contains("Role"));

        let class =
            extract_page("<html><body><div class=\"main-content\"><p>C</p></div></body></html>");
        assert!(class.content_html.contains("<p>C</p>"));

        let id = extract_page("<html><body><div id=\"content\"><p>I</p></div></body></html>");
        assert!(id.content_html.contains("<p>I</p>"));
    }

    /// Test that body is the fallback when no candidate matches
    #[test]
    fn test_falls_back_to_body() {
        let page = extract_page("<html><body><p>Loose text</p></body></html>");
        assert!(page.content_html.starts_with("<body>"));
        assert!(page.content_html.contains("Loose text"));
    }

    /// Test that chrome elements are removed before selection
    #[test]
    fn test_strips_chrome_subtrees() {
        let html = "<html><body>\
                    <header><h1>Site banner</h1></header>\
                    <nav><a href=\"/\">Home</a></nav>\
                    <script>var x = 1;</script>\
                    <style>p { color: red }</style>\
                    <main><p>Kept</p></main>\
                    <footer>Legal</footer></body></html>";
        let page = extract_page(html);
        assert!(page.content_html.contains("Kept"));

        let body = extract_page(html.replace("<main><p>Kept</p></main>", "<p>Kept</p>").as_str());
        assert!(body.content_html.contains("Kept"));
        assert!(!body.content_html.contains("Site banner"));
        assert!(!body.content_html.contains("Home"));
        assert!(!body.content_html.contains("var x"));
        assert!(!body.content_html.contains("color: red"));
        assert!(!body.content_html.contains("Legal"));
    }

    /// Test title extraction and the Untitled placeholder
    #[test]
    fn test_title_extraction() {
        let titled =
            extract_page("<html><head><title> Example </title></head><body></body></html>");
        assert_eq!(titled.title, "Example");

        let untitled = extract_page("<html><body><p>x</p></body></html>");
        assert_eq!(untitled.title, "Untitled");

        let empty = extract_page("<html><head><title>   </title></head><body></body></html>");
        assert_eq!(empty.title, "Untitled");
    }

    /// Test that the plain-text mirror of the region is whitespace-normalized
    #[test]
    fn test_content_text() {
        let page =
            extract_page("<html><body><main><p>Hello</p>\n  <p>world</p></main></body></html>");
        assert_eq!(page.content_text, "Hello world");
    }
}
