//! HTML parsing and text extraction primitives
//!
//! Thin helpers over `scraper` shared by link discovery and the field
//! extractors:
//! - Parsing a page into a document tree
//! - Compiling ordered selector lists
//! - Whole-page text (for label regexes)
//! - Block text of one element with unwanted subtrees skipped

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Elements whose text never counts as page text
///
/// With scripting enabled html5ever keeps `noscript` content as one raw text
/// node, markup included.
const NON_TEXT_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Parses HTML content into a document tree
///
/// html5ever recovers from any malformed input, so parsing never fails.
///
/// # Example
///
/// ```
/// use policy_crawler::crawler::{page_text, parse_html};
///
/// let document = parse_html("<html><body><p>发布时间：2024-01-01</p></body></html>");
/// assert!(page_text(&document).contains("2024-01-01"));
/// ```
pub fn parse_html(html: &str) -> Html {
    Html::parse_document(html)
}

/// Compiles selector patterns, keeping their order
///
/// Patterns that fail to parse are logged and left out.
pub fn parse_selectors(patterns: &[&str]) -> Vec<Selector> {
    patterns
        .iter()
        .filter_map(|pattern| match Selector::parse(pattern) {
            Ok(selector) => Some(selector),
            Err(e) => {
                tracing::error!(%pattern, error = ?e, "Invalid selector");
                None
            }
        })
        .collect()
}

/// Returns all text of the document concatenated without separators
///
/// Script, style and noscript contents are not text.
pub fn page_text(document: &Html) -> String {
    let mut text = String::new();
    walk_text(document.root_element(), &NON_TEXT_ELEMENTS, &mut |chunk| {
        text.push_str(chunk)
    });
    text
}

/// Returns the text of `element` as newline-joined blocks
///
/// Every text node is trimmed and empty ones are dropped. Subtrees rooted at
/// any tag in `excluded` are skipped entirely, as are script, style and
/// noscript.
pub fn block_text(element: ElementRef<'_>, excluded: &[&str]) -> String {
    let mut blocks: Vec<&str> = Vec::new();
    let mut skip: Vec<&str> = excluded.to_vec();
    skip.extend_from_slice(&NON_TEXT_ELEMENTS);

    walk_text(element, &skip, &mut |chunk| {
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            blocks.push(chunk);
        }
    });

    blocks.join("\n")
}

/// Returns the concatenated text of an element (anchor titles and the like)
pub fn inline_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Visits text nodes under `element` in document order
fn walk_text<'a>(element: ElementRef<'a>, excluded: &[&str], visit: &mut impl FnMut(&'a str)) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => visit(text),
            Node::Element(el) => {
                if excluded.contains(&el.name()) {
                    continue;
                }
                if let Some(child_element) = ElementRef::wrap(child) {
                    walk_text(child_element, excluded, visit);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(document: &'a Html, selector: &str) -> ElementRef<'a> {
        let selector = Selector::parse(selector).unwrap();
        document.select(&selector).next().unwrap()
    }

    #[test]
    fn test_parse_selectors_keeps_order_and_drops_invalid() {
        let selectors = parse_selectors(&["div.content", "[[[", "li a"]);
        assert_eq!(selectors.len(), 2);
    }

    #[test]
    fn test_page_text_skips_script_and_style() {
        let document = parse_html(
            r#"<html><head><title>标题</title><style>p{}</style></head>
            <body><script>var t = "来源：脚本";</script><p>正文</p></body></html>"#,
        );
        let text = page_text(&document);

        assert!(text.contains("标题"));
        assert!(text.contains("正文"));
        assert!(!text.contains("脚本"));
        assert!(!text.contains("p{}"));
    }

    #[test]
    fn test_noscript_markup_is_not_text() {
        let document = parse_html(
            "<html><body><div id='x'><noscript><p>来源：脚本</p></noscript><p>正文</p></div></body></html>",
        );

        assert_eq!(block_text(first(&document, "#x"), &[]), "正文");
        assert!(!page_text(&document).contains("脚本"));
    }

    #[test]
    fn test_block_text_joins_trimmed_blocks() {
        let document = parse_html(
            "<html><body><div id='x'>  第一段 <p>\n 第二段 </p>\n\n<p></p><span>第三段</span></div></body></html>",
        );
        let text = block_text(first(&document, "#x"), &[]);

        assert_eq!(text, "第一段\n第二段\n第三段");
    }

    #[test]
    fn test_block_text_skips_excluded_subtrees() {
        let document = parse_html(
            "<html><body><div id='x'><nav>导航</nav><p>正文</p><footer>页脚</footer></div></body></html>",
        );

        assert_eq!(block_text(first(&document, "#x"), &["nav", "footer"]), "正文");
        assert_eq!(
            block_text(first(&document, "#x"), &[]),
            "导航\n正文\n页脚"
        );
    }

    #[test]
    fn test_inline_text() {
        let document = parse_html("<html><body><a href='1.html'> 关于<b>印发</b>的通知 </a></body></html>");
        assert_eq!(inline_text(first(&document, "a")), " 关于印发的通知 ");
    }
}
