//! Boilerplate stripping and content-tag text extraction.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Containers whose text never reaches the corpus.
const STRIP_TAGS: [&str; 7] = [
    "script", "style", "header", "footer", "nav", "aside", "form",
];

static MAIN_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("main").expect("static selector"));
static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("static selector"));
static CONTENT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4, p, li, table").expect("static selector"));

/// Extracts readable text from a page.
///
/// The extraction roots at `<main>`, falling back to `<body>`; collects
/// heading, paragraph, list and table text in document order; and drops
/// anything inside the stripped containers. Element texts are joined with
/// newlines, text nodes within an element with single spaces.
pub fn extract_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let root = doc
        .select(&MAIN_SELECTOR)
        .next()
        .or_else(|| doc.select(&BODY_SELECTOR).next());
    let Some(root) = root else {
        return String::new();
    };

    let mut parts = Vec::new();
    for element in root.select(&CONTENT_SELECTOR) {
        if in_stripped_container(&element) {
            continue;
        }
        let text = element_text(&element);
        if !text.is_empty() {
            parts.push(text);
        }
    }
    parts.join("\n")
}

fn in_stripped_container(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| STRIP_TAGS.contains(&ancestor.value().name()))
}

fn element_text(element: &ElementRef) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        // Skip text inside e.g. an inline <script> nested in a paragraph
        let blocked = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| STRIP_TAGS.contains(&ancestor.value().name()));
        if blocked {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::extract_text;

    #[test]
    fn prefers_main_and_keeps_document_order() {
        let html = r#"
            <html><body>
              <nav><p>Navigation junk</p></nav>
              <main>
                <h1>Home Loan</h1>
                <p>Attractive interest rates.</p>
                <ul><li>No hidden charges</li></ul>
              </main>
              <footer><p>Footer junk</p></footer>
            </body></html>"#;
        let text = extract_text(html);
        assert_eq!(
            text,
            "Home Loan\nAttractive interest rates.\nNo hidden charges"
        );
    }

    #[test]
    fn falls_back_to_body_without_main() {
        let html = "<html><body><p>Plain body content.</p></body></html>";
        assert_eq!(extract_text(html), "Plain body content.");
    }

    #[test]
    fn strips_script_style_and_form_subtrees() {
        let html = r#"
            <html><body>
              <script>var x = 1;</script>
              <style>p { color: red }</style>
              <form><p>Apply now</p></form>
              <p>Eligibility criteria apply.</p>
            </body></html>"#;
        let text = extract_text(html);
        assert_eq!(text, "Eligibility criteria apply.");
    }

    #[test]
    fn inline_script_text_is_dropped() {
        let html = "<html><body><p>Before <script>alert(1)</script> after.</p></body></html>";
        assert_eq!(extract_text(html), "Before after.");
    }

    #[test]
    fn empty_page_yields_empty_string() {
        assert_eq!(extract_text("<html><body></body></html>"), "");
    }
}
