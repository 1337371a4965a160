//! Plain-text recovery from HTML notice bodies.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    // Text-bearing elements, visited in this order
    static ref TEXT_ELEMENTS: Vec<Selector> = ["p", "td", "div", "span", "li"]
        .iter()
        .map(|tag| Selector::parse(tag).unwrap())
        .collect();

    static ref HTML_TAG: Regex = Regex::new(
        r"(?i)</?(?:html|body|table|p|td|div|span|li|br)\b[^>]*>"
    ).unwrap();
}

/// Extract the text of the common text-bearing elements of an HTML body.
///
/// Script and style content is ignored. Entities are decoded by the parser
/// and whitespace (including `&nbsp;`) is collapsed. Fragments of
/// `min_length` characters or fewer are skipped. Nested elements yield their
/// text more than once; the notice cleaner removes the repeats.
pub fn strip_html(body: &str, min_length: usize) -> Vec<String> {
    let document = Html::parse_document(body);

    let mut fragments = Vec::new();
    for selector in TEXT_ELEMENTS.iter() {
        for element in document.select(selector) {
            let text = visible_text(element);
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

            if text.chars().count() > min_length {
                fragments.push(text);
            }
        }
    }

    fragments
}

/// Heuristic check for an HTML body.
pub fn looks_like_html(body: &str) -> bool {
    HTML_TAG.is_match(body)
}

fn visible_text(element: ElementRef<'_>) -> String {
    element
        .descendants()
        .filter(|node| {
            !node.ancestors().any(|a| {
                matches!(a.value(), Node::Element(e) if matches!(e.name(), "script" | "style"))
            })
        })
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_html_keeps_long_fragments() {
        let body = r#"<html><head><style>p { color: red; }</style></head>
<body>
<p>Protocolo: 123456789<script>var x = "escondido";</script></p>
<p>Ok</p>
<table><tr><td>Status&nbsp;atual: <b>Concluída</b></td></tr></table>
<li>Benefício &amp; pensão</li>
</body></html>"#;

        assert_eq!(
            strip_html(body, 10),
            vec![
                "Protocolo: 123456789".to_string(),
                "Status atual: Concluída".to_string(),
                "Benefício & pensão".to_string(),
            ]
        );
    }

    #[test]
    fn test_elements_are_visited_by_kind() {
        let body = "<div>Texto da divisão longo</div><p>Parágrafo bem longo aqui</p>";
        let fragments = strip_html(body, 10);
        assert_eq!(fragments[0], "Parágrafo bem longo aqui");
        assert_eq!(fragments[1], "Texto da divisão longo");
    }

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("<p>texto</p>"));
        assert!(looks_like_html("<DIV class=\"x\">texto</DIV>"));
        assert!(!looks_like_html("Protocolo: 123 < 456 > 7"));
        assert!(!looks_like_html("Prezado <cliente>"));
    }
}
