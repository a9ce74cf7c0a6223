use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

/// Elements whose text never renders as page content.
const NON_CONTENT_TAGS: [&str; 3] = ["script", "style", "template"];

/// Reduces element markup to its visible text: elements with
/// `type="hidden"` are dropped with their subtrees, remaining text nodes are
/// joined by single spaces and runs of whitespace collapse to one space.
pub fn normalize_html(markup: &str) -> String {
    let mut text = String::new();
    collect_fragment(markup, &mut text);
    text
}

fn collect_fragment(markup: &str, out: &mut String) {
    let fragment = Html::parse_fragment(markup);
    collect_words(fragment.tree.root(), out);
}

fn collect_words(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => push_words(text, out),
        Node::Element(element) => {
            if element.attr("type") == Some("hidden")
                || NON_CONTENT_TAGS.contains(&element.name())
            {
                return;
            }
            let noscript = element.name() == "noscript";
            for child in node.children() {
                match child.value() {
                    // html5ever keeps noscript content as one raw text node,
                    // escaped again when serialized; decode it, then parse
                    // the markup it holds so only its text counts.
                    Node::Text(raw) if noscript => collect_fragment(&decoded_text(raw), out),
                    _ => collect_words(child, out),
                }
            }
        }
        Node::Document | Node::Fragment => {
            for child in node.children() {
                collect_words(child, out);
            }
        }
        _ => {}
    }
}

/// Text nodes of `markup` with character references decoded.
fn decoded_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let texts: Vec<&str> = fragment.root_element().text().collect();
    texts.join(" ")
}

fn push_words(text: &str, out: &mut String) {
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
}
