use crate::markup::{Element, Node};

/// Elements whose text gets split into animated characters.
const TARGETS: &[&str] = &["h1", "h2", "p", "li"];

pub const CHAR_CLASS: &str = "char";
pub const CHAR_INDEX_ATTR: &str = "data-index";

/// Split text runs of headings, paragraphs and list items into one
/// `span.char` per visible character. Elements that already hold markup are
/// left intact. Returns the number of characters wrapped.
pub fn apply_motion_typography(content: &mut Element) -> usize {
    let mut next = 0;
    wrap_targets(content, &mut next);
    next
}

fn wrap_targets(element: &mut Element, next: &mut usize) {
    for child in element.children.iter_mut() {
        let Node::Element(child) = child else {
            continue;
        };
        if TARGETS.contains(&child.tag.as_str()) && child.is_text_only() {
            let text = child.text();
            child.children = split_chars(&text, next);
        } else {
            wrap_targets(child, next);
        }
    }
}

/// Whitespace stays as text, every other character becomes its own span.
pub fn split_chars(text: &str, next: &mut usize) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(text.len());
    let mut blank = String::new();
    for c in text.chars() {
        if c.is_whitespace() {
            blank.push(c);
            continue;
        }
        if !blank.is_empty() {
            nodes.push(Node::Text(std::mem::take(&mut blank)));
        }
        let mut span = Element::new("span").with_class(CHAR_CLASS);
        span.attrs.push((CHAR_INDEX_ATTR.to_string(), next.to_string()));
        span.children.push(Node::Text(c.to_string()));
        nodes.push(Node::Element(span));
        *next += 1;
    }
    if !blank.is_empty() {
        nodes.push(Node::Text(blank));
    }
    nodes
}

/// Animation order of a wrapped character, if `element` is one.
pub fn char_index(element: &Element) -> Option<usize> {
    if element.tag != "span" || !element.has_class(CHAR_CLASS) {
        return None;
    }
    element.attr(CHAR_INDEX_ATTR)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_fragment;

    fn content(s: &str) -> Element {
        parse_fragment(s, Element::new("div").with_class("slide-content"))
    }

    #[test]
    fn wraps_plain_heading() {
        let mut root = content("<h1>Hi you</h1>");
        assert_eq!(apply_motion_typography(&mut root), 5);
        assert_eq!(
            root.to_html(),
            concat!(
                r#"<div class="slide-content"><h1>"#,
                r#"<span class="char" data-index="0">H</span><span class="char" data-index="1">i</span>"#,
                " ",
                r#"<span class="char" data-index="2">y</span><span class="char" data-index="3">o</span>"#,
                r#"<span class="char" data-index="4">u</span>"#,
                "</h1></div>"
            )
        );
    }

    #[test]
    fn whitespace_is_preserved_verbatim() {
        let mut n = 0;
        let nodes = split_chars(" a\t b\n", &mut n);
        assert_eq!(n, 2);
        assert_eq!(nodes[0], Node::Text(" ".into()));
        assert_eq!(nodes[2], Node::Text("\t ".into()));
        assert_eq!(nodes[4], Node::Text("\n".into()));
    }

    #[test]
    fn nested_markup_is_not_rewrapped() {
        let mut root = content("<p>plain <strong>bold</strong></p>");
        let before = root.clone();
        assert_eq!(apply_motion_typography(&mut root), 0);
        assert_eq!(root, before);
    }

    #[test]
    fn loose_list_wraps_inner_paragraph_only() {
        let mut root = content("<ul>\n<li>\n<p>ab</p>\n</li>\n</ul>");
        assert_eq!(apply_motion_typography(&mut root), 2);
        let li = root.descendants().into_iter().find(|e| e.tag == "li").unwrap();
        assert!(!li.is_text_only());
        let spans: Vec<_> = root.descendants().into_iter().filter_map(char_index).collect();
        assert_eq!(spans, vec![0, 1]);
    }

    #[test]
    fn other_tags_are_untouched() {
        let mut root = content("<h3>x</h3><pre><code>y</code></pre>");
        assert_eq!(apply_motion_typography(&mut root), 0);
    }

    #[test]
    fn numbering_runs_across_the_whole_slide() {
        let mut root = content("<h2>ab</h2><ul><li>c</li><li>d</li></ul>");
        assert_eq!(apply_motion_typography(&mut root), 4);
        let order: Vec<_> = root.descendants().into_iter().filter_map(char_index).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }
}
