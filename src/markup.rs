//! Owned element tree built from converter markup.
//!
//! Only what a slide needs: tags, attributes, text. The parser is forgiving
//! about the HTML-isms markdown lets through (void tags without a slash,
//! stray end tags) since raw HTML is legal inside a markdown document.

use std::borrow::Cow;

use quick_xml::escape::{escape, resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "wbr", "meta", "link", "source"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), attrs: Vec::new(), children: Vec::new() }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.attrs.push(("class".to_string(), class.to_string()));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class").is_some_and(|v| v.split_whitespace().any(|c| c == class))
    }

    /// True when no child is an element.
    pub fn is_text_only(&self) -> bool {
        self.children.iter().all(|c| matches!(c, Node::Text(_)))
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of every descendant.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Every descendant element (self excluded) in document order.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack: Vec<&Element> = self.element_children().collect();
        stack.reverse();
        while let Some(e) = stack.pop() {
            out.push(e);
            let mut kids: Vec<&Element> = e.element_children().collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (k, v) in &self.attrs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            out.push_str(&escape(v.as_str()));
            out.push('"');
        }
        if is_void(&self.tag) {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&escape(t.as_str())),
                Node::Element(e) => e.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Parse a markup fragment into the children of `root`.
///
/// Never fails: markup the reader cannot make sense of is kept as text,
/// the way a browser shows it.
pub fn parse_fragment(fragment: &str, root: Element) -> Element {
    let source = prepare(fragment);
    let mut reader = Reader::from_str(&source);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    // stack[0] is the root; the rest are open elements
    let mut stack = vec![root];

    loop {
        let before = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let element = open_element(&start);
                if is_void(&element.tag) {
                    push_node(&mut stack, Node::Element(element));
                } else {
                    stack.push(element);
                }
            }
            Ok(Event::Empty(start)) => {
                let element = open_element(&start);
                push_node(&mut stack, Node::Element(element));
            }
            Ok(Event::End(end)) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase();
                close_element(&mut stack, &name);
            }
            Ok(Event::Text(text)) => {
                let text = match text.decode() {
                    Ok(text) => text.into_owned(),
                    Err(_) => String::from_utf8_lossy(&text).into_owned(),
                };
                push_text(&mut stack, &text);
            }
            Ok(Event::CData(data)) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                push_text(&mut stack, &text);
            }
            Ok(Event::GeneralRef(reference)) => {
                let name = String::from_utf8_lossy(&reference).into_owned();
                push_text(&mut stack, &resolve_reference(&name));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // comments, doctype, processing instructions
            Err(e) => {
                // Whatever is left is shown as written
                tracing::debug!(at = before, error = %e, "markup kept as text");
                if let Some(rest) = source.get(before..) {
                    push_text(&mut stack, rest);
                }
                break;
            }
        }
    }

    // Unclosed elements are closed at the end of the fragment
    while stack.len() > 1 {
        if let Some(open) = stack.pop() {
            push_node(&mut stack, Node::Element(open));
        }
    }
    stack.pop().unwrap_or_else(|| Element::new("div"))
}

/// Escape ampersands that don't start a character reference and drop an
/// unterminated comment together with everything after it.
fn prepare(fragment: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(fragment);

    let mut pos = 0;
    while let Some(open) = out[pos..].find("<!--").map(|i| pos + i) {
        match out[open + 4..].find("-->") {
            Some(close) => pos = open + 4 + close + 3,
            None => {
                out.to_mut().truncate(open);
                break;
            }
        }
    }

    let bare: Vec<usize> = out
        .match_indices('&')
        .map(|(i, _)| i)
        .filter(|&i| !starts_reference(&out[i + 1..]))
        .collect();
    if !bare.is_empty() {
        let mut escaped = String::with_capacity(out.len() + bare.len() * 4);
        let mut last = 0;
        for i in bare {
            escaped.push_str(&out[last..i]);
            escaped.push_str("&amp;");
            last = i + 1;
        }
        escaped.push_str(&out[last..]);
        out = Cow::Owned(escaped);
    }
    out
}

/// `#123;`, `#x7f;` or `name;` right after an ampersand.
fn starts_reference(after: &str) -> bool {
    let Some(end) = after.find(';') else {
        return false;
    };
    let body = &after[..end];
    if let Some(num) = body.strip_prefix('#') {
        match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()),
        }
    } else {
        body.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && body.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

fn open_element(start: &BytesStart<'_>) -> Element {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let mut element = Element::new(tag);
    // Attributes the reader rejects are dropped, the element is kept
    for attr in start.html_attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value).into_owned();
        let value = match unescape(&raw) {
            Ok(Cow::Owned(v)) => v,
            _ => raw,
        };
        element.attrs.push((key, value));
    }
    element
}

fn close_element(stack: &mut Vec<Element>, name: &str) {
    // Ignore end tags nothing opened
    let Some(depth) = stack.iter().skip(1).rposition(|e| e.tag == name) else {
        return;
    };
    let depth = depth + 1;
    while stack.len() > depth {
        if let Some(open) = stack.pop() {
            push_node(stack, Node::Element(open));
        }
    }
}

fn push_node(stack: &mut [Element], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn push_text(stack: &mut [Element], text: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    // Merge with a preceding text node so references don't split runs
    if let Some(Node::Text(prev)) = parent.children.last_mut() {
        prev.push_str(text);
    } else {
        parent.children.push(Node::Text(text.to_string()));
    }
}

fn resolve_reference(name: &str) -> String {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => num.parse::<u32>().ok(),
        };
        if let Some(c) = code.and_then(char::from_u32) {
            return c.to_string();
        }
    } else if let Some(s) = resolve_predefined_entity(name) {
        return s.to_string();
    } else if let Some(c) = named_entity(name) {
        return c.to_string();
    }
    format!("&{name};")
}

/// The few HTML entities that show up in hand-written slides.
fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "nbsp" => '\u{a0}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "hellip" => '\u{2026}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        _ => return None,
    })
}
