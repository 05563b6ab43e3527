//! Text layout of a slide's element tree.
//!
//! Blocks (headings, paragraphs, list items, code blocks, table rows) stack
//! vertically; inline runs flow left to right and wrap greedily at word
//! boundaries. Coordinates are in content space, origin top-left, scale 1.

use crate::markup::{Element, Node};
use crate::surface::Size;
use crate::typography::char_index;

const LINE_HEIGHT: f32 = 1.3; // Line advance as a multiple of the font size
const BLOCK_GAP: f32 = 0.5;   // Space after a block as a multiple of its font size
const INDENT: f32 = 40.0;     // Per list / quote nesting level

/// Width of a run of text at a given font size.
pub trait TextMeasure {
    fn width(&self, text: &str, size: f32) -> f32;
}

/// Every character advances by `advance * size`. Stands in for a real font
/// wherever no window exists.
#[derive(Debug, Clone, Copy)]
pub struct FixedMetric {
    pub advance: f32,
}

impl Default for FixedMetric {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl TextMeasure for FixedMetric {
    fn width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.advance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Body,
    Heading,
    Strong,
    Emphasis,
    Code,
    Link,
    Quote,
    Marker,
}

/// A run of text placed in content space.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub tone: Tone,
    pub glyph: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub pieces: Vec<Piece>,
    pub size: Size,
    pub glyphs: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Align {
    Left,
    Center,
}

#[derive(Debug)]
enum Atom {
    Word { text: String, tone: Tone, glyph: Option<usize> },
    Space,
    Break,
}

#[derive(Debug)]
struct Block {
    size: f32,
    tone: Tone,
    indent: f32,
    align: Align,
    marker: Option<String>,
    pre: bool,
    atoms: Vec<Atom>,
}

struct List {
    ordered: bool,
    next: u32,
}

struct Line {
    width: f32,
    align: Align,
    pieces: Vec<Piece>,
}

pub fn layout(content: &Element, measure: &dyn TextMeasure, max_width: f32) -> Layout {
    let mut builder = Builder {
        blocks: Vec::new(),
        current: None,
        lists: Vec::new(),
        indent: 0.0,
        inline: None,
        quote: false,
    };
    builder.children(content);
    builder.flush();
    place(&builder.blocks, measure, max_width)
}

struct Builder {
    blocks: Vec<Block>,
    current: Option<Block>,
    lists: Vec<List>,
    indent: f32,
    inline: Option<Tone>,
    quote: bool,
}

impl Builder {
    fn children(&mut self, element: &Element) {
        for child in &element.children {
            match child {
                Node::Element(e) => self.element(e),
                Node::Text(t) => self.text(t),
            }
        }
    }

    fn element(&mut self, e: &Element) {
        if let Some(glyph) = char_index(e) {
            self.word(e.text(), Some(glyph));
            return;
        }
        match e.tag.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" | "li" | "pre" | "tr" | "dt" | "dd"
            | "figcaption" => self.block(e),
            "ul" | "ol" => {
                let next = e.attr("start").and_then(|s| s.parse().ok()).unwrap_or(1);
                self.flush();
                self.lists.push(List { ordered: e.tag == "ol", next });
                self.indent += INDENT;
                self.children(e);
                self.indent -= INDENT;
                self.lists.pop();
            }
            "blockquote" => {
                self.flush();
                let quote = std::mem::replace(&mut self.quote, true);
                self.indent += INDENT;
                self.children(e);
                self.flush();
                self.indent -= INDENT;
                self.quote = quote;
            }
            "br" => self.atom(Atom::Break),
            "img" => {
                let alt = e.attr("alt").unwrap_or("image");
                self.word(format!("[{alt}]"), None);
            }
            "input" => {
                let mark = if e.attr("checked").is_some() { "[x]" } else { "[ ]" };
                self.word(mark.to_string(), None);
                self.atom(Atom::Space);
            }
            "td" | "th" => {
                self.inline(e, if e.tag == "th" { Tone::Strong } else { Tone::Body });
                self.atom(Atom::Space);
                self.atom(Atom::Space);
            }
            "strong" | "b" => self.inline(e, Tone::Strong),
            "em" | "i" => self.inline(e, Tone::Emphasis),
            "code" | "kbd" => self.inline(e, Tone::Code),
            "a" => self.inline(e, Tone::Link),
            "del" | "s" => self.inline(e, Tone::Quote),
            "hr" | "script" | "style" => {}
            _ => self.children(e),
        }
    }

    fn block(&mut self, e: &Element) {
        self.flush();
        let (size, tone, align) = match e.tag.as_str() {
            "h1" => (64.0, Tone::Heading, Align::Center),
            "h2" => (48.0, Tone::Heading, Align::Center),
            "h3" => (38.0, Tone::Heading, Align::Center),
            "h4" | "h5" | "h6" => (32.0, Tone::Heading, Align::Center),
            "pre" => (24.0, Tone::Code, Align::Left),
            "li" | "tr" | "dt" | "dd" => (30.0, Tone::Body, Align::Left),
            _ => (30.0, Tone::Body, Align::Center),
        };
        let marker = if e.tag == "li" { self.next_marker() } else { None };
        let tone = if self.quote && tone == Tone::Body { Tone::Quote } else { tone };
        let align = if self.quote { Align::Left } else { align };
        self.current = Some(Block {
            size,
            tone,
            indent: self.indent,
            align,
            marker,
            pre: e.tag == "pre",
            atoms: Vec::new(),
        });
        self.children(e);
        self.flush();
    }

    fn next_marker(&mut self) -> Option<String> {
        let list = self.lists.last_mut()?;
        if list.ordered {
            let marker = format!("{}. ", list.next);
            list.next += 1;
            Some(marker)
        } else {
            Some("- ".to_string())
        }
    }

    fn inline(&mut self, e: &Element, tone: Tone) {
        let outer = self.inline.replace(tone);
        self.children(e);
        self.inline = outer;
    }

    fn text(&mut self, text: &str) {
        if self.current.as_ref().is_some_and(|b| b.pre) {
            for (i, line) in text.split('\n').enumerate() {
                if i > 0 {
                    self.atom(Atom::Break);
                }
                if !line.is_empty() {
                    self.word(line.to_string(), None);
                }
            }
            return;
        }
        if self.current.is_none() && text.trim().is_empty() {
            return;
        }
        let mut word = String::new();
        for c in text.chars() {
            if c.is_whitespace() {
                if !word.is_empty() {
                    self.word(std::mem::take(&mut word), None);
                }
                self.atom(Atom::Space);
            } else {
                word.push(c);
            }
        }
        if !word.is_empty() {
            self.word(word, None);
        }
    }

    fn word(&mut self, text: String, glyph: Option<usize>) {
        let tone = self.inline;
        let block = self.open();
        let tone = tone.unwrap_or(block.tone);
        block.atoms.push(Atom::Word { text, tone, glyph });
    }

    fn atom(&mut self, atom: Atom) {
        if let Some(block) = self.current.as_mut() {
            block.atoms.push(atom);
        }
    }

    /// Current block, opening an anonymous paragraph for loose inline content.
    fn open(&mut self) -> &mut Block {
        let indent = self.indent;
        let quote = self.quote;
        self.current.get_or_insert_with(|| Block {
            size: 30.0,
            tone: if quote { Tone::Quote } else { Tone::Body },
            indent,
            align: if quote { Align::Left } else { Align::Center },
            marker: None,
            pre: false,
            atoms: Vec::new(),
        })
    }

    fn flush(&mut self) {
        if let Some(block) = self.current.take() {
            if block.atoms.iter().any(|a| matches!(a, Atom::Word { .. })) {
                self.blocks.push(block);
            }
        }
    }
}

// --- Line breaking and placement ---
fn place(blocks: &[Block], measure: &dyn TextMeasure, max_width: f32) -> Layout {
    let mut lines: Vec<Line> = Vec::new();
    let mut y = 0.0;
    let mut bottom = 0.0;
    let mut glyphs = 0;

    for block in blocks {
        let size = block.size;
        let line_h = size * LINE_HEIGHT;
        let space_w = measure.width(" ", size);
        let marker_w = block.marker.as_deref().map_or(0.0, |m| measure.width(m, size));
        let left = block.indent + marker_w;
        let avail = (max_width - left).max(size);

        let mut line: Vec<Piece> = Vec::new();
        let mut x = 0.0;
        let mut pending_space = false;
        let mut first_line = true;

        let mut emit = |line: &mut Vec<Piece>, x: &mut f32, y: &mut f32, first: &mut bool| {
            if *first {
                if let Some(marker) = &block.marker {
                    line.insert(0, Piece {
                        text: marker.clone(),
                        x: block.indent,
                        y: 0.0,
                        size,
                        tone: Tone::Marker,
                        glyph: None,
                    });
                }
                *first = false;
            }
            for piece in line.iter_mut() {
                piece.y = *y;
            }
            lines.push(Line { width: left + *x, align: block.align, pieces: std::mem::take(line) });
            *y += line_h;
            *x = 0.0;
        };

        let mut i = 0;
        while i < block.atoms.len() {
            match &block.atoms[i] {
                Atom::Space => {
                    pending_space = !line.is_empty();
                    i += 1;
                }
                Atom::Break => {
                    emit(&mut line, &mut x, &mut y, &mut first_line);
                    pending_space = false;
                    i += 1;
                }
                Atom::Word { .. } => {
                    // A word is every adjacent Word atom up to the next space or break
                    let start = i;
                    while i < block.atoms.len() && matches!(block.atoms[i], Atom::Word { .. }) {
                        i += 1;
                    }
                    let parts: Vec<(&str, Tone, Option<usize>, f32)> = block.atoms[start..i]
                        .iter()
                        .filter_map(|a| match a {
                            Atom::Word { text, tone, glyph } => {
                                Some((text.as_str(), *tone, *glyph, measure.width(text, size)))
                            }
                            _ => None,
                        })
                        .collect();
                    let word_w: f32 = parts.iter().map(|p| p.3).sum();
                    let mut gap = if pending_space { space_w } else { 0.0 };
                    if !line.is_empty() && x + gap + word_w > avail {
                        emit(&mut line, &mut x, &mut y, &mut first_line);
                        gap = 0.0;
                    }
                    x += gap;
                    for (text, tone, glyph, w) in parts {
                        if let Some(g) = glyph {
                            glyphs = glyphs.max(g + 1);
                        }
                        line.push(Piece { text: text.to_string(), x: left + x, y: 0.0, size, tone, glyph });
                        x += w;
                    }
                    pending_space = false;
                }
            }
        }
        if !line.is_empty() {
            emit(&mut line, &mut x, &mut y, &mut first_line);
        }

        bottom = y;
        y += size * BLOCK_GAP;
    }

    let height = bottom;
    let width = lines.iter().map(|l| l.width).fold(0.0, f32::max);

    let mut pieces = Vec::new();
    for line in lines {
        let shift = match line.align {
            Align::Center => (width - line.width) / 2.0,
            Align::Left => 0.0,
        };
        pieces.extend(line.pieces.into_iter().map(|mut p| {
            p.x += shift;
            p
        }));
    }

    Layout { pieces, size: Size::new(width, height), glyphs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::Slide;

    fn lay(markup: &str, max_width: f32) -> Layout {
        let slide = Slide::new(0, markup);
        layout(slide.content(), &FixedMetric::default(), max_width)
    }

    #[test]
    fn heading_natural_size() {
        let l = lay("<h1>AB</h1>", 1600.0);
        assert_eq!(l.size, Size::new(64.0, 64.0 * LINE_HEIGHT));
        assert_eq!(l.glyphs, 2);
        assert_eq!(l.pieces.len(), 2);
        assert_eq!(l.pieces[1].x, 32.0);
    }

    #[test]
    fn blocks_stack_with_gap() {
        let l = lay("<h1>A</h1>\n<p>B</p>", 1600.0);
        let expected = 64.0 * LINE_HEIGHT + 64.0 * BLOCK_GAP + 30.0 * LINE_HEIGHT;
        assert!((l.size.height - expected).abs() < 1e-3);
        // narrower paragraph is centered under the heading
        let b = l.pieces.iter().find(|p| p.text == "B").unwrap();
        assert!((b.x - (32.0 - 15.0) / 2.0).abs() < 1e-3);
    }

    #[test]
    fn long_paragraph_wraps_at_max_width() {
        // each word is 4 chars * 15 = 60 wide, space 15
        let l = lay("<p>aaaa bbbb cccc dddd</p>", 140.0);
        let rows: std::collections::BTreeSet<i64> = l.pieces.iter().map(|p| p.y as i64).collect();
        assert_eq!(rows.len(), 2);
        assert!(l.size.width <= 140.0);
    }

    #[test]
    fn overlong_word_overflows_instead_of_splitting() {
        let l = lay("<p>abcdefghij</p>", 60.0);
        assert_eq!(l.size.width, 150.0);
    }

    #[test]
    fn list_items_get_markers_and_indent() {
        let l = lay("<ol start=\"3\">\n<li>x</li>\n<li>y</li>\n</ol>", 1600.0);
        let markers: Vec<_> = l.pieces.iter().filter(|p| p.tone == Tone::Marker).map(|p| p.text.as_str()).collect();
        assert_eq!(markers, ["3. ", "4. "]);
        let x = l.pieces.iter().find(|p| p.text == "x").unwrap();
        assert_eq!(x.x, INDENT + 45.0);
    }

    #[test]
    fn code_block_keeps_lines() {
        let l = lay("<pre><code>fn a() {}\n\nb\n</code></pre>", 1600.0);
        let rows: Vec<f32> = l.pieces.iter().map(|p| p.y).collect();
        assert_eq!(rows.len(), 2);
        assert!((rows[1] - 2.0 * 24.0 * LINE_HEIGHT).abs() < 1e-3);
        assert!(l.pieces.iter().all(|p| p.tone == Tone::Code));
    }

    #[test]
    fn inline_markup_takes_its_tone() {
        let l = lay("<p>plain <strong>bold</strong> <code>c</code></p>", 1600.0);
        let tone = |t: &str| l.pieces.iter().find(|p| p.text == t).unwrap().tone;
        assert_eq!(tone("plain"), Tone::Body);
        assert_eq!(tone("bold"), Tone::Strong);
        assert_eq!(tone("c"), Tone::Code);
    }

    #[test]
    fn empty_content_has_zero_size() {
        let l = layout(&Element::new("div"), &FixedMetric::default(), 1600.0);
        assert_eq!(l.size, Size::default());
        assert!(l.pieces.is_empty());
    }
}
