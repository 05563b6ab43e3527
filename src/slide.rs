use crate::markup::{Element, parse_fragment};
use crate::state::Visibility;
use crate::typography::apply_motion_typography;

pub const CONTENT_CLASS: &str = "slide-content";

/// One presentable unit of the deck.
#[derive(Debug, Clone)]
pub struct Slide {
    index: usize,
    markup: String,
    content: Element,
    glyphs: usize,
    pub visibility: Visibility,
}

impl Slide {
    /// Build a slide from one converted fragment. The fragment is wrapped in
    /// a `div.slide-content` that the scaler measures and scales.
    pub fn new(index: usize, markup: &str) -> Self {
        let mut content = parse_fragment(markup, Element::new("div").with_class(CONTENT_CLASS));
        let glyphs = apply_motion_typography(&mut content);
        Self {
            index,
            markup: markup.to_string(),
            content,
            glyphs,
            visibility: Visibility::Hidden,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The converter fragment this slide was built from.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn content(&self) -> &Element {
        &self.content
    }

    /// Number of animated characters.
    pub fn glyphs(&self) -> usize {
        self.glyphs
    }
}
