//! The display side of the slideshow.
//!
//! A [`Surface`] holds the visual representation of every slide. The cycler
//! and scaler only talk to it through these operations, so the raylib window
//! and the in-memory surface used by `--check` and the tests are
//! interchangeable.

use crate::constants::{CONTENT_MAX_WIDTH, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::layout::{FixedMetric, Layout, layout};
use crate::slide::Slide;
use crate::state::Visibility;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

pub trait Surface {
    /// Current drawable area.
    fn viewport(&self) -> Size;

    /// Add the visual representation of `slide`, after all previous ones.
    fn append_slide(&mut self, slide: &Slide);

    fn set_visibility(&mut self, index: usize, visibility: Visibility);

    /// Natural (unscaled) size of a slide's content, `None` if there is no
    /// such slide.
    fn measure(&self, index: usize) -> Option<Size>;

    fn set_scale(&mut self, index: usize, scale: f32);

    /// Replace everything on the surface with a single message.
    fn show_error(&mut self, message: &str);
}

#[derive(Debug, Clone)]
struct SlideRecord {
    layout: Layout,
    natural: Option<Size>,
    visibility: Visibility,
    scale: f32,
}

/// Surface without a window. Text is measured with [`FixedMetric`].
#[derive(Debug, Clone)]
pub struct MemorySurface {
    viewport: Size,
    metric: FixedMetric,
    slides: Vec<SlideRecord>,
    error: Option<String>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new(Size::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32))
    }
}

impl MemorySurface {
    pub fn new(viewport: Size) -> Self {
        Self { viewport, metric: FixedMetric::default(), slides: Vec::new(), error: None }
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Pretend a slide measures `size` regardless of its text.
    pub fn set_natural_size(&mut self, index: usize, size: Size) {
        if let Some(record) = self.slides.get_mut(index) {
            record.natural = Some(size);
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn visibility(&self, index: usize) -> Option<Visibility> {
        self.slides.get(index).map(|r| r.visibility)
    }

    pub fn scale(&self, index: usize) -> Option<f32> {
        self.slides.get(index).map(|r| r.scale)
    }

    pub fn layout(&self, index: usize) -> Option<&Layout> {
        self.slides.get(index).map(|r| &r.layout)
    }

    /// Indices of slides currently in `visibility`.
    pub fn in_state(&self, visibility: Visibility) -> Vec<usize> {
        self.slides
            .iter()
            .enumerate()
            .filter(|(_, r)| r.visibility == visibility)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Surface for MemorySurface {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn append_slide(&mut self, slide: &Slide) {
        self.slides.push(SlideRecord {
            layout: layout(slide.content(), &self.metric, CONTENT_MAX_WIDTH),
            natural: None,
            visibility: slide.visibility,
            scale: 1.0,
        });
    }

    fn set_visibility(&mut self, index: usize, visibility: Visibility) {
        if let Some(record) = self.slides.get_mut(index) {
            record.visibility = visibility;
        }
    }

    fn measure(&self, index: usize) -> Option<Size> {
        self.slides.get(index).map(|r| r.natural.unwrap_or(r.layout.size))
    }

    fn set_scale(&mut self, index: usize, scale: f32) {
        if let Some(record) = self.slides.get_mut(index) {
            record.scale = scale;
        }
    }

    fn show_error(&mut self, message: &str) {
        self.slides.clear();
        self.error = Some(message.to_string());
    }
}
