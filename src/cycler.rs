use crate::scaler::fit_to_screen;
use crate::slide::Slide;
use crate::state::Visibility;
use crate::surface::Surface;

/// The deck and which slide is on screen. Length and order never change
/// once built.
#[derive(Debug)]
pub struct Session {
    slides: Vec<Slide>,
    current: usize,
    padding: f32,
}

impl Session {
    pub fn new(slides: Vec<Slide>, padding: f32) -> Self {
        Self { slides, current: 0, padding }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn visibility(&self, index: usize) -> Option<Visibility> {
        self.slides.get(index).map(|s| s.visibility)
    }

    fn set(&mut self, index: usize, visibility: Visibility, surface: &mut dyn Surface) {
        let Some(slide) = self.slides.get_mut(index) else {
            return;
        };
        if slide.visibility != visibility {
            slide.visibility = visibility;
            surface.set_visibility(index, visibility);
        }
    }

    /// Bring `index` in with its enter animation.
    pub fn enter(&mut self, index: usize, surface: &mut dyn Surface) {
        self.set(index, Visibility::Entering, surface);
        self.show_slide(index, surface);
    }

    /// Make `index` the active slide and hide the others, except one that
    /// is still playing its exit animation. Calling it twice is harmless.
    pub fn show_slide(&mut self, index: usize, surface: &mut dyn Surface) {
        if index >= self.slides.len() {
            return;
        }
        for i in 0..self.slides.len() {
            if i == index {
                self.set(i, Visibility::Active, surface);
            } else if self.slides[i].visibility != Visibility::Exiting {
                self.set(i, Visibility::Hidden, surface);
            }
        }
        self.current = index;
        fit_to_screen(surface, index, self.padding);
    }

    /// Move to the next slide, wrapping around. Returns the slide that
    /// started exiting, for the caller to clear once its animation is over.
    ///
    /// A one-slide deck has nowhere to go: the slide stays active without
    /// replaying any animation and is only re-fitted.
    pub fn advance(&mut self, surface: &mut dyn Surface) -> Option<usize> {
        if self.slides.is_empty() {
            return None;
        }
        let prev = self.current;
        let next = (prev + 1) % self.slides.len();
        if next == prev {
            self.show_slide(next, surface);
            return None;
        }
        // At most one slide is ever exiting
        for i in 0..self.slides.len() {
            if i != next && self.slides[i].visibility == Visibility::Exiting {
                self.set(i, Visibility::Hidden, surface);
            }
        }
        self.set(prev, Visibility::Exiting, surface);
        self.enter(next, surface);
        tracing::debug!(from = prev, to = next, "advance");
        Some(prev)
    }

    /// End of an exit animation. A slide that has become active again in
    /// the meantime is left alone.
    pub fn clear_exit(&mut self, index: usize, surface: &mut dyn Surface) {
        if self.visibility(index) == Some(Visibility::Exiting) {
            self.set(index, Visibility::Hidden, surface);
        }
    }

    /// Fit the current slide again, e.g. after the viewport changed.
    pub fn refit(&self, surface: &mut dyn Surface) {
        if !self.slides.is_empty() {
            fit_to_screen(surface, self.current, self.padding);
        }
    }
}
