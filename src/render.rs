use raylib::prelude::*;

use crate::background::{Background, Hsla};
use crate::config::Timing;
use crate::constants::*;
use crate::layout::{Layout, TextMeasure, Tone, layout};
use crate::slide::Slide;
use crate::state::Visibility;
use crate::surface::{Size, Surface};

const BACKDROP: Color = Color::new(12, 10, 28, 255);
const ENTER_RISE: f32 = 40.0;  // Pixels an entering slide travels up
const EXIT_LIFT: f32 = -40.0;  // Pixels an exiting slide drifts up
const GLYPH_DROP: f32 = 18.0;  // Pixels a character falls into place
const MIN_TWEEN: f32 = 1e-3;   // Zero-length animations still need a duration

// --- Text metrics from the raylib font ---
struct FontMetric<'a>(&'a WeakFont);

impl TextMeasure for FontMetric<'_> {
    fn width(&self, text: &str, size: f32) -> f32 {
        self.0.measure_text(text, size, spacing(size)).x
    }
}

fn spacing(size: f32) -> f32 {
    // Same ratio raylib's draw_text uses for the default font
    size / 10.0
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Body => Color::new(232, 232, 244, 255),
        Tone::Heading => Color::WHITE,
        Tone::Strong => Color::new(255, 214, 102, 255),
        Tone::Emphasis => Color::new(170, 200, 255, 255),
        Tone::Code => Color::new(140, 240, 190, 255),
        Tone::Link => Color::new(110, 190, 255, 255),
        Tone::Quote => Color::new(170, 170, 190, 255),
        Tone::Marker => Color::new(255, 120, 180, 255),
    }
}

fn light_color(color: Hsla, opacity: f32) -> Color {
    let [r, g, b, a] = color.to_rgba();
    Color::new(r, g, b, (a as f32 * opacity) as u8)
}

struct SlideView {
    layout: Layout,
    visibility: Visibility,
    scale: f32,
    clock: f32,
    opacity: f32,
    offset: f32,
    tween_fade: ease::Tween,
    tween_move: ease::Tween,
}

impl SlideView {
    fn new(layout: Layout) -> Self {
        Self {
            layout,
            visibility: Visibility::Hidden,
            scale: 1.0,
            clock: 0.0,
            opacity: 0.0,
            offset: 0.0,
            tween_fade: ease::Tween::new(ease::linear_none, 0.0, 0.0, 1.0),
            tween_move: ease::Tween::new(ease::linear_none, 0.0, 0.0, 1.0),
        }
    }

    fn start_enter(&mut self, timing: &Timing) {
        self.clock = 0.0;
        self.opacity = 0.0;
        self.offset = ENTER_RISE;
        let duration = timing.enter.max(MIN_TWEEN);
        self.tween_fade = ease::Tween::new(ease::cubic_out, 0.0, 1.0, duration);
        self.tween_move = ease::Tween::new(ease::cubic_out, ENTER_RISE, 0.0, duration);
    }

    fn start_exit(&mut self, timing: &Timing) {
        let duration = timing.exit.max(MIN_TWEEN);
        self.tween_fade = ease::Tween::new(ease::cubic_in, self.opacity, 0.0, duration);
        self.tween_move = ease::Tween::new(ease::cubic_in, self.offset, EXIT_LIFT, duration);
    }

    fn update(&mut self, dt: f32) {
        if !self.visibility.is_visible() {
            return;
        }
        self.clock += dt;
        self.opacity = self.tween_fade.apply(dt);
        self.offset = self.tween_move.apply(dt);
    }

    /// 0..1 reveal of character `glyph`, staggered by its position.
    fn glyph_progress(&self, glyph: usize) -> f32 {
        let t = ((self.clock - glyph as f32 * GLYPH_STAGGER) / GLYPH_DURATION).clamp(0.0, 1.0);
        ease::cubic_out(t, 0.0, 1.0, 1.0)
    }

    fn draw(&self, d: &mut RaylibDrawHandle, font: &WeakFont, viewport: Size) {
        let size = self.layout.size;
        let camera = Camera2D {
            offset: Vector2::new(viewport.width * 0.5, viewport.height * 0.5 + self.offset),
            target: Vector2::new(size.width * 0.5, size.height * 0.5),
            rotation: 0.0,
            zoom: self.scale,
        };
        let mut m = d.begin_mode2D(camera);
        for piece in &self.layout.pieces {
            let (reveal, drop) = match piece.glyph {
                Some(g) => {
                    let p = self.glyph_progress(g);
                    (p, (1.0 - p) * GLYPH_DROP)
                }
                None => (1.0, 0.0),
            };
            let alpha = (self.opacity * reveal).clamp(0.0, 1.0);
            if alpha <= 0.0 {
                continue;
            }
            m.draw_text_ex(
                font,
                &piece.text,
                Vector2::new(piece.x, piece.y - drop),
                piece.size,
                spacing(piece.size),
                tone_color(piece.tone).fade(alpha),
            );
        }
    }
}

/// The raylib window as a slide surface.
pub struct RaylibSurface {
    font: WeakFont,
    viewport: Size,
    timing: Timing,
    slides: Vec<SlideView>,
    error: Option<String>,
    background: Option<Background>,
}

impl RaylibSurface {
    pub fn new(rl: &RaylibHandle, timing: Timing, background: bool) -> Self {
        Self {
            font: rl.get_font_default(),
            viewport: Size::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32),
            timing,
            slides: Vec::new(),
            error: None,
            background: background.then(|| Background::new(LIGHT_COUNT)),
        }
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(background) = self.background.as_mut() {
            background.update(dt);
        }
        for slide in self.slides.iter_mut() {
            slide.update(dt);
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        d.clear_background(BACKDROP);

        if let Some(background) = &self.background {
            for spot in background.spots(self.viewport) {
                d.draw_circle_gradient(
                    spot.x as i32,
                    spot.y as i32,
                    spot.radius,
                    light_color(spot.color, spot.opacity),
                    Color::new(255, 255, 255, 0),
                );
            }
        }

        if let Some(message) = &self.error {
            let size = 30.0;
            let width = FontMetric(&self.font).width(message, size);
            let pos = Vector2::new((self.viewport.width - width) * 0.5, (self.viewport.height - size) * 0.5);
            d.draw_text_ex(&self.font, message, pos, size, spacing(size), Color::RED);
            return;
        }

        // Outgoing slide underneath the incoming one
        for wanted in [Visibility::Exiting, Visibility::Entering, Visibility::Active] {
            for slide in self.slides.iter().filter(|s| s.visibility == wanted) {
                slide.draw(d, &self.font, self.viewport);
            }
        }
    }
}

impl Surface for RaylibSurface {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn append_slide(&mut self, slide: &Slide) {
        let layout = layout(slide.content(), &FontMetric(&self.font), CONTENT_MAX_WIDTH);
        self.slides.push(SlideView::new(layout));
    }

    fn set_visibility(&mut self, index: usize, visibility: Visibility) {
        let timing = self.timing;
        let Some(slide) = self.slides.get_mut(index) else {
            return;
        };
        let previous = std::mem::replace(&mut slide.visibility, visibility);
        match visibility {
            Visibility::Entering => slide.start_enter(&timing),
            Visibility::Active if previous != Visibility::Entering => slide.start_enter(&timing),
            Visibility::Exiting => slide.start_exit(&timing),
            _ => {}
        }
    }

    fn measure(&self, index: usize) -> Option<Size> {
        self.slides.get(index).map(|s| s.layout.size)
    }

    fn set_scale(&mut self, index: usize, scale: f32) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.scale = scale;
        }
    }

    fn show_error(&mut self, message: &str) {
        self.slides.clear();
        self.error = Some(message.to_string());
    }
}
