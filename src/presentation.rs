use std::path::Path;

use crate::config::Timing;
use crate::constants::ERROR_MESSAGE;
use crate::convert::Converter;
use crate::cycler::Session;
use crate::error::LoadResult;
use crate::loader::load_slides;
use crate::scheduler::Timers;
use crate::slide::Slide;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Advance,
    ClearExit(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running, // Slides on screen, timer armed
    Empty,   // Source had no content, nothing to show
    Failed,  // Error message on screen
}

/// Loaded deck plus the timers that drive it.
#[derive(Debug)]
pub struct Presentation {
    session: Session,
    timers: Timers<Task>,
    timing: Timing,
    status: Status,
}

impl Presentation {
    /// Load `path` onto `surface` and start playing.
    pub fn open(path: &Path, converter: &dyn Converter, surface: &mut dyn Surface, timing: Timing) -> Self {
        Self::start(load_slides(path, converter, surface), surface, timing)
    }

    /// Start from the outcome of a load. A failure replaces the surface with
    /// the error message; an empty deck starts no timer.
    pub fn start(loaded: LoadResult<Vec<Slide>>, surface: &mut dyn Surface, timing: Timing) -> Self {
        let mut timers = Timers::default();
        let (session, status) = match loaded {
            Ok(slides) if slides.is_empty() => {
                tracing::info!("source has no slides");
                (Session::new(slides, timing.padding), Status::Empty)
            }
            Ok(slides) => {
                let mut session = Session::new(slides, timing.padding);
                session.enter(0, surface);
                timers.every(timing.interval, Task::Advance);
                (session, Status::Running)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load slides");
                surface.show_error(ERROR_MESSAGE);
                (Session::new(Vec::new(), timing.padding), Status::Failed)
            }
        };
        Self { session, timers, timing, status }
    }

    /// Let `dt` seconds pass.
    pub fn update(&mut self, dt: f32, surface: &mut dyn Surface) {
        for task in self.timers.tick(dt) {
            match task {
                Task::Advance => {
                    if let Some(prev) = self.session.advance(surface) {
                        self.timers.after(self.timing.exit, Task::ClearExit(prev));
                    }
                }
                Task::ClearExit(index) => self.session.clear_exit(index, surface),
            }
        }
    }

    /// The viewport changed size.
    pub fn resize(&mut self, surface: &mut dyn Surface) {
        tracing::debug!(viewport = ?surface.viewport(), "resize");
        self.session.refit(surface);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Whether the auto-advance timer was started.
    pub fn is_playing(&self) -> bool {
        self.timers.has_repeating()
    }
}
