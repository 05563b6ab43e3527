use std::path::Path;

use anyhow::Context as _;
use clap::Parser;
use raylib::prelude::*;

use md_slideshow::config::Timing;
use md_slideshow::loader::load_slides;
use md_slideshow::render::RaylibSurface;
use md_slideshow::scaler::fit_to_screen;
use md_slideshow::{Cli, CmarkConverter, Converter, MemorySurface, Presentation, Size, Surface};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .init();

    let timing = cli.timing().context("invalid slideshow options")?;
    let window = cli.window().context("invalid window options")?;
    let converter = CmarkConverter::default();

    if cli.check {
        return check(&cli.source, &converter, timing);
    }

    let (mut rl, thread) = raylib::init()
        .size(window.width, window.height)
        .title("Markdown Slideshow")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(window.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut surface = RaylibSurface::new(&rl, timing, window.background);
    let mut presentation = Presentation::open(&cli.source, &converter, &mut surface, timing);
    tracing::info!(status = ?presentation.status(), slides = presentation.session().len(), "presentation started");

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        if rl.is_window_resized() {
            surface.set_viewport(Size::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32));
            presentation.resize(&mut surface);
        }

        presentation.update(dt, &mut surface);
        surface.update(dt);

        let mut d = rl.begin_drawing(&thread);
        surface.draw(&mut d);
    }

    Ok(())
}

/// Load without a window and report what each slide would look like.
fn check(path: &Path, converter: &dyn Converter, timing: Timing) -> anyhow::Result<()> {
    let mut surface = MemorySurface::default();
    let slides = load_slides(path, converter, &mut surface)
        .with_context(|| format!("failed to load {}", path.display()))?;

    if slides.is_empty() {
        tracing::warn!(path = %path.display(), "no slides in source");
    }
    for slide in &slides {
        let natural = surface.measure(slide.index()).unwrap_or_default();
        let scale = fit_to_screen(&mut surface, slide.index(), timing.padding).unwrap_or(1.0);
        tracing::info!(
            slide = slide.index(),
            width = natural.width,
            height = natural.height,
            scale,
            glyphs = slide.glyphs(),
            "slide"
        );
    }
    Ok(())
}
