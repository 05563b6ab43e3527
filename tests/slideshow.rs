use std::fs;
use std::path::Path;

use md_slideshow::constants::ERROR_MESSAGE;
use md_slideshow::{CmarkConverter, MemorySurface, Presentation, Size, Status, Timing, Visibility};

fn open(path: &Path, surface: &mut MemorySurface) -> Presentation {
    Presentation::open(path, &CmarkConverter::default(), surface, Timing::default())
}

#[test]
fn two_slide_deck_plays_in_a_loop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slides.md");
    fs::write(&path, "# A\n\n---\n\nB").unwrap();

    let mut surface = MemorySurface::default();
    let mut show = open(&path, &mut surface);
    assert_eq!(show.status(), Status::Running);

    let slides = show.session().slides();
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[0].content().element_children().next().unwrap().tag, "h1");
    assert_eq!(slides[0].content().text(), "A");
    assert_eq!(slides[1].content().element_children().next().unwrap().tag, "p");
    assert_eq!(slides[1].content().text(), "B");

    assert_eq!(show.session().current(), 0);
    show.update(5.0, &mut surface);
    assert_eq!(show.session().current(), 1);
    show.update(5.0, &mut surface);
    assert_eq!(show.session().current(), 0);
    assert_eq!(surface.in_state(Visibility::Active), vec![0]);
}

#[test]
fn missing_source_shows_the_error_message() {
    let dir = tempfile::tempdir().unwrap();
    let mut surface = MemorySurface::default();
    let mut show = open(&dir.path().join("absent.md"), &mut surface);

    assert_eq!(show.status(), Status::Failed);
    assert_eq!(surface.error(), Some(ERROR_MESSAGE));
    assert_eq!(surface.slide_count(), 0);
    assert!(!show.is_playing());

    show.update(30.0, &mut surface);
    assert_eq!(surface.slide_count(), 0);
}

#[test]
fn resize_refits_the_current_slide_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slides.md");
    fs::write(&path, "one\n\n---\n\ntwo").unwrap();

    let mut surface = MemorySurface::new(Size::new(1000.0, 800.0));
    let mut show = open(&path, &mut surface);
    surface.set_natural_size(0, Size::new(1880.0, 100.0));
    surface.set_natural_size(1, Size::new(1880.0, 100.0));

    surface.set_viewport(Size::new(1000.0, 800.0));
    show.resize(&mut surface);
    assert_eq!(surface.scale(0), Some(0.5));
    assert_eq!(surface.scale(1), Some(1.0));

    // advancing fits the incoming slide
    show.update(5.0, &mut surface);
    assert_eq!(surface.scale(1), Some(0.5));
}

#[test]
fn single_slide_deck_keeps_running() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slides.md");
    fs::write(&path, "# Only\n\nslide").unwrap();

    let mut surface = MemorySurface::default();
    let mut show = open(&path, &mut surface);
    for _ in 0..10 {
        show.update(1.3, &mut surface);
        assert_eq!(show.session().current(), 0);
    }
    assert_eq!(surface.in_state(Visibility::Active), vec![0]);
    assert!(surface.in_state(Visibility::Exiting).is_empty());
}
