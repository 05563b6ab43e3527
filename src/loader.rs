use std::path::Path;

use crate::constants::SPLIT_TOKEN;
use crate::convert::Converter;
use crate::error::LoadResult;
use crate::slide::Slide;
use crate::source::fetch_markdown;
use crate::surface::Surface;

/// Cut converter output into the non-empty fragments that become slides.
pub fn split_fragments(markup: &str) -> Vec<&str> {
    markup
        .split(SPLIT_TOKEN)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Markdown text to slides, ordinals assigned in document order.
pub fn build_slides(markdown: &str, converter: &dyn Converter) -> LoadResult<Vec<Slide>> {
    let markup = converter.to_markup(markdown)?;
    Ok(split_fragments(&markup)
        .into_iter()
        .enumerate()
        .map(|(index, fragment)| Slide::new(index, fragment))
        .collect())
}

/// Build the deck from markdown and hand every slide to the surface.
/// Nothing is appended unless the whole deck was built.
pub fn load_markdown(
    markdown: &str,
    converter: &dyn Converter,
    surface: &mut dyn Surface,
) -> LoadResult<Vec<Slide>> {
    let slides = build_slides(markdown, converter)?;
    for slide in &slides {
        surface.append_slide(slide);
    }
    Ok(slides)
}

/// Fetch the source file, then [`load_markdown`].
pub fn load_slides(
    path: &Path,
    converter: &dyn Converter,
    surface: &mut dyn Surface,
) -> LoadResult<Vec<Slide>> {
    let markdown = fetch_markdown(path)?;
    let slides = load_markdown(&markdown, converter, surface)?;
    tracing::info!(path = %path.display(), slides = slides.len(), "loaded slides");
    Ok(slides)
}
