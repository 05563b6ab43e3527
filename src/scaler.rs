use crate::surface::{Size, Surface};

/// Uniform scale that makes `content` fit inside `viewport` minus `padding`
/// on each axis. Never above 1, always positive.
pub fn fit_scale(content: Size, viewport: Size, padding: f32) -> f32 {
    // A viewport no larger than the padding still leaves one unit to fill
    let w = (viewport.width - padding).max(1.0);
    let h = (viewport.height - padding).max(1.0);
    if content.height > h || content.width > w {
        let scale_h = h / content.height;
        let scale_w = w / content.width;
        // Most constrained dimension wins
        scale_h.min(scale_w)
    } else {
        1.0
    }
}

/// Re-fit slide `index` to the surface's viewport. Returns the applied scale,
/// or `None` when the slide does not exist.
pub fn fit_to_screen(surface: &mut dyn Surface, index: usize, padding: f32) -> Option<f32> {
    // Measure at natural size, never through a previous shrink
    surface.set_scale(index, 1.0);
    let content = surface.measure(index)?;
    let scale = fit_scale(content, surface.viewport(), padding);
    surface.set_scale(index, scale);
    tracing::debug!(index, width = content.width, height = content.height, scale, "fit slide");
    Some(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::Slide;
    use crate::surface::MemorySurface;
    use proptest::prelude::*;

    const VIEW: Size = Size::new(1060.0, 760.0);

    #[test]
    fn fitting_content_keeps_natural_size() {
        assert_eq!(fit_scale(Size::new(1000.0, 700.0), VIEW, 60.0), 1.0);
        assert_eq!(fit_scale(Size::new(10.0, 10.0), VIEW, 60.0), 1.0);
    }

    #[test]
    fn tallest_axis_constrains() {
        // h: 700 / 1400 = 0.5, w: 1000 / 500 = 2
        assert_eq!(fit_scale(Size::new(500.0, 1400.0), VIEW, 60.0), 0.5);
    }

    #[test]
    fn widest_axis_constrains() {
        assert_eq!(fit_scale(Size::new(4000.0, 100.0), VIEW, 60.0), 0.25);
    }

    #[test]
    fn viewport_smaller_than_padding_stays_positive() {
        let content = Size::new(100.0, 50.0);
        for view in [Size::new(60.0, 60.0), Size::new(10.0, 40.0), Size::new(0.0, 0.0)] {
            let scale = fit_scale(content, view, 60.0);
            assert!(scale > 0.0 && scale <= 1.0, "{view:?} -> {scale}");
        }
        assert_eq!(fit_scale(content, Size::new(0.0, 0.0), 60.0), 0.01);
    }

    #[test]
    fn missing_slide_is_a_no_op() {
        let mut surface = MemorySurface::default();
        assert_eq!(fit_to_screen(&mut surface, 0, 60.0), None);
    }

    #[test]
    fn refit_starts_from_natural_size() {
        let mut surface = MemorySurface::new(VIEW);
        surface.append_slide(&Slide::new(0, "<p>x</p>"));
        surface.set_natural_size(0, Size::new(2000.0, 100.0));
        assert_eq!(fit_to_screen(&mut surface, 0, 60.0), Some(0.5));
        // a bigger window lets the same content grow back to 1, not beyond
        surface.set_viewport(Size::new(4000.0, 4000.0));
        assert_eq!(fit_to_screen(&mut surface, 0, 60.0), Some(1.0));
        assert_eq!(surface.scale(0), Some(1.0));
    }

    proptest! {
        #[test]
        fn never_grows_and_is_idempotent(
            w in 1.0f32..5000.0,
            h in 1.0f32..5000.0,
            vw in 200.0f32..4000.0,
            vh in 200.0f32..4000.0,
        ) {
            let content = Size::new(w, h);
            let view = Size::new(vw, vh);
            let scale = fit_scale(content, view, 60.0);
            if w <= vw - 60.0 && h <= vh - 60.0 {
                prop_assert_eq!(scale, 1.0);
            } else {
                prop_assert!(scale < 1.0);
                prop_assert_eq!(scale, ((vh - 60.0) / h).min((vw - 60.0) / w));
                prop_assert!(w * scale <= vw - 60.0 + 1e-2);
                prop_assert!(h * scale <= vh - 60.0 + 1e-2);
            }
            prop_assert_eq!(fit_scale(content, view, 60.0), scale);
        }
    }
}
