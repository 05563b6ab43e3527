use rand::Rng;

use crate::surface::Size;

/// Colour as `hsla()`: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
    pub alpha: f32,
}

impl Hsla {
    pub fn to_rgba(self) -> [u8; 4] {
        let s = self.saturation as f32 / 100.0;
        let l = self.lightness as f32 / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = (self.hue % 360) as f32 / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [channel(r), channel(g), channel(b), (self.alpha * 255.0).round().clamp(0.0, 255.0) as u8]
    }
}

/// A soft coloured disc that rises through the window and loops.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub size: f32,     // Diameter in pixels
    pub left: f32,     // Horizontal position as a fraction of the width
    pub duration: f32, // Seconds for one rise
    pub delay: f32,    // Head start so lights don't move in lockstep
    pub color: Hsla,
}

impl Light {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            size: rng.random_range(20.0..120.0),
            left: rng.random_range(0.0..1.0),
            duration: rng.random_range(5.0..15.0),
            delay: rng.random_range(0.0..10.0),
            color: Hsla {
                hue: rng.random_range(0..360),
                saturation: rng.random_range(70..100),
                lightness: rng.random_range(50..70),
                alpha: 0.8,
            },
        }
    }
}

/// Where a light is right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSpot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
    pub color: Hsla,
}

#[derive(Debug, Clone, Default)]
pub struct Background {
    lights: Vec<Light>,
    elapsed: f32,
}

impl Background {
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, &mut rand::rng())
    }

    pub fn with_rng(count: usize, rng: &mut impl Rng) -> Self {
        Self { lights: (0..count).map(|_| Light::random(rng)).collect(), elapsed: 0.0 }
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn spots(&self, viewport: Size) -> impl Iterator<Item = LightSpot> + '_ {
        self.lights.iter().map(move |light| {
            let t = ((self.elapsed + light.delay) / light.duration).fract();
            // From just below the bottom edge to just above the top edge
            let travel = viewport.height + light.size * 2.0;
            let y = viewport.height + light.size - t * travel;
            let opacity = (t / 0.1).min(1.0).min((1.0 - t) / 0.1);
            LightSpot {
                x: light.left * viewport.width,
                y,
                radius: light.size * 0.5 * 0.7,
                opacity,
                color: light.color,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn hsla(hue: u16, saturation: u8, lightness: u8) -> [u8; 4] {
        Hsla { hue, saturation, lightness, alpha: 1.0 }.to_rgba()
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsla(0, 100, 50), [255, 0, 0, 255]);
        assert_eq!(hsla(120, 100, 50), [0, 255, 0, 255]);
        assert_eq!(hsla(240, 100, 25), [0, 0, 128, 255]);
        assert_eq!(hsla(60, 0, 100), [255, 255, 255, 255]);
    }

    #[test]
    fn random_lights_stay_in_range() {
        let bg = Background::with_rng(200, &mut StdRng::seed_from_u64(7));
        assert_eq!(bg.lights().len(), 200);
        for light in bg.lights() {
            assert!((20.0..120.0).contains(&light.size));
            assert!((0.0..1.0).contains(&light.left));
            assert!((5.0..15.0).contains(&light.duration));
            assert!((0.0..10.0).contains(&light.delay));
            assert!(light.color.hue < 360);
            assert!((70..100).contains(&light.color.saturation));
            assert!((50..70).contains(&light.color.lightness));
            assert_eq!(light.color.alpha, 0.8);
        }
    }

    #[test]
    fn lights_rise_and_loop() {
        let mut bg = Background::with_rng(1, &mut StdRng::seed_from_u64(1));
        let view = Size::new(800.0, 600.0);
        let light = bg.lights()[0].clone();
        // Quarter of the way up on the third loop
        bg.update(light.duration * 2.25 - light.delay);
        let start = bg.spots(view).next().unwrap();
        bg.update(light.duration * 0.5);
        let middle = bg.spots(view).next().unwrap();
        assert!(middle.y < start.y);
        assert!(middle.opacity > 0.99);
        bg.update(light.duration * 0.5);
        let again = bg.spots(view).next().unwrap();
        assert!((again.y - start.y).abs() < 1.0);
    }
}
