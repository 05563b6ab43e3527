pub const WINDOW_WIDTH: i32 = 1280;            // Initial window width
pub const WINDOW_HEIGHT: i32 = 720;            // Initial window height
pub const FPS: u32 = 60;                       // Target frames per second

pub const SLIDE_DURATION: f32 = 5.0;           // Time between automatic advances (seconds)
pub const EXIT_DURATION: f32 = 0.8;            // Exit animation before the slide is hidden (seconds)
pub const ENTER_DURATION: f32 = 0.8;           // Enter animation of the incoming slide (seconds)
pub const GLYPH_STAGGER: f32 = 0.02;           // Delay between two animated characters (seconds)
pub const GLYPH_DURATION: f32 = 0.4;           // Reveal time of a single character (seconds)

pub const FIT_PADDING: f32 = 60.0;             // Safety padding subtracted from both viewport axes
pub const CONTENT_MAX_WIDTH: f32 = 1600.0;     // Lines wrap beyond this natural width

pub const LIGHT_COUNT: usize = 50;             // Number of decorative background lights

pub const SPLIT_TOKEN: &str = "<hr />";        // Horizontal rule as rendered by the converter
pub const ERROR_MESSAGE: &str = "Error loading slides.";
pub const DEFAULT_SOURCE: &str = "slides.md";
