/// Visual state of a single slide.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Visibility {
    #[default]
    Hidden,   // Not drawn
    Entering, // Incoming slide, enter animation restarts
    Active,   // The slide on screen
    Exiting,  // Outgoing slide, exit animation running
}

impl Visibility {
    /// Whether the slide has to be drawn at all.
    pub fn is_visible(self) -> bool {
        self != Visibility::Hidden
    }
}
