/// Keyboard input the carousel reacts to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
}

impl NavKey {
    /// Maps a `KeyboardEvent.key` value. Anything but the horizontal arrows
    /// is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(NavKey::Left),
            "ArrowRight" => Some(NavKey::Right),
            _ => None,
        }
    }
}
