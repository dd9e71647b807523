use glowdeck_engine::coords::Vec2;
use glowdeck_engine::input::Key;

/// Pointer and keyboard input delivered to widgets, in panel-local
/// logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    PointerMoved(Vec2),
    PointerDown(Vec2),
    PointerUp(Vec2),
    Text(String),
    Key(Key),
}

/// Whether a widget handled an event. A `Consumed` result stops
/// propagation to later siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Ignored,
    Consumed,
}

impl EventResult {
    pub fn consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
