#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SliderState {
    Rotating,   // Rotation timer active, slides advance on every tick
    Cooldown,   // Pause timer pending after a navigation click
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum GestureState {
    #[default]
    Idle,       // No touch seen yet
    Started,    // touchstart recorded, waiting for touchend
    Ended,      // Gesture classified, next touchstart begins a new one
}
