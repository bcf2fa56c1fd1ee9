use std::time::Duration;

pub const ROTATION_PERIOD: Duration = Duration::from_secs(5);  // Time between automatic advances
pub const PAUSE_DELAY: Duration = Duration::from_secs(15);     // Cooldown after a navigation click
pub const MIN_TIMER_PERIOD: Duration = Duration::from_millis(1); // Floor for timer periods

pub const WINDOW_WIDTH: i32 = 1280;           // Viewer window width
pub const WINDOW_HEIGHT: i32 = 720;           // Viewer window height
pub const FPS: u32 = 60;                      // Frames per second

pub const FADE_DURATION: f32 = 0.5;           // Crossfade between two slides (seconds)
pub const BUTTON_SIZE: f32 = 64.0;            // Side of the square navigation buttons (pixels)
pub const BUTTON_MARGIN: f32 = 24.0;          // Distance between buttons and window edge (pixels)

pub const CONTAINER_ID: &str = "slider";
pub const PREV_BUTTON_ID: &str = "slider_btn_prev";
pub const NEXT_BUTTON_ID: &str = "slider_btn_next";
