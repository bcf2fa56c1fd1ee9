//! Auto-advancing slider: a rotation timer that backs off after navigation
//! clicks, and a swipe detector for horizontal touch gestures.
//!
//! Everything runs on one thread. Host services (timers, the page and its
//! events, the engine that actually moves slides) are handed in by the caller,
//! see [`timer::Scheduler`], [`dom::Page`] and [`rotation::Rotator`].

pub mod constants;
pub mod dom;
pub mod error;
pub mod rotation;
pub mod simulate;
pub mod slider;
pub mod state;
pub mod swipe;
pub mod timer;

pub use crate::dom::{ElementId, Event, EventKind, Page, TouchPoint};
pub use crate::error::{BindingError, ScriptError};
pub use crate::rotation::{Carousel, Rotator};
pub use crate::slider::{SliderBindings, SliderController, SwipeCallbacks, Timings};
pub use crate::state::{GestureState, SliderState};
pub use crate::swipe::{classify, SwipeDetector, SwipeDirection};
pub use crate::timer::{ManualScheduler, Scheduler, TimerHandle};
