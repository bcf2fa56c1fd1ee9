//! Headless replay of clicks and swipes against a slider on a simulated clock.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{CONTAINER_ID, NEXT_BUTTON_ID};
use crate::dom::{ElementId, Event, Page, TouchPoint};
use crate::error::{BindingError, ScriptError};
use crate::rotation::{Carousel, Rotator};
use crate::slider::{SliderBindings, SliderController, SwipeCallbacks, Timings};
use crate::swipe::SwipeDirection;
use crate::timer::{ManualScheduler, Scheduler};

/// One touch gesture on the slider container, `AT_MS:FROM_X:TO_X` on the
/// command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedSwipe {
    pub at: Duration,
    pub from: TouchPoint,
    pub to: TouchPoint,
}

impl FromStr for ScriptedSwipe {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScriptError::InvalidSwipe(s.to_string());
        let mut parts = s.split(':');
        let fields = (parts.next(), parts.next(), parts.next(), parts.next());
        let (Some(at), Some(from), Some(to), None) = fields else {
            return Err(invalid());
        };
        let at: u64 = at.trim().parse().map_err(|_| invalid())?;
        let from: f32 = from.trim().parse().map_err(|_| invalid())?;
        let to: f32 = to.trim().parse().map_err(|_| invalid())?;
        Ok(Self {
            at: Duration::from_millis(at),
            from: TouchPoint::new(from, 0.0),
            to: TouchPoint::new(to, 0.0),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Script {
    pub slides: usize,
    pub duration: Duration,
    pub clicks: Vec<Duration>,
    pub swipes: Vec<ScriptedSwipe>,
    pub timings: Timings,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    Advance { at: Duration, slide: usize },
    Click { at: Duration },
    Swipe { at: Duration, direction: SwipeDirection },
}

impl SimEvent {
    pub fn at(&self) -> Duration {
        match self {
            SimEvent::Advance { at, .. } | SimEvent::Click { at } | SimEvent::Swipe { at, .. } => {
                *at
            }
        }
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>9.3}s  ", self.at().as_secs_f64())?;
        match self {
            SimEvent::Advance { slide, .. } => write!(f, "advance -> slide {}", slide),
            SimEvent::Click { .. } => write!(f, "navigation click"),
            SimEvent::Swipe { direction, .. } => write!(f, "swipe {:?}", direction),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub events: Vec<SimEvent>,
}

impl Report {
    pub fn advances(&self) -> Vec<Duration> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SimEvent::Advance { at, .. } => Some(*at),
                _ => None,
            })
            .collect()
    }
}

// Carousel that reports every advance with the time it happened.
struct Recorder {
    carousel: Carousel<usize>,
    clock: ManualScheduler,
    events: Rc<RefCell<Vec<SimEvent>>>,
}

impl Rotator for Recorder {
    fn advance(&mut self) {
        self.carousel.advance();
        self.events.borrow_mut().push(SimEvent::Advance {
            at: self.clock.now(),
            slide: self.carousel.current(),
        });
    }

    fn previous(&mut self) {
        self.carousel.previous();
    }

    fn current(&self) -> usize {
        self.carousel.current()
    }

    fn len(&self) -> usize {
        self.carousel.len()
    }
}

enum Input {
    Click,
    Swipe(TouchPoint, TouchPoint),
}

/// Mounts a slider on a fresh page and plays the script up to
/// `script.duration`. Inputs scheduled past the end are dropped; a timer due
/// at the same instant as an input fires first.
pub fn run(script: &Script) -> Result<Report, BindingError> {
    let container = ElementId::from(CONTAINER_ID);
    let button = ElementId::from(NEXT_BUTTON_ID);
    let page = Page::with_elements([container.clone(), button.clone()]);
    let scheduler = ManualScheduler::new();
    let events = Rc::new(RefCell::new(Vec::new()));

    let recorder = Rc::new(RefCell::new(Recorder {
        carousel: Carousel::new((0..script.slides).collect()),
        clock: scheduler.clone(),
        events: Rc::clone(&events),
    }));

    let swipe_logger = |direction: SwipeDirection| {
        let events = Rc::clone(&events);
        let clock = scheduler.clone();
        move || {
            events.borrow_mut().push(SimEvent::Swipe { at: clock.now(), direction });
        }
    };
    let swipe_callbacks = SwipeCallbacks::new(
        swipe_logger(SwipeDirection::Right),
        swipe_logger(SwipeDirection::Left),
    );

    let bindings = SliderBindings {
        container: container.clone(),
        buttons: vec![button.clone()],
    };
    let _controller = SliderController::mount(
        &page,
        &bindings,
        recorder,
        scheduler.clone(),
        script.timings,
        swipe_callbacks,
    )?;

    let mut inputs: Vec<(Duration, Input)> = script
        .clicks
        .iter()
        .map(|at| (*at, Input::Click))
        .chain(script.swipes.iter().map(|s| (s.at, Input::Swipe(s.from, s.to))))
        .filter(|(at, _)| *at <= script.duration)
        .collect();
    inputs.sort_by_key(|(at, _)| *at);

    for (at, input) in inputs {
        scheduler.advance_to(at);
        match input {
            Input::Click => {
                events.borrow_mut().push(SimEvent::Click { at });
                page.dispatch(&button, Event::Click);
            }
            Input::Swipe(from, to) => {
                page.dispatch(&container, Event::TouchStart(from));
                page.dispatch(&container, Event::TouchEnd(to));
            }
        }
    }
    scheduler.advance_to(script.duration);

    let events = events.borrow().clone();
    log::info!("simulated {:?}: {} event(s)", script.duration, events.len());
    Ok(Report { events })
}
