use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::constants::{PAUSE_DELAY, ROTATION_PERIOD};
use crate::dom::{listen_all, ElementId, EventKind, Page};
use crate::error::BindingError;
use crate::rotation::Rotator;
use crate::state::SliderState;
use crate::swipe::{SwipeCallback, SwipeDetector};
use crate::timer::{Scheduler, TimerHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub rotation_period: Duration,
    pub pause_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            rotation_period: ROTATION_PERIOD,
            pause_delay: PAUSE_DELAY,
        }
    }
}

/// Elements the slider attaches to.
#[derive(Debug, Clone)]
pub struct SliderBindings {
    pub container: ElementId,
    pub buttons: Vec<ElementId>,
}

pub struct SwipeCallbacks {
    pub on_swipe_right: SwipeCallback,
    pub on_swipe_left: SwipeCallback,
}

impl SwipeCallbacks {
    pub fn new<R, L>(on_swipe_right: R, on_swipe_left: L) -> Self
    where
        R: Fn() + 'static,
        L: Fn() + 'static,
    {
        Self {
            on_swipe_right: Box::new(on_swipe_right),
            on_swipe_left: Box::new(on_swipe_left),
        }
    }
}

impl Default for SwipeCallbacks {
    // Directional navigation is not wired by default, gestures are only reported.
    fn default() -> Self {
        Self::new(|| log::info!("swipe right"), || log::info!("swipe left"))
    }
}

/// The two timer handles the controller owns. At most one of each exists,
/// and every start goes through a cancel of the previous one.
#[derive(Debug, Default)]
struct TimerSlots {
    rotation: Option<TimerHandle>,
    pause: Option<TimerHandle>,
}

impl TimerSlots {
    fn cancel_rotation<S: Scheduler>(&mut self, scheduler: &S) -> bool {
        self.rotation.take().is_some_and(|h| scheduler.clear(h))
    }

    fn cancel_pause<S: Scheduler>(&mut self, scheduler: &S) -> bool {
        self.pause.take().is_some_and(|h| scheduler.clear(h))
    }

    fn rotation_active<S: Scheduler>(&self, scheduler: &S) -> bool {
        self.rotation.is_some_and(|h| scheduler.is_active(h))
    }

    fn pause_pending<S: Scheduler>(&self, scheduler: &S) -> bool {
        self.pause.is_some_and(|h| scheduler.is_active(h))
    }
}

struct Inner<S, R> {
    scheduler: S,
    rotator: Rc<RefCell<R>>,
    timings: Timings,
    slots: TimerSlots,
    swipe: Option<Rc<RefCell<SwipeDetector>>>,
}

/// Keeps the slides advancing on a timer and backs off for a cooldown
/// whenever a navigation button is clicked.
///
/// The handle is shared: clones drive the same slider, and the page keeps the
/// slider alive through its click listeners.
pub struct SliderController<S, R> {
    inner: Rc<RefCell<Inner<S, R>>>,
}

impl<S, R> Clone for SliderController<S, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, R> SliderController<S, R>
where
    S: Scheduler + 'static,
    R: Rotator + 'static,
{
    /// Attaches the slider to the page and starts rotating.
    ///
    /// Every element is checked first; on `BindingError` nothing has been
    /// attached and no timer is running.
    pub fn mount(
        page: &Page,
        bindings: &SliderBindings,
        rotator: Rc<RefCell<R>>,
        scheduler: S,
        timings: Timings,
        swipe_callbacks: SwipeCallbacks,
    ) -> Result<Self, BindingError> {
        page.require(&bindings.container)?;
        for button in bindings.buttons.iter() {
            page.require(button)?;
        }

        let controller = Self {
            inner: Rc::new(RefCell::new(Inner {
                scheduler,
                rotator,
                timings,
                slots: TimerSlots::default(),
                swipe: None,
            })),
        };

        let clicked = controller.clone();
        listen_all(page, &bindings.buttons, EventKind::Click, move |_| {
            clicked.on_navigation_click();
        })?;

        controller.start_rotation_timer();

        let SwipeCallbacks { on_swipe_right, on_swipe_left } = swipe_callbacks;
        let detector =
            SwipeDetector::bind(page, &bindings.container, on_swipe_right, on_swipe_left)?;
        controller.inner.borrow_mut().swipe = Some(detector);

        log::info!(
            "slider mounted on #{} with {} navigation button(s), advancing every {:?}",
            bindings.container,
            bindings.buttons.len(),
            timings.rotation_period
        );
        Ok(controller)
    }

    /// Stops rotation and (re)arms the cooldown. Repeated clicks push the
    /// restart out to one full cooldown after the last click.
    pub fn on_navigation_click(&self) {
        let weak = Rc::downgrade(&self.inner);
        let mut inner = self.inner.borrow_mut();
        let Inner { scheduler, slots, timings, .. } = &mut *inner;
        let scheduler = &*scheduler;

        slots.cancel_rotation(scheduler);
        slots.cancel_pause(scheduler);

        let delay = timings.pause_delay;
        let handle = scheduler.set_timeout(
            delay,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                inner.borrow_mut().slots.pause = None;
                log::debug!("cooldown over, resuming rotation");
                SliderController { inner }.start_rotation_timer();
            }),
        );
        slots.pause = Some(handle);
        log::debug!("navigation click at {:?}, rotation paused for {:?}", scheduler.now(), delay);
    }

    /// Starts the repeating advance timer, dropping any pending cooldown.
    /// Returns false, doing nothing, if it is already running.
    pub fn start_rotation_timer(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Inner { scheduler, rotator, slots, timings, .. } = &mut *inner;
        let scheduler = &*scheduler;

        if slots.rotation_active(scheduler) {
            return false;
        }
        slots.cancel_pause(scheduler);

        let rotator = Rc::clone(&*rotator);
        let handle = scheduler.set_interval(
            timings.rotation_period,
            Box::new(move || rotator.borrow_mut().advance()),
        );
        slots.rotation = Some(handle);
        true
    }

    pub fn state(&self) -> SliderState {
        if self.is_rotating() {
            SliderState::Rotating
        } else {
            SliderState::Cooldown
        }
    }

    pub fn is_rotating(&self) -> bool {
        let inner = self.inner.borrow();
        inner.slots.rotation_active(&inner.scheduler)
    }

    pub fn is_paused(&self) -> bool {
        let inner = self.inner.borrow();
        inner.slots.pause_pending(&inner.scheduler)
    }

    pub fn timings(&self) -> Timings {
        self.inner.borrow().timings
    }

    pub fn rotator(&self) -> Rc<RefCell<R>> {
        Rc::clone(&self.inner.borrow().rotator)
    }

    pub fn swipe_detector(&self) -> Option<Rc<RefCell<SwipeDetector>>> {
        self.inner.borrow().swipe.clone()
    }
}
