use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::{ElementId, Event, EventKind, Page, TouchPoint};
use crate::error::BindingError;
use crate::state::GestureState;

/// Swipe callbacks run after the detector has released itself, so they may
/// read it or dispatch more touches to the same element.
pub type SwipeCallback = Box<dyn Fn()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Horizontal direction of a gesture. Only x is compared; a gesture that ends
/// at the same x it started at is not a swipe.
pub fn classify(start: TouchPoint, end: TouchPoint) -> Option<SwipeDirection> {
    if end.x < start.x {
        Some(SwipeDirection::Left)
    } else if end.x > start.x {
        Some(SwipeDirection::Right)
    } else {
        None
    }
}

/// Turns a touchstart/touchend pair on one element into a left or right
/// swipe.
#[derive(Debug, Default)]
pub struct SwipeDetector {
    state: GestureState,
    touch_start: TouchPoint,
    touch_end: TouchPoint,
}

impl SwipeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detector and attaches it to the `touchstart` and `touchend`
    /// events of `element`. The page keeps the detector alive and calls
    /// `on_swipe_right` / `on_swipe_left` for each classified gesture.
    pub fn bind<R, L>(
        page: &Page,
        element: &ElementId,
        on_swipe_right: R,
        on_swipe_left: L,
    ) -> Result<Rc<RefCell<Self>>, BindingError>
    where
        R: Fn() + 'static,
        L: Fn() + 'static,
    {
        page.require(element)?;
        let detector = Rc::new(RefCell::new(Self::new()));

        let start = Rc::clone(&detector);
        page.listen(element, EventKind::TouchStart, move |event| {
            if let Event::TouchStart(point) = event {
                start.borrow_mut().touch_start(*point);
            }
        })?;

        let end = Rc::clone(&detector);
        page.listen(element, EventKind::TouchEnd, move |event| {
            let Event::TouchEnd(point) = event else {
                return;
            };
            let direction = end.borrow_mut().touch_end(*point);
            match direction {
                Some(SwipeDirection::Left) => on_swipe_left(),
                Some(SwipeDirection::Right) => on_swipe_right(),
                None => {}
            }
        })?;

        log::debug!("swipe detector bound to #{}", element);
        Ok(detector)
    }

    pub fn touch_start(&mut self, point: TouchPoint) {
        self.touch_start = point;
        self.state = GestureState::Started;
    }

    /// Completes the current gesture and returns its direction.
    /// A touchend without a preceding touchstart is ignored.
    pub fn touch_end(&mut self, point: TouchPoint) -> Option<SwipeDirection> {
        if self.state != GestureState::Started {
            log::warn!("touchend at ({}, {}) without touchstart, ignored", point.x, point.y);
            return None;
        }
        self.touch_end = point;
        self.state = GestureState::Ended;

        let direction = classify(self.touch_start, self.touch_end);
        log::debug!(
            "gesture ({}, {}) -> ({}, {}): {:?}",
            self.touch_start.x,
            self.touch_start.y,
            self.touch_end.x,
            self.touch_end.y,
            direction
        );
        direction
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Last recorded (start, end) pair.
    pub fn sample(&self) -> (TouchPoint, TouchPoint) {
        (self.touch_start, self.touch_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn gesture(d: &mut SwipeDetector, from: (f32, f32), to: (f32, f32)) -> Option<SwipeDirection> {
        d.touch_start(TouchPoint::new(from.0, from.1));
        d.touch_end(TouchPoint::new(to.0, to.1))
    }

    #[test]
    fn leftward_motion_is_swipe_left() {
        let mut d = SwipeDetector::new();
        assert_eq!(gesture(&mut d, (100.0, 10.0), (40.0, 80.0)), Some(SwipeDirection::Left));
    }

    #[test]
    fn rightward_motion_is_swipe_right() {
        let mut d = SwipeDetector::new();
        assert_eq!(gesture(&mut d, (40.0, 10.0), (100.0, 10.0)), Some(SwipeDirection::Right));
    }

    #[test]
    fn vertical_motion_is_ignored() {
        let mut d = SwipeDetector::new();
        assert_eq!(gesture(&mut d, (50.0, 0.0), (50.0, 300.0)), None);
        assert_eq!(d.state(), GestureState::Ended);
    }

    #[test]
    fn touchend_without_start_does_nothing() {
        let mut d = SwipeDetector::new();
        assert_eq!(d.touch_end(TouchPoint::new(500.0, 0.0)), None);
        assert_eq!(d.state(), GestureState::Idle);

        assert_eq!(gesture(&mut d, (10.0, 0.0), (20.0, 0.0)), Some(SwipeDirection::Right));
        assert_eq!(d.touch_end(TouchPoint::new(0.0, 0.0)), None);
    }

    #[test]
    fn new_gesture_overwrites_sample() {
        let mut d = SwipeDetector::new();
        gesture(&mut d, (100.0, 0.0), (10.0, 0.0));
        d.touch_start(TouchPoint::new(5.0, 1.0));
        assert_eq!(d.state(), GestureState::Started);
        assert_eq!(d.sample().0, TouchPoint::new(5.0, 1.0));
        assert_eq!(d.touch_end(TouchPoint::new(6.0, 1.0)), Some(SwipeDirection::Right));
    }

    #[test]
    fn bind_routes_page_events() {
        let page = Page::with_elements(["slider"]);
        let (right, left) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let (r, l) = (Rc::clone(&right), Rc::clone(&left));
        let id = ElementId::from("slider");
        SwipeDetector::bind(&page, &id, move || r.set(r.get() + 1), move || l.set(l.get() + 1))
            .unwrap();

        page.dispatch(&id, Event::TouchStart(TouchPoint::new(300.0, 0.0)));
        page.dispatch(&id, Event::TouchEnd(TouchPoint::new(100.0, 0.0)));
        page.dispatch(&id, Event::TouchStart(TouchPoint::new(50.0, 0.0)));
        page.dispatch(&id, Event::TouchEnd(TouchPoint::new(50.0, 90.0)));

        assert_eq!((left.get(), right.get()), (1, 0));
    }

    #[test]
    fn callback_may_read_detector() {
        let page = Page::with_elements(["slider"]);
        let id = ElementId::from("slider");
        let seen = Rc::new(Cell::new(None));
        let slot: Rc<RefCell<Option<Rc<RefCell<SwipeDetector>>>>> = Rc::new(RefCell::new(None));

        let (s, d) = (Rc::clone(&seen), Rc::clone(&slot));
        let detector = SwipeDetector::bind(
            &page,
            &id,
            move || {
                if let Some(detector) = d.borrow().as_ref() {
                    s.set(Some(detector.borrow().sample()));
                }
            },
            || {},
        )
        .unwrap();
        *slot.borrow_mut() = Some(detector);

        page.dispatch(&id, Event::TouchStart(TouchPoint::new(10.0, 1.0)));
        page.dispatch(&id, Event::TouchEnd(TouchPoint::new(60.0, 2.0)));

        assert_eq!(seen.get(), Some((TouchPoint::new(10.0, 1.0), TouchPoint::new(60.0, 2.0))));
    }

    #[test]
    fn callback_may_dispatch_to_same_element() {
        let page = Page::with_elements(["slider"]);
        let id = ElementId::from("slider");
        let rights = Rc::new(Cell::new(0));

        let (r, inner_page, inner_id) = (Rc::clone(&rights), page.clone(), id.clone());
        let detector = SwipeDetector::bind(
            &page,
            &id,
            move || {
                r.set(r.get() + 1);
                inner_page.dispatch(&inner_id, Event::TouchStart(TouchPoint::new(0.0, 0.0)));
            },
            || {},
        )
        .unwrap();

        page.dispatch(&id, Event::TouchStart(TouchPoint::new(10.0, 0.0)));
        page.dispatch(&id, Event::TouchEnd(TouchPoint::new(60.0, 0.0)));

        assert_eq!(rights.get(), 1);
        assert_eq!(detector.borrow().state(), GestureState::Started);
        assert_eq!(detector.borrow().sample().0, TouchPoint::new(0.0, 0.0));
    }

    #[test]
    fn bind_to_missing_element_fails() {
        let page = Page::new();
        let result = SwipeDetector::bind(&page, &"slider".into(), || {}, || {});
        assert!(matches!(result, Err(BindingError::ElementNotFound { .. })));
    }
}
