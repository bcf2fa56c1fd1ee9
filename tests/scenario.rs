//! End-to-end runs through the page surface and the simulation driver.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use slider::simulate::{self, Script, SimEvent};
use slider::{
    BindingError, Carousel, Event, EventKind, ManualScheduler, Page, Rotator, SliderBindings,
    SliderController, SliderState, SwipeCallbacks, Timings, TouchPoint,
};

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

#[test]
fn idle_then_click_scenario() {
    let page = Page::with_elements(["wallop", "slider_btn"]);
    let scheduler = ManualScheduler::new();
    let carousel = Rc::new(RefCell::new(Carousel::new(vec!["a", "b", "c"])));
    let controller = SliderController::mount(
        &page,
        &SliderBindings { container: "wallop".into(), buttons: vec!["slider_btn".into()] },
        Rc::clone(&carousel),
        scheduler.clone(),
        Timings::default(),
        SwipeCallbacks::default(),
    )
    .unwrap();

    scheduler.advance_to(secs(12));
    assert_eq!(carousel.borrow().advances(), 2);

    page.dispatch(&"slider_btn".into(), Event::Click);
    assert_eq!(controller.state(), SliderState::Cooldown);

    scheduler.advance_to(secs(30));
    assert_eq!(carousel.borrow().advances(), 2);
    assert_eq!(controller.state(), SliderState::Rotating);

    scheduler.advance_to(secs(32));
    assert_eq!(carousel.borrow().advances(), 3);
    assert_eq!(carousel.borrow().current(), 0);
}

#[test]
fn swipe_directions_through_page() {
    let page = Page::with_elements(["wallop"]);
    let (right, left) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
    let (r, l) = (Rc::clone(&right), Rc::clone(&left));
    let _controller = SliderController::mount(
        &page,
        &SliderBindings { container: "wallop".into(), buttons: Vec::new() },
        Rc::new(RefCell::new(Carousel::new(vec![1, 2]))),
        ManualScheduler::new(),
        Timings::default(),
        SwipeCallbacks::new(move || r.set(r.get() + 1), move || l.set(l.get() + 1)),
    )
    .unwrap();

    let id = "wallop".into();
    let gestures = [
        ((100.0, 5.0), (40.0, 9.0)),
        ((40.0, 5.0), (100.0, 1.0)),
        ((50.0, 0.0), (50.0, 400.0)),
    ];
    for ((x0, y0), (x1, y1)) in gestures {
        page.dispatch(&id, Event::TouchStart(TouchPoint::new(x0, y0)));
        page.dispatch(&id, Event::TouchEnd(TouchPoint::new(x1, y1)));
    }

    assert_eq!(left.get(), 1);
    assert_eq!(right.get(), 1);
}

#[test]
fn missing_swipe_target_blocks_mount() {
    let page = Page::with_elements(["slider_btn"]);
    let scheduler = ManualScheduler::new();
    let result = SliderController::mount(
        &page,
        &SliderBindings { container: "wallop".into(), buttons: vec!["slider_btn".into()] },
        Rc::new(RefCell::new(Carousel::new(vec![1]))),
        scheduler.clone(),
        Timings::default(),
        SwipeCallbacks::default(),
    );

    assert_eq!(result.err(), Some(BindingError::ElementNotFound { id: "wallop".to_string() }));
    assert_eq!(scheduler.active_intervals(), 0);
    scheduler.advance(secs(60));
    page.dispatch(&"slider_btn".into(), Event::Click);
    assert_eq!(scheduler.pending_timeouts(), 0);
}

#[test]
fn simulation_matches_live_run() {
    let script = Script {
        slides: 4,
        duration: secs(40),
        clicks: vec![Duration::from_millis(12_000)],
        swipes: vec!["3000:500:100".parse().unwrap()],
        timings: Timings::default(),
    };

    let report = simulate::run(&script).unwrap();

    assert_eq!(report.advances(), vec![secs(5), secs(10), secs(32), secs(37)]);
    let swiped_at_three = |e: &SimEvent| matches!(e, SimEvent::Swipe { at, .. } if *at == secs(3));
    assert!(report.events.iter().any(swiped_at_three));
}

#[test]
fn swipe_callback_reenters_widget() {
    let page = Page::with_elements(["wallop", "slider_btn"]);
    let controller_slot: Rc<RefCell<Option<SliderController<ManualScheduler, Carousel<u8>>>>> =
        Rc::new(RefCell::new(None));
    let seen = Rc::new(Cell::new(None));

    let (slot, s, inner_page) = (Rc::clone(&controller_slot), Rc::clone(&seen), page.clone());
    let on_right = move || {
        let slot = slot.borrow();
        let Some(controller) = slot.as_ref() else {
            return;
        };
        if let Some(detector) = controller.swipe_detector() {
            s.set(Some(detector.borrow().sample()));
        }
        inner_page.dispatch(&"wallop".into(), Event::TouchStart(TouchPoint::new(7.0, 7.0)));
    };
    let controller = SliderController::mount(
        &page,
        &SliderBindings { container: "wallop".into(), buttons: vec!["slider_btn".into()] },
        Rc::new(RefCell::new(Carousel::new(vec![1, 2, 3]))),
        ManualScheduler::new(),
        Timings::default(),
        SwipeCallbacks::new(on_right, || {}),
    )
    .unwrap();
    *controller_slot.borrow_mut() = Some(controller.clone());

    page.dispatch(&"wallop".into(), Event::TouchStart(TouchPoint::new(40.0, 0.0)));
    page.dispatch(&"wallop".into(), Event::TouchEnd(TouchPoint::new(100.0, 3.0)));

    let started = (TouchPoint::new(40.0, 0.0), TouchPoint::new(100.0, 3.0));
    assert_eq!(seen.get(), Some(started));
    let detector = controller.swipe_detector().unwrap();
    assert_eq!(detector.borrow().sample().0, TouchPoint::new(7.0, 7.0));
}

#[test]
fn click_handler_may_forward_to_sibling_button() {
    let page = Page::with_elements(["wallop", "prev", "next"]);
    let scheduler = ManualScheduler::new();
    let controller = SliderController::mount(
        &page,
        &SliderBindings { container: "wallop".into(), buttons: vec!["prev".into(), "next".into()] },
        Rc::new(RefCell::new(Carousel::new(vec![1, 2]))),
        scheduler.clone(),
        Timings::default(),
        SwipeCallbacks::default(),
    )
    .unwrap();

    // A keyboard shortcut bound on "prev" that also presses "next".
    let forwarded = page.clone();
    page.listen(&"prev".into(), EventKind::Click, move |_| {
        forwarded.dispatch(&"next".into(), Event::Click);
    })
    .unwrap();

    scheduler.advance_to(secs(3));
    page.dispatch(&"prev".into(), Event::Click);

    assert_eq!(scheduler.pending_timeouts(), 1);
    assert!(controller.is_paused());
    scheduler.advance_to(secs(18));
    assert!(controller.is_rotating());
}
