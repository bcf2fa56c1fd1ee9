mod slide;
mod texture_loader;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Result};
use raylib::prelude::*;

use slider::constants::*;
use slider::{
    Carousel, ElementId, Event, EventKind, ManualScheduler, Page, Rotator, SliderBindings,
    SliderController, SliderState, SwipeCallbacks, Timings, TouchPoint,
};

use self::slide::Slide;
use self::texture_loader::{load_sorted_image_paths, load_texture_with_exif_rotation};

// Crossfade from the previously shown slide to the current one.
struct Fade {
    shown: usize,
    from: Option<usize>,
    timer: f32,
}

impl Fade {
    fn update(&mut self, current: usize, dt: f32) {
        if current != self.shown {
            self.from = Some(self.shown);
            self.shown = current;
            self.timer = 0.0;
        }
        self.timer += dt;
        if self.timer >= FADE_DURATION {
            self.from = None;
        }
    }

    fn progress(&self) -> f32 {
        (self.timer / FADE_DURATION).min(1.0)
    }
}

fn button_rects(screen_width: f32, screen_height: f32) -> (Rectangle, Rectangle) {
    let y = (screen_height - BUTTON_SIZE) * 0.5;
    let prev = Rectangle::new(BUTTON_MARGIN, y, BUTTON_SIZE, BUTTON_SIZE);
    let next_x = screen_width - BUTTON_MARGIN - BUTTON_SIZE;
    let next = Rectangle::new(next_x, y, BUTTON_SIZE, BUTTON_SIZE);
    (prev, next)
}

pub fn run(image_directory: &Path, shuffle: bool, timings: Timings) -> Result<()> {
    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Slider")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load Slides ---
    let mut slides = Vec::new();
    for path in load_sorted_image_paths(image_directory)? {
        match load_texture_with_exif_rotation(&mut rl, &thread, &path) {
            Ok(texture) => slides.push(Slide::new(texture)),
            Err(e) => log::error!("Skipping {}: {:#}", path.display(), e),
        }
    }
    if slides.is_empty() {
        bail!("No slides were loaded from {}", image_directory.display());
    }
    log::info!("Loaded {} slide(s) from {}", slides.len(), image_directory.display());

    let mut carousel = Carousel::new(slides);
    if shuffle {
        carousel.shuffle(&mut rand::rng());
    }
    let carousel = Rc::new(RefCell::new(carousel));

    // --- Page and widget ---
    let container = ElementId::from(CONTAINER_ID);
    let prev_button = ElementId::from(PREV_BUTTON_ID);
    let next_button = ElementId::from(NEXT_BUTTON_ID);
    let page = Page::with_elements([container.clone(), prev_button.clone(), next_button.clone()]);

    // The buttons move the carousel themselves; the slider only hears about the click.
    let prev = Rc::clone(&carousel);
    page.listen(&prev_button, EventKind::Click, move |_| prev.borrow_mut().previous())?;
    let next = Rc::clone(&carousel);
    page.listen(&next_button, EventKind::Click, move |_| next.borrow_mut().advance())?;

    let (right, left) = (Rc::clone(&carousel), Rc::clone(&carousel));
    let swipe_callbacks = SwipeCallbacks::new(
        move || {
            log::info!("swipe right");
            right.borrow_mut().previous();
        },
        move || {
            log::info!("swipe left");
            left.borrow_mut().advance();
        },
    );

    let scheduler = ManualScheduler::new();
    let bindings = SliderBindings {
        container: container.clone(),
        buttons: vec![prev_button.clone(), next_button.clone()],
    };
    let controller = SliderController::mount(
        &page,
        &bindings,
        Rc::clone(&carousel),
        scheduler.clone(),
        timings,
        swipe_callbacks,
    )?;

    let mut fade = Fade { shown: 0, from: None, timer: FADE_DURATION };
    let mut touching = false;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        scheduler.advance(Duration::from_secs_f32(dt));

        let screen = (rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        let (prev_rect, next_rect) = button_rects(screen.0, screen.1);
        let mouse = rl.get_mouse_position();
        let point = TouchPoint::new(mouse.x, mouse.y);

        // Mouse presses stand in for touches on desktop.
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if prev_rect.check_collision_point_rec(mouse) {
                page.dispatch(&prev_button, Event::Click);
            } else if next_rect.check_collision_point_rec(mouse) {
                page.dispatch(&next_button, Event::Click);
            } else {
                touching = true;
                page.dispatch(&container, Event::TouchStart(point));
            }
        }
        if touching && rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            touching = false;
            page.dispatch(&container, Event::TouchEnd(point));
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            page.dispatch(&next_button, Event::Click);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            page.dispatch(&prev_button, Event::Click);
        }

        fade.update(carousel.borrow().current(), dt);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);

        let carousel = carousel.borrow();
        let slides = carousel.slides();
        if let Some(from) = fade.from {
            slides[from].draw(&mut d, 1.0 - fade.progress());
        }
        slides[fade.shown].draw(&mut d, fade.progress());

        for (rect, label) in [(prev_rect, "<"), (next_rect, ">")] {
            d.draw_rectangle_rec(rect, Color::new(255, 255, 255, 60));
            let text_x = (rect.x + rect.width * 0.35) as i32;
            let text_y = (rect.y + rect.height * 0.2) as i32;
            d.draw_text(label, text_x, text_y, 40, Color::WHITE);
        }

        let position = format!("{}/{}", carousel.current() + 1, carousel.len());
        let status = match controller.state() {
            SliderState::Rotating => position,
            SliderState::Cooldown => format!("{} (paused)", position),
        };
        d.draw_text(&status, 20, 20, 20, Color::LIGHTGRAY);
    }

    Ok(())
}
