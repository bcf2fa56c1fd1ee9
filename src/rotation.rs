use rand::Rng;
use rand::seq::SliceRandom;

/// The engine that owns the slide set and performs the transitions.
/// The slider controller only ever calls `advance`.
pub trait Rotator {
    /// Moves to the next slide, wrapping after the last one.
    fn advance(&mut self);
    /// Moves to the previous slide, wrapping before the first one.
    fn previous(&mut self);
    fn current(&self) -> usize;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered slide set with a cursor.
pub struct Carousel<T> {
    slides: Vec<T>,
    current_slide_index: usize,
    advances: usize,
}

impl<T> Carousel<T> {
    pub fn new(slides: Vec<T>) -> Self {
        Self {
            slides,
            current_slide_index: 0,
            advances: 0,
        }
    }

    /// Randomizes slide order and rewinds to the first slide.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.slides.shuffle(rng);
        self.current_slide_index = 0;
    }

    pub fn current_slide(&self) -> Option<&T> {
        self.slides.get(self.current_slide_index)
    }

    pub fn slides(&self) -> &[T] {
        &self.slides
    }

    /// Number of `advance` calls seen so far.
    pub fn advances(&self) -> usize {
        self.advances
    }
}

impl<T> Rotator for Carousel<T> {
    fn advance(&mut self) {
        self.advances += 1;
        if self.slides.is_empty() {
            return;
        }
        self.current_slide_index = (self.current_slide_index + 1) % self.slides.len();
    }

    fn previous(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        self.current_slide_index = match self.current_slide_index {
            0 => self.slides.len() - 1,
            i => i - 1,
        };
    }

    fn current(&self) -> usize {
        self.current_slide_index
    }

    fn len(&self) -> usize {
        self.slides.len()
    }
}
