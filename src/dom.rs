//! In-memory stand-in for the browser event surface.
//!
//! A [`Page`] is a registry of named elements, each carrying its listeners.
//! Widgets receive element ids from their caller and attach listeners through
//! the page; they never go looking for elements on their own.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::BindingError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Screen coordinates of a single touch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    TouchStart,
    TouchEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Click,
    TouchStart(TouchPoint),
    TouchEnd(TouchPoint),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Click => EventKind::Click,
            Event::TouchStart(_) => EventKind::TouchStart,
            Event::TouchEnd(_) => EventKind::TouchEnd,
        }
    }
}

/// Listeners are shared, not exclusive: a listener may dispatch further
/// events, including ones that reach itself again.
pub type Listener = Rc<dyn Fn(&Event)>;

#[derive(Default)]
struct Element {
    listeners: Vec<(EventKind, Listener)>,
}

/// Cheap to clone; clones share the same elements.
#[derive(Clone, Default)]
pub struct Page {
    elements: Rc<RefCell<HashMap<ElementId, Element>>>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ElementId>,
    {
        let page = Self::new();
        for id in ids {
            page.insert(id);
        }
        page
    }

    /// Adds an element. Returns false if it already existed.
    pub fn insert(&self, id: impl Into<ElementId>) -> bool {
        let id = id.into();
        let mut elements = self.elements.borrow_mut();
        if elements.contains_key(&id) {
            return false;
        }
        elements.insert(id, Element::default());
        true
    }

    /// Removes an element together with its listeners.
    pub fn remove(&self, id: &ElementId) -> bool {
        self.elements.borrow_mut().remove(id).is_some()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.borrow().contains_key(id)
    }

    pub fn require(&self, id: &ElementId) -> Result<(), BindingError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(BindingError::ElementNotFound { id: id.to_string() })
        }
    }

    pub fn listen<F>(&self, id: &ElementId, kind: EventKind, handler: F) -> Result<(), BindingError>
    where
        F: Fn(&Event) + 'static,
    {
        let listener: Listener = Rc::new(handler);
        self.listen_shared(id, kind, listener)
    }

    /// Attaches an already shared listener, so several elements can point at
    /// the same handler.
    pub fn listen_shared(
        &self,
        id: &ElementId,
        kind: EventKind,
        listener: Listener,
    ) -> Result<(), BindingError> {
        let mut elements = self.elements.borrow_mut();
        let element = elements
            .get_mut(id)
            .ok_or_else(|| BindingError::ElementNotFound { id: id.to_string() })?;
        element.listeners.push((kind, listener));
        Ok(())
    }

    pub fn listener_count(&self, id: &ElementId, kind: EventKind) -> usize {
        self.elements
            .borrow()
            .get(id)
            .map_or(0, |e| e.listeners.iter().filter(|(k, _)| *k == kind).count())
    }

    /// Delivers `event` to every listener of its kind on `id`, in registration
    /// order. Returns how many listeners ran; an unknown element receives
    /// nothing.
    pub fn dispatch(&self, id: &ElementId, event: Event) -> usize {
        let kind = event.kind();
        // Snapshot first: listeners may touch the page while running.
        let listeners: Vec<Listener> = match self.elements.borrow().get(id) {
            Some(element) => element
                .listeners
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, l)| Rc::clone(l))
                .collect(),
            None => return 0,
        };

        for listener in listeners.iter() {
            listener(&event);
        }
        listeners.len()
    }
}

/// Attaches one handler, shared, to every element in `ids`.
///
/// All elements are checked before anything is attached, so a missing element
/// leaves the page untouched.
pub fn listen_all<F>(
    page: &Page,
    ids: &[ElementId],
    kind: EventKind,
    handler: F,
) -> Result<(), BindingError>
where
    F: Fn(&Event) + 'static,
{
    for id in ids {
        page.require(id)?;
    }
    let listener: Listener = Rc::new(handler);
    for id in ids {
        page.listen_shared(id, kind, Rc::clone(&listener))?;
    }
    Ok(())
}
