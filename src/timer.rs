use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use crate::constants::MIN_TIMER_PERIOD;

pub type TimerCallback = Box<dyn FnMut()>;

/// Identifies one timer created by a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Host timer services: a repeating timer and a one-shot deferred timer,
/// both cancellable through their handle.
pub trait Scheduler {
    fn set_interval(&self, period: Duration, callback: TimerCallback) -> TimerHandle;
    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;
    /// Returns false when the handle was already gone (fired or cleared).
    fn clear(&self, handle: TimerHandle) -> bool;
    fn is_active(&self, handle: TimerHandle) -> bool;
    fn now(&self) -> Duration;
}

struct Timer {
    due: Duration,
    period: Option<Duration>, // None for one-shot timers
    callback: Rc<RefCell<TimerCallback>>,
}

#[derive(Default)]
struct Timers {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<u64, Timer>,
}

/// Scheduler driven by an explicit clock.
///
/// Time only moves when [`ManualScheduler::advance`] is called, which makes it
/// usable both for deterministic tests and for hosts that own their frame
/// loop (the viewer advances it by the frame time). Clones share the same
/// clock and timers.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<Timers>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `dt`, firing every timer that falls due on
    /// the way in due-time order. Returns the number of callbacks invoked.
    ///
    /// Callbacks run with no internal borrow held, so they may arm or clear
    /// timers. They must not call `advance` themselves.
    pub fn advance(&self, dt: Duration) -> usize {
        let target = self.now() + dt;
        let mut fired = 0;
        while let Some(callback) = self.pop_due(target) {
            let mut callback = callback.borrow_mut();
            (*callback)();
            fired += 1;
        }
        self.inner.borrow_mut().now = target;
        fired
    }

    /// Advances to an absolute time. Does nothing if `t` is in the past.
    pub fn advance_to(&self, t: Duration) -> usize {
        let now = self.now();
        if t <= now {
            return 0;
        }
        self.advance(t - now)
    }

    pub fn active_intervals(&self) -> usize {
        self.inner.borrow().pending.values().filter(|t| t.period.is_some()).count()
    }

    pub fn pending_timeouts(&self) -> usize {
        self.inner.borrow().pending.values().filter(|t| t.period.is_none()).count()
    }

    fn insert(
        &self,
        due: Duration,
        period: Option<Duration>,
        callback: TimerCallback,
    ) -> TimerHandle {
        let mut timers = self.inner.borrow_mut();
        let id = timers.next_id;
        timers.next_id += 1;
        let callback = Rc::new(RefCell::new(callback));
        timers.pending.insert(id, Timer { due, period, callback });
        TimerHandle(id)
    }

    // Takes the next timer due at or before `target`, moves the clock to its
    // due time and reschedules or drops it.
    fn pop_due(&self, target: Duration) -> Option<Rc<RefCell<TimerCallback>>> {
        let mut timers = self.inner.borrow_mut();
        let (id, due, period, callback) = timers
            .pending
            .iter()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(id, t)| (t.due, **id))
            .map(|(id, t)| (*id, t.due, t.period, Rc::clone(&t.callback)))?;

        timers.now = due;
        match period {
            Some(period) => {
                if let Some(timer) = timers.pending.get_mut(&id) {
                    timer.due = due + period;
                }
            }
            None => {
                timers.pending.remove(&id);
            }
        }
        Some(callback)
    }
}

impl Scheduler for ManualScheduler {
    fn set_interval(&self, period: Duration, callback: TimerCallback) -> TimerHandle {
        let period = period.max(MIN_TIMER_PERIOD);
        let due = self.now() + period;
        self.insert(due, Some(period), callback)
    }

    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let due = self.now() + delay;
        self.insert(due, None, callback)
    }

    fn clear(&self, handle: TimerHandle) -> bool {
        self.inner.borrow_mut().pending.remove(&handle.0).is_some()
    }

    fn is_active(&self, handle: TimerHandle) -> bool {
        self.inner.borrow().pending.contains_key(&handle.0)
    }

    fn now(&self) -> Duration {
        self.inner.borrow().now
    }
}
