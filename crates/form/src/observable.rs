//! Observable values with change notification.
//!
//! [`Observable<T>`] is a shared, version-tracked cell. Clones are handles to
//! the same value. Subscribers registered with
//! [`subscribe`](Observable::subscribe) are called synchronously, in
//! registration order, every time the value actually changes.
//!
//! # Invariants
//!
//! 1. The version increments exactly once per mutation that changes the value.
//! 2. Setting a value equal to the current one is a no-op (no version bump,
//!    no notification).
//! 3. Subscribers run after the interior borrow is released, so a callback may
//!    read or write the same observable.
//! 4. Dropping a [`Subscription`] detaches its callback before the next
//!    notification.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

struct ObservableInner<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<Callback<T>>>,
}

/// A shared value that notifies subscribers when it changes.
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use nebula_form::Observable;
///
/// let value = Observable::new(String::new());
/// let seen = Rc::new(Cell::new(0));
///
/// let counter = Rc::clone(&seen);
/// let _sub = value.subscribe(move |_| counter.set(counter.get() + 1));
///
/// value.set("a".to_owned());
/// value.set("a".to_owned()); // unchanged, no notification
/// assert_eq!(seen.get(), 1);
/// assert_eq!(value.version(), 1);
/// ```
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Default + Clone + PartialEq + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Creates an observable holding `value` at version 0.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Returns a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Runs `f` with a reference to the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replaces the value, notifying subscribers if it changed.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Mutates the value in place, notifying subscribers if it changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }

    /// Number of effective mutations so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Registers `callback`, called with the new value after each change.
    ///
    /// The callback stays registered for as long as the returned
    /// [`Subscription`] is alive.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&callback));
        Subscription {
            _guard: Box::new(callback),
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Returns a read-only view of this observable.
    #[must_use]
    pub fn read_only(&self) -> ReadOnly<T> {
        ReadOnly {
            source: self.clone(),
        }
    }

    fn notify(&self) {
        let (callbacks, value) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            let callbacks: Vec<Rc<Callback<T>>> =
                inner.subscribers.iter().filter_map(Weak::upgrade).collect();
            (callbacks, inner.value.clone())
        };

        for callback in callbacks {
            callback(&value);
        }
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// RAII guard for a subscriber callback; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// ReadOnly<T>
// ---------------------------------------------------------------------------

/// A read-only view of an [`Observable`].
///
/// Field handles publish their derived values through this type: callers
/// can read and subscribe but only the field writes.
pub struct ReadOnly<T> {
    source: Observable<T>,
}

impl<T> Clone for ReadOnly<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadOnly<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadOnly").field(&self.source).finish()
    }
}

impl<T: Clone + PartialEq + 'static> ReadOnly<T> {
    /// Returns a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.source.get()
    }

    /// Runs `f` with a reference to the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.source.with(f)
    }

    /// Number of changes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.source.version()
    }

    /// Registers `callback`, called with the new value after each change.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.source.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_get_set_version() {
        let obs = Observable::new(1);
        assert_eq!(obs.get(), 1);
        assert_eq!(obs.version(), 0);

        obs.set(2);
        assert_eq!(obs.get(), 2);
        assert_eq!(obs.version(), 1);

        obs.set(2);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn test_clone_shares_state() {
        let a = Observable::new(String::from("x"));
        let b = a.clone();
        b.set("y".into());
        assert_eq!(a.get(), "y");
    }

    #[test]
    fn test_subscribers_notified_in_order() {
        let obs = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = Rc::clone(&log);
        let _s1 = obs.subscribe(move |v| l1.borrow_mut().push(("first", *v)));
        let l2 = Rc::clone(&log);
        let _s2 = obs.subscribe(move |v| l2.borrow_mut().push(("second", *v)));

        obs.set(7);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_drop_subscription_unsubscribes() {
        let obs = Observable::new(0);
        let calls = Rc::new(Cell::new(0));

        let c = Rc::clone(&calls);
        let sub = obs.subscribe(move |_| c.set(c.get() + 1));
        assert_eq!(obs.subscriber_count(), 1);

        obs.set(1);
        drop(sub);
        obs.set(2);

        assert_eq!(calls.get(), 1);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn test_callback_may_write_back() {
        let obs = Observable::new(0);
        let writer = obs.clone();
        let _sub = obs.subscribe(move |v| {
            if *v < 3 {
                writer.set(v + 1);
            }
        });

        obs.set(1);
        assert_eq!(obs.get(), 3);
    }

    #[test]
    fn test_update_in_place() {
        let obs = Observable::new(vec![1, 2]);
        obs.update(|v| v.push(3));
        assert_eq!(obs.get(), vec![1, 2, 3]);
        assert_eq!(obs.version(), 1);

        obs.update(|_| {});
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn test_read_only_view() {
        let obs = Observable::new(5);
        let view = obs.read_only();
        let seen = Rc::new(Cell::new(0));

        let s = Rc::clone(&seen);
        let _sub = view.subscribe(move |v| s.set(*v));

        obs.set(9);
        assert_eq!(view.get(), 9);
        assert_eq!(view.version(), 1);
        assert_eq!(seen.get(), 9);
    }
}
