//! Shared, change-notifying values.
//!
//! An [`Observable`] is a cheap-to-clone handle to a single value. Every clone
//! refers to the same storage, so a write through one handle is visible (and
//! notified) through all of them.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

struct Inner<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<Callback<T>>>,
}

/// A single-threaded observable value.
///
/// Notifications are synchronous and happen in registration order. No borrow
/// of the inner storage is held while callbacks run, so a callback is free to
/// write to any observable, including the one currently notifying.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
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
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Current value (cloned).
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of effective mutations so far.
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Replace the value and notify subscribers.
    ///
    /// Writing a value equal to the current one does nothing.
    pub fn set(&self, value: T) {
        if self.stage(value) {
            self.notify();
        }
    }

    /// Replace the value without notifying. Returns whether it changed.
    ///
    /// Used to apply several related writes before anyone sees them; follow
    /// up with [`notify`](Self::notify) on every handle that changed.
    pub fn stage(&self, value: T) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.value == value {
            return false;
        }
        inner.value = value;
        inner.version += 1;
        true
    }

    /// Register `callback` to run after every effective change.
    ///
    /// The callback stays registered for as long as the returned
    /// [`Subscription`] is alive.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&callback));
        Subscription::hold(callback)
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// True when both handles share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Run every live subscriber with the current value.
    pub fn notify(&self) {
        let (value, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            let callbacks: Vec<Rc<Callback<T>>> =
                inner.subscribers.iter().filter_map(Weak::upgrade).collect();
            (inner.value.clone(), callbacks)
        };
        for callback in callbacks {
            callback(&value);
        }
    }
}

/// RAII guard for one or more registered callbacks.
///
/// Dropping the guard unregisters everything it holds.
#[must_use = "dropping a Subscription unregisters its callback"]
pub struct Subscription {
    guards: Vec<Box<dyn Any>>,
}

impl Subscription {
    fn hold(guard: impl Any) -> Self {
        Self {
            guards: vec![Box::new(guard)],
        }
    }

    /// A subscription that holds nothing.
    pub fn empty() -> Self {
        Self { guards: Vec::new() }
    }

    /// Merge several subscriptions into one guard.
    pub fn merge(subscriptions: impl IntoIterator<Item = Subscription>) -> Self {
        Self {
            guards: subscriptions
                .into_iter()
                .flat_map(|sub| sub.guards)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Unregister now instead of at end of scope.
    pub fn cancel(self) {
        drop(self);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("guards", &self.guards.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_set_notifies_subscribers() {
        let obs = Observable::new(1.0);
        let seen = Rc::new(Cell::new(0.0));
        let seen_cb = Rc::clone(&seen);
        let _sub = obs.subscribe(move |v| seen_cb.set(*v));

        obs.set(5.0);
        assert_eq!(seen.get(), 5.0);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn test_equal_value_is_noop() {
        let obs = Observable::new(3.0);
        let calls = Rc::new(Cell::new(0));
        let calls_cb = Rc::clone(&calls);
        let _sub = obs.subscribe(move |_| calls_cb.set(calls_cb.get() + 1));

        obs.set(3.0);
        assert_eq!(calls.get(), 0);
        assert_eq!(obs.version(), 0);
    }

    #[test]
    fn test_registration_order() {
        let obs = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&log);
        let second = Rc::clone(&log);
        let _a = obs.subscribe(move |_| first.borrow_mut().push("a"));
        let _b = obs.subscribe(move |_| second.borrow_mut().push("b"));

        obs.set(1);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let obs = Observable::new(0);
        let calls = Rc::new(Cell::new(0));
        let calls_cb = Rc::clone(&calls);
        let sub = obs.subscribe(move |_| calls_cb.set(calls_cb.get() + 1));
        assert_eq!(obs.subscriber_count(), 1);

        sub.cancel();
        obs.set(1);
        assert_eq!(calls.get(), 0);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn test_reentrant_set_from_callback() {
        let source = Observable::new(0.0);
        let clamp = source.clone();
        // Clamp to 10 from inside the notification.
        let _sub = source.subscribe(move |v| {
            if *v > 10.0 {
                clamp.set(10.0);
            }
        });

        source.set(42.0);
        assert_eq!(source.get(), 10.0);
    }

    #[test]
    fn test_merge_holds_all() {
        let a = Observable::new(0);
        let b = Observable::new(0);
        let merged = Subscription::merge([a.subscribe(|_| {}), b.subscribe(|_| {})]);
        assert_eq!(a.subscriber_count(), 1);
        assert_eq!(b.subscriber_count(), 1);

        drop(merged);
        assert_eq!(a.subscriber_count(), 0);
        assert_eq!(b.subscriber_count(), 0);
    }

    #[test]
    fn test_staged_writes_are_seen_together() {
        let a = Observable::new(1.0);
        let b = Observable::new(1.0);
        let sums = Rc::new(RefCell::new(Vec::new()));
        let (a_cb, b_cb, sums_cb) = (a.clone(), b.clone(), Rc::clone(&sums));
        let _sub = a.subscribe(move |_| sums_cb.borrow_mut().push(a_cb.get() + b_cb.get()));

        assert!(a.stage(2.0));
        assert!(b.stage(3.0));
        assert!(!b.stage(3.0));
        assert!(sums.borrow().is_empty());

        a.notify();
        assert_eq!(*sums.borrow(), [5.0]);
        assert_eq!(a.version(), 1);
    }
}
