//! Read-only numeric handles that can be watched for changes.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::observable::{Observable, Subscription};

/// A live, watchable `f64` quantity.
///
/// Geometry adapters hand these out so that callers can observe a quantity
/// without knowing whether it is stored directly on the element or computed
/// from several stored fields (a circle's left edge is `center_x - radius`).
#[derive(Clone)]
pub enum Expression {
    /// A value that never changes and never notifies.
    Constant(f64),
    /// A stored value.
    Value(Observable<f64>),
    /// A value computed from several stored values.
    Derived(Derived),
}

/// Something a derived quantity is recomputed on.
pub trait Source {
    fn on_change(&self, callback: Rc<dyn Fn()>) -> Subscription;
}

impl<T: Clone + PartialEq + 'static> Source for Observable<T> {
    fn on_change(&self, callback: Rc<dyn Fn()>) -> Subscription {
        self.subscribe(move |_| callback())
    }
}

/// A computed quantity together with the sources it reads.
#[derive(Clone)]
pub struct Derived {
    sources: Vec<Rc<dyn Source>>,
    eval: Rc<dyn Fn() -> f64>,
}

impl Expression {
    /// The neutral handle: always zero, never fires.
    pub fn zero() -> Self {
        Self::Constant(0.0)
    }

    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    pub fn of(source: &Observable<f64>) -> Self {
        Self::Value(source.clone())
    }

    /// A quantity recomputed by `eval` whenever any of `sources` changes.
    pub fn derived(sources: Vec<Observable<f64>>, eval: impl Fn() -> f64 + 'static) -> Self {
        let sources = sources
            .into_iter()
            .map(|source| Rc::new(source) as Rc<dyn Source>)
            .collect();
        Self::watching(sources, eval)
    }

    /// Like [`derived`](Self::derived), over sources of any value type.
    pub fn watching(sources: Vec<Rc<dyn Source>>, eval: impl Fn() -> f64 + 'static) -> Self {
        Self::Derived(Derived {
            sources,
            eval: Rc::new(eval),
        })
    }

    /// `minuend - subtrahend`
    pub fn difference(minuend: &Observable<f64>, subtrahend: &Observable<f64>) -> Self {
        let (a, b) = (minuend.clone(), subtrahend.clone());
        Self::derived(vec![minuend.clone(), subtrahend.clone()], move || {
            a.get() - b.get()
        })
    }

    /// `source * factor`
    pub fn scaled(source: &Observable<f64>, factor: f64) -> Self {
        let a = source.clone();
        Self::derived(vec![source.clone()], move || a.get() * factor)
    }

    pub fn get(&self) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::Value(source) => source.get(),
            Self::Derived(derived) => (derived.eval)(),
        }
    }

    /// Whether this handle can ever notify.
    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }

    /// Call `callback` with the new value each time the quantity changes.
    ///
    /// A derived quantity only fires when its computed value differs from
    /// the last one it reported; a source change that leaves the result
    /// untouched is silent.
    pub fn subscribe(&self, callback: impl Fn(f64) + 'static) -> Subscription {
        match self {
            Self::Constant(_) => Subscription::empty(),
            Self::Value(source) => source.subscribe(move |value| callback(*value)),
            Self::Derived(derived) => {
                let last = Rc::new(Cell::new((derived.eval)()));
                let callback: Rc<dyn Fn(f64)> = Rc::new(callback);
                let subscriptions = derived.sources.iter().map(|source| {
                    let eval = Rc::clone(&derived.eval);
                    let last = Rc::clone(&last);
                    let callback = Rc::clone(&callback);
                    source.on_change(Rc::new(move || {
                        let value = eval();
                        if value != last.get() {
                            last.set(value);
                            callback(value);
                        }
                    }))
                });
                Subscription::merge(subscriptions.collect::<Vec<_>>())
            }
        }
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Value(source) => f.debug_tuple("Value").field(&source.get()).finish(),
            Self::Derived(derived) => f
                .debug_struct("Derived")
                .field("sources", &derived.sources.len())
                .field("value", &(derived.eval)())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn test_constant_never_fires() {
        let expr = Expression::zero();
        let sub = expr.subscribe(|_| panic!("constant fired"));
        assert!(sub.is_empty());
        assert_eq!(expr.get(), 0.0);
    }

    #[test]
    fn test_difference_tracks_both_sources() {
        let center = Observable::new(100.0);
        let radius = Observable::new(20.0);
        let left = Expression::difference(&center, &radius);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_cb = Rc::clone(&seen);
        let _sub = left.subscribe(move |v| seen_cb.borrow_mut().push(v));

        center.set(150.0);
        radius.set(50.0);
        assert_eq!(*seen.borrow(), vec![130.0, 100.0]);
        assert_eq!(left.get(), 100.0);
    }

    #[test]
    fn test_derived_silent_when_value_unchanged() {
        let offset = Observable::new(-5.0);
        let source = offset.clone();
        let clamped = Expression::derived(vec![offset.clone()], move || source.get().max(0.0));
        let calls = Rc::new(Cell::new(0));
        let calls_cb = Rc::clone(&calls);
        let _sub = clamped.subscribe(move |_| calls_cb.set(calls_cb.get() + 1));

        offset.set(-10.0);
        assert_eq!(calls.get(), 0);

        offset.set(4.0);
        assert_eq!(calls.get(), 1);
        assert_eq!(clamped.get(), 4.0);
    }

    #[test]
    fn test_scaled() {
        let radius = Observable::new(35.0);
        let diameter = Expression::scaled(&radius, 2.0);
        assert_eq!(diameter.get(), 70.0);
        radius.set(50.0);
        assert_eq!(diameter.get(), 100.0);
    }

    #[test]
    fn test_watching_non_numeric_source() {
        let label = Observable::new(String::from("ab"));
        let text = label.clone();
        let length = Expression::watching(vec![Rc::new(label.clone()) as Rc<dyn Source>], move || {
            text.with(|s| s.len() as f64)
        });
        let seen = Rc::new(Cell::new(0.0));
        let seen_cb = Rc::clone(&seen);
        let _sub = length.subscribe(move |v| seen_cb.set(v));

        label.set(String::from("abcd"));
        assert_eq!(seen.get(), 4.0);
    }
}
