//! Single-threaded change propagation primitives.
//!
//! - [`Observable`]: a shared value that notifies subscribers when it changes.
//! - [`Subscription`]: RAII guard; dropping it unregisters the callback.
//! - [`Expression`]: a read-only handle over a stored or computed quantity.
//!
//! # Invariants
//!
//! 1. Subscribers are notified synchronously, in registration order.
//! 2. Setting a value equal to the current one is a no-op (no notification).
//! 3. Notifications may re-enter: a callback can write to any observable and
//!    the resulting notifications run before the outer one returns.
//! 4. Dropping a [`Subscription`] removes its callbacks before the next
//!    notification cycle.

pub mod expression;
pub mod observable;

pub use expression::{Expression, Source};
pub use observable::{Observable, Subscription};
