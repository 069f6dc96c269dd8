//! Anchoring engine
//!
//! Keeps one element's edge attached to another element's edge as either of
//! them moves or resizes. The pieces, bottom-up:
//!
//! - [`geometry`] gives every element kind the same corner-plus-size view.
//! - [`rules`] is the table of equations each edge pairing maintains.
//! - [`graph`] checks a set of equations for loops.
//! - [`engine`] turns equations into observer registrations.
//! - [`binding`] and [`controller`] are the public handles.

pub mod binding;
pub mod config;
pub mod controller;
pub mod engine;
pub mod geometry;
pub mod graph;
pub mod rules;
pub mod types;

pub use binding::{AnchorBinding, AnchorKind, AnchorSet};
pub use config::AnchorConfig;
pub use controller::AnchorController;
pub use geometry::{AdapterProvider, DefaultAdapters, GeometryAdapter};
pub use graph::{CycleError, DependencyGraph};
pub use rules::{wirings_for, Formula, Wiring};
pub use types::*;
