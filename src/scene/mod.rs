//! A small retained scene graph.
//!
//! This is the host side of anchoring: it owns elements, their native
//! geometry and the parent/child topology. The anchoring engine only reads,
//! writes and observes geometry through [`crate::layout::geometry`]; it never
//! creates, destroys or reparents nodes.

pub mod node;
pub mod shape;

pub use node::Node;
pub use shape::{Arc, Circle, Ellipse, Line, Polygon, Rectangle, Region, Shape, Text, TextMetrics};
