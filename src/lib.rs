//! Anchor Layout - edge anchoring for retained scene graphs
//!
//! Attach an edge of one element to an edge of another and keep the two
//! attached as either of them moves or resizes. Anchoring also matches the
//! size along the other axis, so a label anchored to the right of a panel
//! takes the panel's height.
//!
//! # Example
//!
//! ```rust
//! use anchor_layout::resolve;
//!
//! let report = resolve(r#"
//! [[node]]
//! id = "r"
//! kind = "rectangle"
//! x = 200
//! y = 100
//! width = 100
//! height = 100
//!
//! [[node]]
//! id = "n"
//! kind = "region"
//! width = 70
//! height = 70
//!
//! [[anchor]]
//! node = "n"
//! reference = "r"
//! edge = "right"
//! to = "left"
//! "#).unwrap();
//!
//! let n = report.row("n").unwrap();
//! assert_eq!((n.bounds.x, n.bounds.y, n.bounds.height), (130.0, 100.0, 100.0));
//! ```

pub mod blueprint;
pub mod error;
pub mod layout;
pub mod reactive;
pub mod scene;

pub use blueprint::{Blueprint, Report, ReportRow, Scene};
pub use error::BlueprintError;
pub use layout::{
    AdapterProvider, AnchorBinding, AnchorConfig, AnchorController, AnchorPosition, AnchorSet,
    BoundingBox, DefaultAdapters, GeometryAdapter,
};
pub use reactive::{Expression, Observable, Subscription};
pub use scene::{Node, Shape};

/// Parse a blueprint, build it, apply its updates and report the result.
pub fn resolve(source: &str) -> Result<Report, BlueprintError> {
    let scene = Blueprint::from_str(source)?.build()?;
    Ok(scene.report())
}
