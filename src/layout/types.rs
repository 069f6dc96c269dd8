//! Core types for the anchoring engine

use std::fmt;

use serde::Deserialize;

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding box representing the spatial extent of an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Coordinate of one of the four edges
    pub fn edge(&self, position: AnchorPosition) -> f64 {
        match position {
            AnchorPosition::Left => self.x,
            AnchorPosition::Right => self.right(),
            AnchorPosition::Top => self.y,
            AnchorPosition::Bottom => self.bottom(),
        }
    }

    /// Expand this bounding box to include a point
    pub fn expand_to_include(&self, point: Point) -> BoundingBox {
        let x = self.x.min(point.x);
        let y = self.y.min(point.y);
        let right = self.right().max(point.x);
        let bottom = self.bottom().max(point.y);
        BoundingBox::new(x, y, right - x, bottom - y)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// One of the four edges of an element's box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorPosition {
    Left,
    Right,
    Top,
    Bottom,
}

impl AnchorPosition {
    pub const ALL: [AnchorPosition; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// The axis this edge lies across
    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// True for the edge at `position + size` (right, bottom)
    pub fn is_far(self) -> bool {
        matches!(self, Self::Right | Self::Bottom)
    }
}

impl fmt::Display for AnchorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Position along this axis
    pub fn position(self) -> Dimension {
        match self {
            Self::Horizontal => Dimension::X,
            Self::Vertical => Dimension::Y,
        }
    }

    /// Size along this axis
    pub fn size(self) -> Dimension {
        match self {
            Self::Horizontal => Dimension::Width,
            Self::Vertical => Dimension::Height,
        }
    }

    pub fn cross(self) -> Axis {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// One of the four scalar quantities every adapter exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    X,
    Y,
    Width,
    Height,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Width => write!(f, "width"),
            Self::Height => write!(f, "height"),
        }
    }
}

/// Which element of an anchored pair a quantity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The element being positioned (`N`)
    Observed,
    /// The element it is anchored to (`R`)
    Reference,
}

/// A quantity of one side of an anchored pair, e.g. `R.width`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term {
    pub side: Side,
    pub dimension: Dimension,
}

impl Term {
    pub fn observed(dimension: Dimension) -> Self {
        Self {
            side: Side::Observed,
            dimension,
        }
    }

    pub fn reference(dimension: Dimension) -> Self {
        Self {
            side: Side::Reference,
            dimension,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            Side::Observed => "N",
            Side::Reference => "R",
        };
        write!(f, "{}.{}", side, self.dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_edges() {
        let bb = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(bb.right(), 110.0);
        assert_eq!(bb.bottom(), 70.0);
        assert_eq!(bb.edge(AnchorPosition::Left), 10.0);
        assert_eq!(bb.edge(AnchorPosition::Bottom), 70.0);
    }

    #[test]
    fn test_bounding_box_center() {
        let bb = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let center = bb.center();
        assert_eq!(center.x, 50.0);
        assert_eq!(center.y, 25.0);
    }

    #[test]
    fn test_expand_to_include() {
        let bb = BoundingBox::new(0.0, 0.0, 10.0, 10.0).expand_to_include(Point::new(-5.0, 20.0));
        assert_eq!(bb, BoundingBox::new(-5.0, 0.0, 15.0, 20.0));
    }

    #[test]
    fn test_anchor_position_axes() {
        assert_eq!(AnchorPosition::Left.axis(), Axis::Horizontal);
        assert_eq!(AnchorPosition::Bottom.axis(), Axis::Vertical);
        assert!(AnchorPosition::Right.is_far());
        assert!(!AnchorPosition::Top.is_far());
    }

    #[test]
    fn test_axis_dimensions() {
        assert_eq!(Axis::Horizontal.position(), Dimension::X);
        assert_eq!(Axis::Horizontal.size(), Dimension::Width);
        assert_eq!(Axis::Horizontal.cross().size(), Dimension::Height);
    }

    #[test]
    fn test_term_display() {
        assert_eq!(Term::reference(Dimension::Width).to_string(), "R.width");
        assert_eq!(Term::observed(Dimension::X).to_string(), "N.x");
    }
}
