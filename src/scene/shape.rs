//! Concrete element kinds and their stored geometry.
//!
//! Each kind keeps its geometry in its own native representation (corner,
//! center + radius, baseline text, ...). Translation into a common
//! corner-plus-size view lives in [`crate::layout::geometry`], never here.

use crate::layout::types::{BoundingBox, Point};
use crate::reactive::Observable;

/// Resizable container. Its position is the node's layout offset.
#[derive(Debug, Clone)]
pub struct Region {
    pub pref_width: Observable<f64>,
    pub pref_height: Observable<f64>,
    pub min_width: Observable<f64>,
    pub max_width: Observable<f64>,
    pub min_height: Observable<f64>,
    pub max_height: Observable<f64>,
}

impl Region {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            pref_width: Observable::new(width),
            pref_height: Observable::new(height),
            min_width: Observable::new(0.0),
            max_width: Observable::new(f64::MAX),
            min_height: Observable::new(0.0),
            max_height: Observable::new(f64::MAX),
        }
    }
}

/// Axis-aligned rectangle stored by its top-left corner.
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub x: Observable<f64>,
    pub y: Observable<f64>,
    pub width: Observable<f64>,
    pub height: Observable<f64>,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Observable::new(x),
            y: Observable::new(y),
            width: Observable::new(width),
            height: Observable::new(height),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Circle {
    pub center_x: Observable<f64>,
    pub center_y: Observable<f64>,
    pub radius: Observable<f64>,
}

impl Circle {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x: Observable::new(center_x),
            center_y: Observable::new(center_y),
            radius: Observable::new(radius),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ellipse {
    pub center_x: Observable<f64>,
    pub center_y: Observable<f64>,
    pub radius_x: Observable<f64>,
    pub radius_y: Observable<f64>,
}

impl Ellipse {
    pub fn new(center_x: f64, center_y: f64, radius_x: f64, radius_y: f64) -> Self {
        Self {
            center_x: Observable::new(center_x),
            center_y: Observable::new(center_y),
            radius_x: Observable::new(radius_x),
            radius_y: Observable::new(radius_y),
        }
    }
}

/// Elliptical arc. Angles are in degrees.
#[derive(Debug, Clone)]
pub struct Arc {
    pub center_x: Observable<f64>,
    pub center_y: Observable<f64>,
    pub radius_x: Observable<f64>,
    pub radius_y: Observable<f64>,
    pub start_angle: Observable<f64>,
    pub length: Observable<f64>,
}

impl Arc {
    pub fn new(center_x: f64, center_y: f64, radius_x: f64, radius_y: f64) -> Self {
        Self {
            center_x: Observable::new(center_x),
            center_y: Observable::new(center_y),
            radius_x: Observable::new(radius_x),
            radius_y: Observable::new(radius_y),
            start_angle: Observable::new(0.0),
            length: Observable::new(360.0),
        }
    }
}

/// Rough glyph metrics used to size text without a font engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Average advance of one character
    pub char_width: f64,
    /// Height of one line of text
    pub line_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 16.0,
        }
    }
}

/// A block of text positioned at `(x, y)`.
///
/// `wrapping_width` of zero means no wrapping.
#[derive(Debug, Clone)]
pub struct Text {
    pub x: Observable<f64>,
    pub y: Observable<f64>,
    pub wrapping_width: Observable<f64>,
    pub content: Observable<String>,
    pub metrics: TextMetrics,
}

impl Text {
    pub fn new(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self {
            x: Observable::new(x),
            y: Observable::new(y),
            wrapping_width: Observable::new(0.0),
            content: Observable::new(content.into()),
            metrics: TextMetrics::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Number of rendered lines once wrapping is applied.
    pub fn line_count(&self) -> usize {
        let wrap = self.wrapping_width.get();
        self.content.with(|content| {
            content
                .split('\n')
                .map(|line| {
                    let width = line.chars().count() as f64 * self.metrics.char_width;
                    if wrap > 0.0 && width > wrap {
                        (width / wrap).ceil() as usize
                    } else {
                        1
                    }
                })
                .sum()
        })
    }

    /// Width of the longest unwrapped line.
    pub fn natural_width(&self) -> f64 {
        self.content.with(|content| {
            content
                .split('\n')
                .map(|line| line.chars().count() as f64 * self.metrics.char_width)
                .fold(0.0, f64::max)
        })
    }

    pub fn text_height(&self) -> f64 {
        self.line_count() as f64 * self.metrics.line_height
    }
}

/// Straight segment between two points.
#[derive(Debug, Clone)]
pub struct Line {
    pub start_x: Observable<f64>,
    pub start_y: Observable<f64>,
    pub end_x: Observable<f64>,
    pub end_y: Observable<f64>,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start_x: Observable::new(start.x),
            start_y: Observable::new(start.y),
            end_x: Observable::new(end.x),
            end_y: Observable::new(end.y),
        }
    }
}

/// Closed polygon with a fixed outline.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub points: Vec<Point>,
}

/// The element kinds a [`Node`](super::Node) can be.
#[derive(Debug, Clone)]
pub enum Shape {
    Region(Region),
    Rectangle(Rectangle),
    Circle(Circle),
    Ellipse(Ellipse),
    Arc(Arc),
    Text(Text),
    Line(Line),
    Polygon(Polygon),
}

impl Shape {
    /// Lowercase kind name, as used in blueprints and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Region(_) => "region",
            Shape::Rectangle(_) => "rectangle",
            Shape::Circle(_) => "circle",
            Shape::Ellipse(_) => "ellipse",
            Shape::Arc(_) => "arc",
            Shape::Text(_) => "text",
            Shape::Line(_) => "line",
            Shape::Polygon(_) => "polygon",
        }
    }

    /// Bounds in the node's own coordinate space, ignoring the layout offset.
    pub fn local_bounds(&self) -> BoundingBox {
        match self {
            Shape::Region(r) => BoundingBox::new(0.0, 0.0, r.pref_width.get(), r.pref_height.get()),
            Shape::Rectangle(r) => {
                BoundingBox::new(r.x.get(), r.y.get(), r.width.get(), r.height.get())
            }
            Shape::Circle(c) => {
                let r = c.radius.get();
                BoundingBox::new(c.center_x.get() - r, c.center_y.get() - r, 2.0 * r, 2.0 * r)
            }
            Shape::Ellipse(e) => BoundingBox::new(
                e.center_x.get() - e.radius_x.get(),
                e.center_y.get() - e.radius_y.get(),
                2.0 * e.radius_x.get(),
                2.0 * e.radius_y.get(),
            ),
            Shape::Arc(a) => BoundingBox::new(
                a.center_x.get() - a.radius_x.get(),
                a.center_y.get() - a.radius_y.get(),
                2.0 * a.radius_x.get(),
                2.0 * a.radius_y.get(),
            ),
            Shape::Text(t) => {
                let wrap = t.wrapping_width.get();
                let width = if wrap > 0.0 { wrap } else { t.natural_width() };
                BoundingBox::new(t.x.get(), t.y.get(), width, t.text_height())
            }
            Shape::Line(l) => {
                let start = Point::new(l.start_x.get(), l.start_y.get());
                let end = Point::new(l.end_x.get(), l.end_y.get());
                BoundingBox::new(start.x, start.y, 0.0, 0.0).expand_to_include(end)
            }
            Shape::Polygon(p) => match p.points.split_first() {
                Some((first, rest)) => rest.iter().fold(
                    BoundingBox::new(first.x, first.y, 0.0, 0.0),
                    |bounds, point| bounds.expand_to_include(*point),
                ),
                None => BoundingBox::zero(),
            },
        }
    }
}
