//! Scene graph nodes.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::layout::types::{BoundingBox, Point};
use crate::reactive::Observable;

use super::shape::{Arc, Circle, Ellipse, Line, Polygon, Rectangle, Region, Shape, Text};

struct NodeInner {
    id: Option<String>,
    shape: Shape,
    layout_x: Observable<f64>,
    layout_y: Observable<f64>,
    parent: RefCell<Weak<NodeInner>>,
    children: RefCell<Vec<Node>>,
}

/// Handle to an element of the scene.
///
/// Cloning a `Node` yields another handle to the same element. Parents own
/// their children; the child-to-parent link is weak.
#[derive(Clone)]
pub struct Node {
    inner: Rc<NodeInner>,
}

impl Node {
    pub fn new(shape: Shape) -> Self {
        Self::build(None, shape)
    }

    pub fn named(id: impl Into<String>, shape: Shape) -> Self {
        Self::build(Some(id.into()), shape)
    }

    fn build(id: Option<String>, shape: Shape) -> Self {
        Self {
            inner: Rc::new(NodeInner {
                id,
                shape,
                layout_x: Observable::new(0.0),
                layout_y: Observable::new(0.0),
                parent: RefCell::new(Weak::new()),
                children: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn region(width: f64, height: f64) -> Self {
        Self::new(Shape::Region(Region::new(width, height)))
    }

    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Shape::Rectangle(Rectangle::new(x, y, width, height)))
    }

    pub fn circle(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self::new(Shape::Circle(Circle::new(center_x, center_y, radius)))
    }

    pub fn ellipse(center_x: f64, center_y: f64, radius_x: f64, radius_y: f64) -> Self {
        Self::new(Shape::Ellipse(Ellipse::new(
            center_x, center_y, radius_x, radius_y,
        )))
    }

    pub fn arc(center_x: f64, center_y: f64, radius_x: f64, radius_y: f64) -> Self {
        Self::new(Shape::Arc(Arc::new(center_x, center_y, radius_x, radius_y)))
    }

    pub fn text(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self::new(Shape::Text(Text::new(x, y, content)))
    }

    pub fn line(start: Point, end: Point) -> Self {
        Self::new(Shape::Line(Line::new(start, end)))
    }

    pub fn polygon(points: Vec<Point>) -> Self {
        Self::new(Shape::Polygon(Polygon { points }))
    }

    pub fn id(&self) -> Option<&str> {
        self.inner.id.as_deref()
    }

    /// The id if set, otherwise the kind name.
    pub fn display_name(&self) -> &str {
        self.id().unwrap_or_else(|| self.inner.shape.kind())
    }

    pub fn shape(&self) -> &Shape {
        &self.inner.shape
    }

    /// Generic offset applied on top of the shape's own geometry.
    pub fn layout_x(&self) -> &Observable<f64> {
        &self.inner.layout_x
    }

    pub fn layout_y(&self) -> &Observable<f64> {
        &self.inner.layout_y
    }

    /// Bounds in the parent's coordinate space.
    pub fn bounds_in_parent(&self) -> BoundingBox {
        let local = self.inner.shape.local_bounds();
        BoundingBox::new(
            local.x + self.inner.layout_x.get(),
            local.y + self.inner.layout_y.get(),
            local.width,
            local.height,
        )
    }

    pub fn parent(&self) -> Option<Node> {
        self.inner
            .parent
            .borrow()
            .upgrade()
            .map(|inner| Node { inner })
    }

    pub fn children(&self) -> Vec<Node> {
        self.inner.children.borrow().clone()
    }

    /// Attach `child` under this node, detaching it from any previous parent.
    pub fn add_child(&self, child: &Node) {
        if let Some(previous) = child.parent() {
            previous.remove_child(child);
        }
        *child.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
        self.inner.children.borrow_mut().push(child.clone());
    }

    /// Detach `child`. Returns false if it was not a child of this node.
    pub fn remove_child(&self, child: &Node) -> bool {
        let mut children = self.inner.children.borrow_mut();
        let before = children.len();
        children.retain(|c| !c.ptr_eq(child));
        let removed = children.len() != before;
        if removed {
            *child.inner.parent.borrow_mut() = Weak::new();
        }
        removed
    }

    pub fn is_parent_of(&self, child: &Node) -> bool {
        child.parent().is_some_and(|parent| parent.ptr_eq(self))
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.inner.id)
            .field("kind", &self.inner.shape.kind())
            .field("children", &self.inner.children.borrow().len())
            .finish()
    }
}
