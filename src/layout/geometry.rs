//! Uniform geometry access over heterogeneous element kinds
//!
//! The anchoring engine works purely in corner-plus-size space: `x`/`y` is the
//! top-left corner in the parent's coordinate space and `width`/`height` the
//! extent. Each element kind stores its geometry differently, so every kind
//! gets an adapter that translates between the two views.
//!
//! | Kind | Position | Size |
//! |---|---|---|
//! | Region | layout offset | preferred size (min = max = pref on write) |
//! | Rectangle | stored corner | stored size |
//! | Circle | center - radius | 2 * radius for both axes (last write wins) |
//! | Ellipse | center - radius per axis | 2 * radius per axis |
//! | Arc | reads like an ellipse, writes and watches the layout offset | 2 * radius per axis |
//! | Text | stored x/y | width = wrapping width, height read-only |
//! | Line, Polygon | layout offset + local bounds origin | read-only local bounds |
//!
//! Resizing a center-based shape keeps its corner where it was: the center
//! moves with the radius and observers see both changes at once.
//!
//! Adapters are resolved once per element by an [`AdapterProvider`]; the
//! engine then talks to the returned [`GeometryAdapter`] and never looks at
//! the element kind again.

use std::rc::Rc;

use crate::reactive::{Expression, Observable, Source};
use crate::scene::{Arc, Circle, Ellipse, Node, Rectangle, Region, Shape, Text};

use super::types::{BoundingBox, Dimension};

/// Read, write and observe one element's box.
///
/// Setters that make no sense for a kind are silent no-ops. Observers never
/// fail: a quantity that cannot change is reported through a constant
/// [`Expression`] that never fires.
pub trait GeometryAdapter {
    /// Short name of the adapter, for diagnostics
    fn name(&self) -> &'static str;

    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn set_x(&self, value: f64);
    fn set_y(&self, value: f64);
    fn set_width(&self, value: f64);
    fn set_height(&self, value: f64);

    fn observe_x(&self) -> Expression;
    fn observe_y(&self) -> Expression;
    fn observe_width(&self) -> Expression;
    fn observe_height(&self) -> Expression;

    fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::X => self.x(),
            Dimension::Y => self.y(),
            Dimension::Width => self.width(),
            Dimension::Height => self.height(),
        }
    }

    fn set(&self, dimension: Dimension, value: f64) {
        match dimension {
            Dimension::X => self.set_x(value),
            Dimension::Y => self.set_y(value),
            Dimension::Width => self.set_width(value),
            Dimension::Height => self.set_height(value),
        }
    }

    fn observe(&self, dimension: Dimension) -> Expression {
        match dimension {
            Dimension::X => self.observe_x(),
            Dimension::Y => self.observe_y(),
            Dimension::Width => self.observe_width(),
            Dimension::Height => self.observe_height(),
        }
    }

    /// The element's box as this adapter reports it
    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x(), self.y(), self.width(), self.height())
    }
}

/// Chooses the adapter for an element.
pub trait AdapterProvider {
    fn adapter_for(&self, node: &Node) -> Rc<dyn GeometryAdapter>;
}

/// The stock provider covering every [`Shape`] kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAdapters;

impl AdapterProvider for DefaultAdapters {
    fn adapter_for(&self, node: &Node) -> Rc<dyn GeometryAdapter> {
        match node.shape() {
            Shape::Region(region) => Rc::new(BoxAdapter {
                layout_x: node.layout_x().clone(),
                layout_y: node.layout_y().clone(),
                region: region.clone(),
            }),
            Shape::Rectangle(rect) => Rc::new(CornerAdapter { rect: rect.clone() }),
            Shape::Circle(circle) => Rc::new(CircleAdapter {
                circle: circle.clone(),
            }),
            Shape::Ellipse(ellipse) => Rc::new(EllipseAdapter {
                ellipse: ellipse.clone(),
            }),
            Shape::Arc(arc) => Rc::new(ArcAdapter {
                arc: arc.clone(),
                layout_x: node.layout_x().clone(),
                layout_y: node.layout_y().clone(),
            }),
            Shape::Text(text) => Rc::new(TextAdapter { text: text.clone() }),
            Shape::Line(_) | Shape::Polygon(_) => Rc::new(BoundsAdapter { node: node.clone() }),
        }
    }
}

/// Store every write first, then notify, so no observer runs against a
/// half-applied change.
fn write_together(writes: &[(&Observable<f64>, f64)]) {
    let changed: Vec<&Observable<f64>> = writes
        .iter()
        .filter(|(field, value)| field.stage(*value))
        .map(|(field, _)| *field)
        .collect();
    for field in changed {
        field.notify();
    }
}

// ============================================================================
// Region
// ============================================================================

/// Resizable container positioned by its layout offset
pub struct BoxAdapter {
    layout_x: Observable<f64>,
    layout_y: Observable<f64>,
    region: Region,
}

impl GeometryAdapter for BoxAdapter {
    fn name(&self) -> &'static str {
        "box"
    }

    fn x(&self) -> f64 {
        self.layout_x.get()
    }

    fn y(&self) -> f64 {
        self.layout_y.get()
    }

    fn width(&self) -> f64 {
        self.region.pref_width.get()
    }

    fn height(&self) -> f64 {
        self.region.pref_height.get()
    }

    fn set_x(&self, value: f64) {
        self.layout_x.set(value);
    }

    fn set_y(&self, value: f64) {
        self.layout_y.set(value);
    }

    // Bounds first so that observers of the preferred size see a consistent region.
    fn set_width(&self, value: f64) {
        self.region.min_width.set(value);
        self.region.max_width.set(value);
        self.region.pref_width.set(value);
    }

    fn set_height(&self, value: f64) {
        self.region.min_height.set(value);
        self.region.max_height.set(value);
        self.region.pref_height.set(value);
    }

    fn observe_x(&self) -> Expression {
        Expression::of(&self.layout_x)
    }

    fn observe_y(&self) -> Expression {
        Expression::of(&self.layout_y)
    }

    fn observe_width(&self) -> Expression {
        Expression::of(&self.region.pref_width)
    }

    fn observe_height(&self) -> Expression {
        Expression::of(&self.region.pref_height)
    }
}

// ============================================================================
// Rectangle
// ============================================================================

/// Corner-based rectangle; every quantity is stored as is
pub struct CornerAdapter {
    rect: Rectangle,
}

impl GeometryAdapter for CornerAdapter {
    fn name(&self) -> &'static str {
        "corner"
    }

    fn x(&self) -> f64 {
        self.rect.x.get()
    }

    fn y(&self) -> f64 {
        self.rect.y.get()
    }

    fn width(&self) -> f64 {
        self.rect.width.get()
    }

    fn height(&self) -> f64 {
        self.rect.height.get()
    }

    fn set_x(&self, value: f64) {
        self.rect.x.set(value);
    }

    fn set_y(&self, value: f64) {
        self.rect.y.set(value);
    }

    fn set_width(&self, value: f64) {
        self.rect.width.set(value);
    }

    fn set_height(&self, value: f64) {
        self.rect.height.set(value);
    }

    fn observe_x(&self) -> Expression {
        Expression::of(&self.rect.x)
    }

    fn observe_y(&self) -> Expression {
        Expression::of(&self.rect.y)
    }

    fn observe_width(&self) -> Expression {
        Expression::of(&self.rect.width)
    }

    fn observe_height(&self) -> Expression {
        Expression::of(&self.rect.height)
    }
}

// ============================================================================
// Circle
// ============================================================================

/// Center + single radius. Width and height share the radius, so writing
/// one overwrites the other.
pub struct CircleAdapter {
    circle: Circle,
}

impl CircleAdapter {
    fn resize(&self, radius: f64) {
        let (x, y) = (self.x(), self.y());
        write_together(&[
            (&self.circle.radius, radius),
            (&self.circle.center_x, x + radius),
            (&self.circle.center_y, y + radius),
        ]);
    }
}

impl GeometryAdapter for CircleAdapter {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn x(&self) -> f64 {
        self.circle.center_x.get() - self.circle.radius.get()
    }

    fn y(&self) -> f64 {
        self.circle.center_y.get() - self.circle.radius.get()
    }

    fn width(&self) -> f64 {
        self.circle.radius.get() * 2.0
    }

    fn height(&self) -> f64 {
        self.circle.radius.get() * 2.0
    }

    fn set_x(&self, value: f64) {
        self.circle.center_x.set(value + self.circle.radius.get());
    }

    fn set_y(&self, value: f64) {
        self.circle.center_y.set(value + self.circle.radius.get());
    }

    fn set_width(&self, value: f64) {
        self.resize(value / 2.0);
    }

    fn set_height(&self, value: f64) {
        self.resize(value / 2.0);
    }

    fn observe_x(&self) -> Expression {
        Expression::difference(&self.circle.center_x, &self.circle.radius)
    }

    fn observe_y(&self) -> Expression {
        Expression::difference(&self.circle.center_y, &self.circle.radius)
    }

    fn observe_width(&self) -> Expression {
        Expression::scaled(&self.circle.radius, 2.0)
    }

    fn observe_height(&self) -> Expression {
        Expression::scaled(&self.circle.radius, 2.0)
    }
}

// ============================================================================
// Ellipse
// ============================================================================

pub struct EllipseAdapter {
    ellipse: Ellipse,
}

impl GeometryAdapter for EllipseAdapter {
    fn name(&self) -> &'static str {
        "ellipse"
    }

    fn x(&self) -> f64 {
        self.ellipse.center_x.get() - self.ellipse.radius_x.get()
    }

    fn y(&self) -> f64 {
        self.ellipse.center_y.get() - self.ellipse.radius_y.get()
    }

    fn width(&self) -> f64 {
        self.ellipse.radius_x.get() * 2.0
    }

    fn height(&self) -> f64 {
        self.ellipse.radius_y.get() * 2.0
    }

    fn set_x(&self, value: f64) {
        self.ellipse
            .center_x
            .set(value + self.ellipse.radius_x.get());
    }

    fn set_y(&self, value: f64) {
        self.ellipse
            .center_y
            .set(value + self.ellipse.radius_y.get());
    }

    fn set_width(&self, value: f64) {
        let radius = value / 2.0;
        write_together(&[
            (&self.ellipse.radius_x, radius),
            (&self.ellipse.center_x, self.x() + radius),
        ]);
    }

    fn set_height(&self, value: f64) {
        let radius = value / 2.0;
        write_together(&[
            (&self.ellipse.radius_y, radius),
            (&self.ellipse.center_y, self.y() + radius),
        ]);
    }

    fn observe_x(&self) -> Expression {
        Expression::difference(&self.ellipse.center_x, &self.ellipse.radius_x)
    }

    fn observe_y(&self) -> Expression {
        Expression::difference(&self.ellipse.center_y, &self.ellipse.radius_y)
    }

    fn observe_width(&self) -> Expression {
        Expression::scaled(&self.ellipse.radius_x, 2.0)
    }

    fn observe_height(&self) -> Expression {
        Expression::scaled(&self.ellipse.radius_y, 2.0)
    }
}

// ============================================================================
// Arc
// ============================================================================

/// Reads position like an ellipse but writes and watches the layout offset.
///
/// A position written through this adapter is therefore not visible through
/// `x()`/`y()`, only through `observe_x()`/`observe_y()`.
pub struct ArcAdapter {
    arc: Arc,
    layout_x: Observable<f64>,
    layout_y: Observable<f64>,
}

impl GeometryAdapter for ArcAdapter {
    fn name(&self) -> &'static str {
        "arc"
    }

    fn x(&self) -> f64 {
        self.arc.center_x.get() - self.arc.radius_x.get()
    }

    fn y(&self) -> f64 {
        self.arc.center_y.get() - self.arc.radius_y.get()
    }

    fn width(&self) -> f64 {
        self.arc.radius_x.get() * 2.0
    }

    fn height(&self) -> f64 {
        self.arc.radius_y.get() * 2.0
    }

    fn set_x(&self, value: f64) {
        self.layout_x.set(value);
    }

    fn set_y(&self, value: f64) {
        self.layout_y.set(value);
    }

    fn set_width(&self, value: f64) {
        let radius = value / 2.0;
        write_together(&[
            (&self.arc.radius_x, radius),
            (&self.arc.center_x, self.x() + radius),
        ]);
    }

    fn set_height(&self, value: f64) {
        let radius = value / 2.0;
        write_together(&[
            (&self.arc.radius_y, radius),
            (&self.arc.center_y, self.y() + radius),
        ]);
    }

    fn observe_x(&self) -> Expression {
        Expression::of(&self.layout_x)
    }

    fn observe_y(&self) -> Expression {
        Expression::of(&self.layout_y)
    }

    fn observe_width(&self) -> Expression {
        Expression::scaled(&self.arc.radius_x, 2.0)
    }

    fn observe_height(&self) -> Expression {
        Expression::scaled(&self.arc.radius_y, 2.0)
    }
}

// ============================================================================
// Text
// ============================================================================

/// Text block: width is the wrapping width, height follows the wrapped
/// line count and cannot be set. The height is watched through both the
/// wrapping width and the content.
pub struct TextAdapter {
    text: Text,
}

impl GeometryAdapter for TextAdapter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn x(&self) -> f64 {
        self.text.x.get()
    }

    fn y(&self) -> f64 {
        self.text.y.get()
    }

    fn width(&self) -> f64 {
        self.text.wrapping_width.get()
    }

    fn height(&self) -> f64 {
        self.text.text_height()
    }

    fn set_x(&self, value: f64) {
        self.text.x.set(value);
    }

    fn set_y(&self, value: f64) {
        self.text.y.set(value);
    }

    fn set_width(&self, value: f64) {
        self.text.wrapping_width.set(value);
    }

    fn set_height(&self, _value: f64) {}

    fn observe_x(&self) -> Expression {
        Expression::of(&self.text.x)
    }

    fn observe_y(&self) -> Expression {
        Expression::of(&self.text.y)
    }

    fn observe_width(&self) -> Expression {
        Expression::of(&self.text.wrapping_width)
    }

    fn observe_height(&self) -> Expression {
        let sources: Vec<Rc<dyn Source>> = vec![
            Rc::new(self.text.wrapping_width.clone()),
            Rc::new(self.text.content.clone()),
        ];
        let text = self.text.clone();
        Expression::watching(sources, move || text.text_height())
    }
}

// ============================================================================
// Fallback
// ============================================================================

/// Generic bounds-based adapter for kinds without resizable geometry.
///
/// Position is the layout offset plus the local bounds origin; writes move
/// the layout offset so a subsequent read returns the written value. Size is
/// read-only.
pub struct BoundsAdapter {
    node: Node,
}

impl BoundsAdapter {
    /// Stored fields the local bounds depend on, per axis
    fn sources(&self, horizontal: bool) -> Vec<Observable<f64>> {
        match self.node.shape() {
            Shape::Line(line) if horizontal => vec![line.start_x.clone(), line.end_x.clone()],
            Shape::Line(line) => vec![line.start_y.clone(), line.end_y.clone()],
            _ => Vec::new(),
        }
    }

    fn watch(&self, horizontal: bool, offset: Option<&Observable<f64>>) -> Expression {
        let mut sources = self.sources(horizontal);
        sources.extend(offset.cloned());
        if sources.is_empty() {
            return Expression::zero();
        }
        let node = self.node.clone();
        let with_offset = offset.is_some();
        Expression::derived(sources, move || {
            let bounds = if with_offset {
                node.bounds_in_parent()
            } else {
                node.shape().local_bounds()
            };
            match (horizontal, with_offset) {
                (true, true) => bounds.x,
                (false, true) => bounds.y,
                (true, false) => bounds.width,
                (false, false) => bounds.height,
            }
        })
    }
}

impl GeometryAdapter for BoundsAdapter {
    fn name(&self) -> &'static str {
        "bounds"
    }

    fn x(&self) -> f64 {
        self.node.bounds_in_parent().x
    }

    fn y(&self) -> f64 {
        self.node.bounds_in_parent().y
    }

    fn width(&self) -> f64 {
        self.node.shape().local_bounds().width
    }

    fn height(&self) -> f64 {
        self.node.shape().local_bounds().height
    }

    fn set_x(&self, value: f64) {
        let local = self.node.shape().local_bounds();
        self.node.layout_x().set(value - local.x);
    }

    fn set_y(&self, value: f64) {
        let local = self.node.shape().local_bounds();
        self.node.layout_y().set(value - local.y);
    }

    fn set_width(&self, _value: f64) {}

    fn set_height(&self, _value: f64) {}

    fn observe_x(&self) -> Expression {
        self.watch(true, Some(self.node.layout_x()))
    }

    fn observe_y(&self) -> Expression {
        self.watch(false, Some(self.node.layout_y()))
    }

    fn observe_width(&self) -> Expression {
        self.watch(true, None)
    }

    fn observe_height(&self) -> Expression {
        self.watch(false, None)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::layout::types::Point;

    fn adapter(node: &Node) -> Rc<dyn GeometryAdapter> {
        DefaultAdapters.adapter_for(node)
    }

    #[test]
    fn test_provider_picks_adapter_by_kind() {
        let cases = [
            (Node::region(1.0, 1.0), "box"),
            (Node::rectangle(0.0, 0.0, 1.0, 1.0), "corner"),
            (Node::circle(0.0, 0.0, 1.0), "circle"),
            (Node::ellipse(0.0, 0.0, 1.0, 1.0), "ellipse"),
            (Node::arc(0.0, 0.0, 1.0, 1.0), "arc"),
            (Node::text(0.0, 0.0, "a"), "text"),
            (Node::line(Point::new(0.0, 0.0), Point::new(1.0, 1.0)), "bounds"),
            (Node::polygon(vec![Point::new(0.0, 0.0)]), "bounds"),
        ];
        for (node, expected) in cases {
            assert_eq!(adapter(&node).name(), expected, "{:?}", node);
        }
    }

    #[test]
    fn test_region_size_sets_min_max_pref() {
        let node = Node::region(10.0, 10.0);
        adapter(&node).set_width(80.0);
        let Shape::Region(region) = node.shape() else {
            panic!("not a region");
        };
        assert_eq!(region.pref_width.get(), 80.0);
        assert_eq!(region.min_width.get(), 80.0);
        assert_eq!(region.max_width.get(), 80.0);
    }

    #[test]
    fn test_circle_translates_center() {
        let node = Node::circle(100.0, 100.0, 20.0);
        let geom = adapter(&node);
        assert_eq!(geom.bounds(), BoundingBox::new(80.0, 80.0, 40.0, 40.0));

        geom.set_x(0.0);
        let Shape::Circle(circle) = node.shape() else {
            panic!("not a circle");
        };
        assert_eq!(circle.center_x.get(), 20.0);
        assert_eq!(geom.x(), 0.0);
    }

    #[test]
    fn test_circle_size_last_write_wins() {
        let node = Node::circle(0.0, 0.0, 10.0);
        let geom = adapter(&node);
        geom.set_width(100.0);
        geom.set_height(40.0);
        assert_eq!(geom.width(), 40.0);
        assert_eq!(geom.height(), 40.0);
    }

    #[test]
    fn test_circle_resize_keeps_corner() {
        let node = Node::circle(100.0, 100.0, 20.0);
        let geom = adapter(&node);
        let corner_seen = Rc::new(Cell::new((0.0, 0.0)));
        let (corner_cb, geom_cb) = (Rc::clone(&corner_seen), Rc::clone(&geom));
        let _sub = geom
            .observe_height()
            .subscribe(move |_| corner_cb.set((geom_cb.x(), geom_cb.y())));

        geom.set_height(100.0);
        assert_eq!(geom.bounds(), BoundingBox::new(80.0, 80.0, 100.0, 100.0));
        // Observers never see the center and radius out of step.
        assert_eq!(corner_seen.get(), (80.0, 80.0));
    }

    #[test]
    fn test_arc_resize_keeps_corner() {
        let node = Node::arc(50.0, 50.0, 10.0, 10.0);
        let geom = adapter(&node);
        geom.set_width(40.0);
        let Shape::Arc(arc) = node.shape() else {
            panic!("not an arc");
        };
        assert_eq!(arc.center_x.get(), 60.0);
        assert_eq!(geom.x(), 40.0);
        assert_eq!(geom.width(), 40.0);
    }

    #[test]
    fn test_text_height_observed_on_content_edit() {
        let node = Node::text(0.0, 0.0, "abcdefghij");
        let geom = adapter(&node);
        geom.set_width(100.0);
        let seen = Rc::new(Cell::new(0.0));
        let seen_cb = Rc::clone(&seen);
        let _sub = geom.observe_height().subscribe(move |h| seen_cb.set(h));

        let Shape::Text(text) = node.shape() else {
            panic!("not a text");
        };
        text.content.set("abcdefghijabcdefghij".to_string());
        assert_eq!(seen.get(), 32.0);
    }

    #[test]
    fn test_ellipse_independent_radii() {
        let node = Node::ellipse(50.0, 50.0, 10.0, 10.0);
        let geom = adapter(&node);
        geom.set_width(60.0);
        geom.set_height(20.0);
        assert_eq!(geom.bounds(), BoundingBox::new(40.0, 40.0, 60.0, 20.0));
    }

    #[test]
    fn test_arc_writes_layout_offset() {
        let node = Node::arc(50.0, 50.0, 10.0, 10.0);
        let geom = adapter(&node);
        geom.set_x(5.0);
        assert_eq!(node.layout_x().get(), 5.0);
        // Reads still go through the center.
        assert_eq!(geom.x(), 40.0);
        assert_eq!(geom.observe_x().get(), 5.0);
    }

    #[test]
    fn test_text_height_is_read_only() {
        let node = Node::text(0.0, 0.0, "TOTO");
        let geom = adapter(&node);
        geom.set_height(500.0);
        assert_eq!(geom.height(), 16.0);

        geom.set_width(100.0);
        assert_eq!(geom.width(), 100.0);
    }

    #[test]
    fn test_text_height_observed_on_rewrap() {
        let node = Node::text(0.0, 0.0, "abcdefghij");
        let geom = adapter(&node);
        let seen = Rc::new(Cell::new(0.0));
        let seen_cb = Rc::clone(&seen);
        let _sub = geom.observe_height().subscribe(move |h| seen_cb.set(h));

        geom.set_width(35.0);
        assert_eq!(seen.get(), 32.0);
    }

    #[test]
    fn test_bounds_adapter_round_trip() {
        let node = Node::line(Point::new(10.0, 20.0), Point::new(40.0, 60.0));
        let geom = adapter(&node);
        assert_eq!(geom.bounds(), BoundingBox::new(10.0, 20.0, 30.0, 40.0));

        geom.set_x(100.0);
        geom.set_y(0.0);
        assert_eq!(geom.x(), 100.0);
        assert_eq!(geom.y(), 0.0);
        assert_eq!(node.layout_x().get(), 90.0);

        geom.set_width(5.0);
        assert_eq!(geom.width(), 30.0);
    }

    #[test]
    fn test_bounds_adapter_observes_endpoints() {
        let node = Node::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let geom = adapter(&node);
        let width = Rc::new(Cell::new(0.0));
        let width_cb = Rc::clone(&width);
        let _sub = geom.observe_width().subscribe(move |w| width_cb.set(w));

        let Shape::Line(line) = node.shape() else {
            panic!("not a line");
        };
        line.end_x.set(25.0);
        assert_eq!(width.get(), 25.0);
    }

    #[test]
    fn test_polygon_size_handle_is_neutral() {
        let node = Node::polygon(vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
        let geom = adapter(&node);
        assert!(geom.observe_width().is_constant());
        assert_eq!(geom.observe_width().get(), 0.0);
        assert!(!geom.observe_x().is_constant());
    }

    #[test]
    fn test_writes_are_observable() {
        let nodes = [
            Node::region(10.0, 10.0),
            Node::rectangle(0.0, 0.0, 10.0, 10.0),
            Node::circle(0.0, 0.0, 5.0),
            Node::ellipse(0.0, 0.0, 5.0, 5.0),
            Node::arc(0.0, 0.0, 5.0, 5.0),
            Node::text(0.0, 0.0, "abc"),
            Node::line(Point::new(0.0, 0.0), Point::new(10.0, 10.0)),
        ];
        for node in nodes {
            let geom = adapter(&node);
            for dimension in [Dimension::X, Dimension::Y] {
                let fired = Rc::new(Cell::new(false));
                let fired_cb = Rc::clone(&fired);
                let _sub = geom.observe(dimension).subscribe(move |_| fired_cb.set(true));
                geom.set(dimension, 33.0);
                assert!(fired.get(), "{} write to {} not observed", geom.name(), dimension);
            }
        }
    }
}
