//! TOML scene blueprints
//!
//! A blueprint declares nodes, the anchors between them and a list of
//! geometry updates to apply once everything is bound:
//!
//! ```toml
//! [options]
//! reassert = false
//!
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
//! reference = "r"     # omit to anchor in the parent
//! edge = "right"
//! to = "left"         # or `fill = true` instead of edge/to
//!
//! [[update]]
//! node = "r"
//! property = "width"
//! value = 150
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;
use tracing::debug;

use crate::error::BlueprintError;
use crate::layout::{
    AdapterProvider, AnchorConfig, AnchorController, AnchorPosition, AnchorSet, BoundingBox,
    DefaultAdapters, Dimension, GeometryAdapter, Point,
};
use crate::scene::{Arc, Circle, Ellipse, Line, Node, Polygon, Rectangle, Region, Shape, Text, TextMetrics};

/// Parsed blueprint, not yet turned into a scene
#[derive(Debug, Clone, Deserialize)]
pub struct Blueprint {
    #[serde(default)]
    pub options: Options,
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeSpec>,
    #[serde(default, rename = "anchor")]
    pub anchors: Vec<AnchorSpec>,
    #[serde(default, rename = "update")]
    pub updates: Vec<UpdateSpec>,
}

/// The `[options]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Options {
    pub sync_on_bind: bool,
    pub reassert: bool,
    pub max_cascade_depth: usize,
    pub char_width: f64,
    pub line_height: f64,
}

impl Default for Options {
    fn default() -> Self {
        let config = AnchorConfig::default();
        let metrics = TextMetrics::default();
        Self {
            sync_on_bind: config.sync_on_bind,
            reassert: config.reassert,
            max_cascade_depth: config.max_cascade_depth,
            char_width: metrics.char_width,
            line_height: metrics.line_height,
        }
    }
}

impl Options {
    pub fn anchor_config(&self) -> AnchorConfig {
        AnchorConfig::new()
            .with_sync_on_bind(self.sync_on_bind)
            .with_reassert(self.reassert)
            .with_max_cascade_depth(self.max_cascade_depth)
    }

    pub fn text_metrics(&self) -> TextMetrics {
        TextMetrics {
            char_width: self.char_width,
            line_height: self.line_height,
        }
    }
}

/// One `[[node]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub parent: Option<String>,
    #[serde(flatten)]
    pub geometry: GeometrySpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeometrySpec {
    Region {
        width: f64,
        height: f64,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        center_x: f64,
        center_y: f64,
        radius: f64,
    },
    Ellipse {
        center_x: f64,
        center_y: f64,
        radius_x: f64,
        radius_y: f64,
    },
    Arc {
        center_x: f64,
        center_y: f64,
        radius_x: f64,
        radius_y: f64,
        #[serde(default)]
        start_angle: f64,
        #[serde(default = "full_turn")]
        length: f64,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        #[serde(default)]
        wrapping_width: f64,
    },
    Line {
        start: [f64; 2],
        end: [f64; 2],
    },
    Polygon {
        points: Vec<[f64; 2]>,
    },
}

fn full_turn() -> f64 {
    360.0
}

/// One `[[anchor]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct AnchorSpec {
    pub node: String,
    /// Absent means the node's parent
    pub reference: Option<String>,
    pub edge: Option<AnchorPosition>,
    pub to: Option<AnchorPosition>,
    #[serde(default)]
    pub fill: bool,
}

/// One `[[update]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSpec {
    pub node: String,
    pub property: Dimension,
    pub value: f64,
}

impl Blueprint {
    pub fn from_file(path: &Path) -> Result<Self, BlueprintError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, BlueprintError> {
        Ok(toml::from_str(content)?)
    }

    /// Build the scene with the stock adapters
    pub fn build(&self) -> Result<Scene, BlueprintError> {
        self.build_with(Rc::new(DefaultAdapters))
    }

    /// Create nodes, install anchors, then apply updates in order
    pub fn build_with(&self, adapters: Rc<dyn AdapterProvider>) -> Result<Scene, BlueprintError> {
        let metrics = self.options.text_metrics();
        let mut scene = Scene {
            nodes: Vec::with_capacity(self.nodes.len()),
            by_id: HashMap::new(),
            anchors: AnchorSet::new(),
            adapters,
        };

        for entry in &self.nodes {
            if scene.by_id.contains_key(&entry.id) {
                return Err(BlueprintError::DuplicateNode {
                    name: entry.id.clone(),
                });
            }
            let node = entry.instantiate(metrics)?;
            scene.by_id.insert(entry.id.clone(), node.clone());
            scene.nodes.push(node);
        }

        self.check_parents(&scene)?;
        for entry in &self.nodes {
            if let Some(parent_id) = &entry.parent {
                let parent = scene.lookup(parent_id, "parent")?;
                let child = scene.lookup(&entry.id, "node")?;
                parent.add_child(&child);
            }
        }

        let config = self.options.anchor_config();
        for anchor in &self.anchors {
            scene.install(anchor, &config)?;
        }

        for update in &self.updates {
            scene.apply(update)?;
        }

        debug!(
            nodes = scene.nodes.len(),
            anchors = scene.anchors.len(),
            updates = self.updates.len(),
            "blueprint built"
        );
        Ok(scene)
    }

    fn check_parents(&self, scene: &Scene) -> Result<(), BlueprintError> {
        let parents: HashMap<&str, &str> = self
            .nodes
            .iter()
            .filter_map(|entry| entry.parent.as_deref().map(|p| (entry.id.as_str(), p)))
            .collect();

        for (child, parent) in &parents {
            if !scene.by_id.contains_key(*parent) {
                return Err(BlueprintError::unknown(
                    *parent,
                    "parent",
                    scene.by_id.keys().map(String::as_str),
                ));
            }
            let mut seen = HashSet::from([*child]);
            let mut current = *child;
            while let Some(next) = parents.get(current) {
                if !seen.insert(*next) {
                    return Err(BlueprintError::ParentCycle {
                        name: next.to_string(),
                    });
                }
                current = next;
            }
        }
        Ok(())
    }
}

impl NodeSpec {
    fn instantiate(&self, metrics: TextMetrics) -> Result<Node, BlueprintError> {
        let invalid = |reason: &str| BlueprintError::InvalidGeometry {
            node: self.id.clone(),
            reason: reason.to_string(),
        };
        let non_negative = |values: &[f64], what: &str| {
            if values.iter().any(|v| *v < 0.0 || !v.is_finite()) {
                Err(invalid(&format!("{} must be finite and non-negative", what)))
            } else {
                Ok(())
            }
        };

        let mut offset = (0.0, 0.0);
        let shape = match &self.geometry {
            GeometrySpec::Region {
                width,
                height,
                x,
                y,
            } => {
                non_negative(&[*width, *height], "size")?;
                offset = (*x, *y);
                Shape::Region(Region::new(*width, *height))
            }
            GeometrySpec::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                non_negative(&[*width, *height], "size")?;
                Shape::Rectangle(Rectangle::new(*x, *y, *width, *height))
            }
            GeometrySpec::Circle {
                center_x,
                center_y,
                radius,
            } => {
                non_negative(&[*radius], "radius")?;
                Shape::Circle(Circle::new(*center_x, *center_y, *radius))
            }
            GeometrySpec::Ellipse {
                center_x,
                center_y,
                radius_x,
                radius_y,
            } => {
                non_negative(&[*radius_x, *radius_y], "radius")?;
                Shape::Ellipse(Ellipse::new(*center_x, *center_y, *radius_x, *radius_y))
            }
            GeometrySpec::Arc {
                center_x,
                center_y,
                radius_x,
                radius_y,
                start_angle,
                length,
            } => {
                non_negative(&[*radius_x, *radius_y], "radius")?;
                let arc = Arc::new(*center_x, *center_y, *radius_x, *radius_y);
                arc.start_angle.set(*start_angle);
                arc.length.set(*length);
                Shape::Arc(arc)
            }
            GeometrySpec::Text {
                x,
                y,
                content,
                wrapping_width,
            } => {
                non_negative(&[*wrapping_width], "wrapping_width")?;
                let text = Text::new(*x, *y, content.as_str()).with_metrics(metrics);
                text.wrapping_width.set(*wrapping_width);
                Shape::Text(text)
            }
            GeometrySpec::Line { start, end } => Shape::Line(Line::new(
                Point::new(start[0], start[1]),
                Point::new(end[0], end[1]),
            )),
            GeometrySpec::Polygon { points } => {
                if points.is_empty() {
                    return Err(invalid("polygon needs at least one point"));
                }
                Shape::Polygon(Polygon {
                    points: points.iter().map(|[x, y]| Point::new(*x, *y)).collect(),
                })
            }
        };

        let node = Node::named(self.id.clone(), shape);
        node.layout_x().set(offset.0);
        node.layout_y().set(offset.1);
        Ok(node)
    }
}

/// Nodes built from a blueprint, with their anchors alive
pub struct Scene {
    nodes: Vec<Node>,
    by_id: HashMap<String, Node>,
    anchors: AnchorSet,
    adapters: Rc<dyn AdapterProvider>,
}

impl Scene {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.by_id.get(id)
    }

    /// Nodes in declaration order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    /// Drop every anchor; geometry stays where it is
    pub fn release_anchors(&mut self) {
        self.anchors.clear();
    }

    pub fn geometry(&self, id: &str) -> Option<Rc<dyn GeometryAdapter>> {
        self.node(id).map(|node| self.adapters.adapter_for(node))
    }

    pub fn apply(&self, update: &UpdateSpec) -> Result<(), BlueprintError> {
        let node = self.lookup(&update.node, "update")?;
        debug!(node = %update.node, property = %update.property, value = update.value, "update");
        self.adapters
            .adapter_for(&node)
            .set(update.property, update.value);
        Ok(())
    }

    pub fn report(&self) -> Report {
        Report {
            rows: self
                .nodes
                .iter()
                .map(|node| ReportRow {
                    id: node.display_name().to_string(),
                    kind: node.shape().kind(),
                    bounds: self.adapters.adapter_for(node).bounds(),
                })
                .collect(),
        }
    }

    fn lookup(&self, id: &str, context: &'static str) -> Result<Node, BlueprintError> {
        self.by_id.get(id).cloned().ok_or_else(|| {
            BlueprintError::unknown(id, context, self.by_id.keys().map(String::as_str))
        })
    }

    fn install(&mut self, entry: &AnchorSpec, config: &AnchorConfig) -> Result<(), BlueprintError> {
        let node = self.lookup(&entry.node, "anchor")?;
        let reference = match &entry.reference {
            Some(id) => Some(self.lookup(id, "anchor reference")?),
            None if node.parent().is_none() => {
                return Err(BlueprintError::NoParent {
                    node: entry.node.clone(),
                })
            }
            None => None,
        };

        let mut controller = AnchorController::with_adapters(node, Rc::clone(&self.adapters));
        controller.set_config(config.clone());

        let binding = match (entry.fill, entry.edge, entry.to) {
            (true, None, None) => match &reference {
                Some(reference) => controller.fill(reference),
                None => controller.fill_in_parent(),
            },
            (false, Some(edge), Some(to)) => match &reference {
                Some(reference) => controller.anchor(reference, edge, to),
                None => controller.anchor_in_parent(edge, to),
            },
            (true, _, _) => {
                return Err(BlueprintError::ConflictingAnchor {
                    node: entry.node.clone(),
                })
            }
            (false, _, _) => {
                return Err(BlueprintError::IncompleteAnchor {
                    node: entry.node.clone(),
                })
            }
        };
        self.anchors.hold(binding);
        Ok(())
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("nodes", &self.nodes)
            .field("anchors", &self.anchors)
            .finish()
    }
}

/// Resolved geometry of every node
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub id: String,
    pub kind: &'static str,
    pub bounds: BoundingBox,
}

impl Report {
    pub fn row(&self, id: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.id == id)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.rows.iter().map(|row| row.id.len()).max().unwrap_or(0);
        for row in &self.rows {
            let b = row.bounds;
            writeln!(
                f,
                "{:<width$}  {:<9}  x={} y={} width={} height={}",
                row.id,
                row.kind,
                b.x,
                b.y,
                b.width,
                b.height,
                width = width
            )?;
        }
        Ok(())
    }
}
