//! Public anchoring surface for one element

use std::rc::Rc;

use tracing::debug;

use crate::scene::Node;

use super::binding::{AnchorBinding, AnchorKind};
use super::config::AnchorConfig;
use super::engine;
use super::geometry::{AdapterProvider, DefaultAdapters, GeometryAdapter};
use super::types::AnchorPosition;

/// Anchors one observed element to others.
///
/// Every call installs a fresh, independent relationship and hands back its
/// [`AnchorBinding`]; earlier bindings are left untouched. Keep the bindings
/// alive for as long as the relationships should hold.
///
/// ```
/// use anchor_layout::{AnchorController, AnchorPosition, Node};
///
/// let reference = Node::rectangle(200.0, 100.0, 100.0, 100.0);
/// let label = Node::region(70.0, 70.0);
/// let controller = AnchorController::new(label.clone());
/// let _binding = controller.anchor(&reference, AnchorPosition::Right, AnchorPosition::Left);
///
/// assert_eq!(controller.geometry().x(), 130.0);
/// ```
pub struct AnchorController {
    node: Node,
    adapters: Rc<dyn AdapterProvider>,
    config: AnchorConfig,
}

impl AnchorController {
    pub fn new(node: Node) -> Self {
        Self::with_adapters(node, Rc::new(DefaultAdapters))
    }

    pub fn with_adapters(node: Node, adapters: Rc<dyn AdapterProvider>) -> Self {
        Self {
            node,
            adapters,
            config: AnchorConfig::default(),
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Geometry of the observed element as the active provider sees it
    pub fn geometry(&self) -> Rc<dyn GeometryAdapter> {
        self.adapters.adapter_for(&self.node)
    }

    /// The active geometry strategy
    pub fn adapters(&self) -> Rc<dyn AdapterProvider> {
        Rc::clone(&self.adapters)
    }

    /// Swap the geometry strategy. Only affects bindings made afterwards.
    pub fn set_adapters(&mut self, adapters: Rc<dyn AdapterProvider>) {
        self.adapters = adapters;
    }

    pub fn config(&self) -> &AnchorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnchorConfig) {
        self.config = config;
    }

    /// Keep `node_edge` of the observed element on `ref_edge` of `reference`.
    pub fn anchor(
        &self,
        reference: &Node,
        node_edge: AnchorPosition,
        ref_edge: AnchorPosition,
    ) -> AnchorBinding {
        engine::bind(
            &self.node,
            reference,
            node_edge,
            ref_edge,
            self.adapters.as_ref(),
            &self.config,
        )
    }

    /// Like [`anchor`](Self::anchor), against the current parent.
    ///
    /// Without a parent the returned binding is empty.
    pub fn anchor_in_parent(
        &self,
        node_edge: AnchorPosition,
        ref_edge: AnchorPosition,
    ) -> AnchorBinding {
        match self.node.parent() {
            Some(parent) => self.anchor(&parent, node_edge, ref_edge),
            None => self.orphan(AnchorKind::Edge {
                node_edge,
                ref_edge,
            }),
        }
    }

    /// Match all four edges of `reference`.
    pub fn fill(&self, reference: &Node) -> AnchorBinding {
        engine::bind_fill(&self.node, reference, self.adapters.as_ref(), &self.config)
    }

    pub fn fill_in_parent(&self) -> AnchorBinding {
        match self.node.parent() {
            Some(parent) => self.fill(&parent),
            None => self.orphan(AnchorKind::Fill),
        }
    }

    fn orphan(&self, kind: AnchorKind) -> AnchorBinding {
        debug!(observed = self.node.display_name(), %kind, "no parent to anchor to");
        AnchorBinding::inert(kind, self.node.display_name(), "<none>")
    }
}

impl std::fmt::Debug for AnchorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnchorController")
            .field("node", &self.node)
            .field("config", &self.config)
            .finish()
    }
}
