//! Installs rule-table wirings as live observer registrations
//!
//! For each wiring the engine subscribes to every trigger quantity; when one
//! fires, the wiring's formula is re-evaluated against the current geometry
//! and written to the observed element through its adapter. Propagation is
//! synchronous and may re-enter: a write made here can fire further
//! registrations before the original notification returns. Chains end
//! because writing an unchanged value notifies nobody.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::reactive::Subscription;
use crate::scene::Node;

use super::binding::{AnchorBinding, AnchorKind};
use super::config::AnchorConfig;
use super::geometry::{AdapterProvider, GeometryAdapter};
use super::graph::DependencyGraph;
use super::rules::{wirings_for, Wiring, FILL_PAIRS};
use super::types::{AnchorPosition, Side, Term};

/// Both ends of a relationship, resolved to adapters once
struct Pair {
    observed: Rc<dyn GeometryAdapter>,
    reference: Rc<dyn GeometryAdapter>,
    observed_name: Rc<str>,
}

impl Pair {
    fn value(&self, term: Term) -> f64 {
        match term.side {
            Side::Observed => self.observed.get(term.dimension),
            Side::Reference => self.reference.get(term.dimension),
        }
    }

    fn adapter(&self, side: Side) -> &Rc<dyn GeometryAdapter> {
        match side {
            Side::Observed => &self.observed,
            Side::Reference => &self.reference,
        }
    }
}

/// Anchor `node_edge` of `observed` to `ref_edge` of `reference`.
///
/// Whether `reference` is the parent of `observed` is decided here, once;
/// later reparenting does not change the installed formulas. A cross-axis
/// pair yields an empty binding.
pub fn bind(
    observed: &Node,
    reference: &Node,
    node_edge: AnchorPosition,
    ref_edge: AnchorPosition,
    adapters: &dyn AdapterProvider,
    config: &AnchorConfig,
) -> AnchorBinding {
    let kind = AnchorKind::Edge {
        node_edge,
        ref_edge,
    };
    let is_parent = reference.is_parent_of(observed);
    match wirings_for(node_edge, ref_edge, is_parent) {
        Some(wirings) => install(observed, reference, kind, is_parent, wirings, adapters, config),
        None => {
            debug!(
                observed = observed.display_name(),
                reference = reference.display_name(),
                %kind,
                "cross-axis anchor, nothing to maintain"
            );
            AnchorBinding::inert(kind, observed.display_name(), reference.display_name())
        }
    }
}

/// Bind all four edges of `observed` to the same edges of `reference`.
pub fn bind_fill(
    observed: &Node,
    reference: &Node,
    adapters: &dyn AdapterProvider,
    config: &AnchorConfig,
) -> AnchorBinding {
    let is_parent = reference.is_parent_of(observed);
    let wirings = FILL_PAIRS
        .iter()
        .filter_map(|(node_edge, ref_edge)| wirings_for(*node_edge, *ref_edge, is_parent))
        .flatten()
        .collect();
    install(
        observed,
        reference,
        AnchorKind::Fill,
        is_parent,
        wirings,
        adapters,
        config,
    )
}

fn install(
    observed: &Node,
    reference: &Node,
    kind: AnchorKind,
    is_parent: bool,
    wirings: Vec<Wiring>,
    adapters: &dyn AdapterProvider,
    config: &AnchorConfig,
) -> AnchorBinding {
    let pair = Rc::new(Pair {
        observed: adapters.adapter_for(observed),
        reference: adapters.adapter_for(reference),
        observed_name: Rc::from(observed.display_name()),
    });
    let graph = DependencyGraph::from_wirings(&wirings);
    let guard = Rc::new(CascadeGuard::default());

    let mut subscriptions = Vec::new();
    for wiring in &wirings {
        let apply = propagator(&pair, wiring, &guard, config.max_cascade_depth);
        let mut triggers: Vec<Term> = wiring.triggers().collect();
        if config.reassert {
            triggers.push(wiring.target_term());
        }
        for trigger in triggers {
            let apply = Rc::clone(&apply);
            let handle = pair.adapter(trigger.side).observe(trigger.dimension);
            subscriptions.push(handle.subscribe(move |_| apply()));
        }
    }

    debug!(
        observed = observed.display_name(),
        reference = reference.display_name(),
        %kind,
        is_parent,
        wirings = wirings.len(),
        registrations = subscriptions.len(),
        adapter = pair.observed.name(),
        "anchor installed"
    );

    if config.sync_on_bind {
        sync(&pair, &wirings, &graph);
    }

    AnchorBinding::new(
        kind,
        observed.display_name(),
        reference.display_name(),
        is_parent,
        wirings,
        Subscription::merge(subscriptions),
    )
}

/// Depth of re-entrant propagation within one binding.
///
/// Once the limit is hit, every write of the binding is dropped until the
/// outermost propagation returns.
#[derive(Default)]
struct CascadeGuard {
    depth: Cell<usize>,
    halted: Cell<bool>,
}

/// The callback run whenever one of a wiring's triggers changes.
fn propagator(
    pair: &Rc<Pair>,
    wiring: &Wiring,
    guard: &Rc<CascadeGuard>,
    max_depth: usize,
) -> Rc<dyn Fn()> {
    let pair = Rc::clone(pair);
    let wiring = wiring.clone();
    let guard = Rc::clone(guard);
    Rc::new(move || {
        if guard.halted.get() {
            return;
        }
        let level = guard.depth.get();
        if level >= max_depth {
            guard.halted.set(true);
            warn!(
                observed = %pair.observed_name,
                wiring = %wiring,
                max_depth,
                "propagation cascade too deep, dropping writes"
            );
            return;
        }
        guard.depth.set(level + 1);
        let value = wiring.formula.evaluate(|term| pair.value(term));
        trace!(observed = %pair.observed_name, wiring = %wiring, value, "propagate");
        pair.observed.set(wiring.target, value);
        guard.depth.set(level);
        if level == 0 {
            guard.halted.set(false);
        }
    })
}

/// Apply every wiring once, upstream targets first.
fn sync(pair: &Pair, wirings: &[Wiring], graph: &DependencyGraph) {
    let order = match graph.topological_order() {
        Ok(order) => order,
        Err(err) => {
            warn!(observed = %pair.observed_name, %err, "syncing in declaration order");
            Vec::new()
        }
    };
    let rank = |wiring: &Wiring| {
        order
            .iter()
            .position(|term| *term == wiring.target_term())
            .unwrap_or(order.len())
    };
    let mut ordered: Vec<&Wiring> = wirings.iter().collect();
    ordered.sort_by_key(|&wiring| rank(wiring));
    for wiring in ordered {
        let value = wiring.formula.evaluate(|term| pair.value(term));
        pair.observed.set(wiring.target, value);
    }
}
