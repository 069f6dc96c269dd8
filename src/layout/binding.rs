//! Disposable handles for installed anchor relationships

use std::fmt;

use tracing::debug;

use crate::reactive::Subscription;

use super::rules::Wiring;
use super::types::AnchorPosition;

/// What an [`AnchorBinding`] was created from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Edge {
        node_edge: AnchorPosition,
        ref_edge: AnchorPosition,
    },
    Fill,
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edge {
                node_edge,
                ref_edge,
            } => write!(f, "{}-{}", node_edge, ref_edge),
            Self::Fill => write!(f, "fill"),
        }
    }
}

/// A live anchor relationship between two elements.
///
/// Holds every observer registration installed for the relationship. The
/// relationship holds for as long as the binding lives; dropping it, or
/// calling [`dispose`](Self::dispose), removes all registrations at once.
#[must_use = "dropping an AnchorBinding immediately removes the anchor"]
pub struct AnchorBinding {
    kind: AnchorKind,
    observed: String,
    reference: String,
    is_parent: bool,
    wirings: Vec<Wiring>,
    subscription: Subscription,
}

impl AnchorBinding {
    pub(crate) fn new(
        kind: AnchorKind,
        observed: impl Into<String>,
        reference: impl Into<String>,
        is_parent: bool,
        wirings: Vec<Wiring>,
        subscription: Subscription,
    ) -> Self {
        Self {
            kind,
            observed: observed.into(),
            reference: reference.into(),
            is_parent,
            wirings,
            subscription,
        }
    }

    /// A binding that maintains nothing
    pub(crate) fn inert(
        kind: AnchorKind,
        observed: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self::new(kind, observed, reference, false, Vec::new(), Subscription::empty())
    }

    pub fn kind(&self) -> AnchorKind {
        self.kind
    }

    pub fn observed(&self) -> &str {
        &self.observed
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Whether the reference was the observed element's parent at bind time
    pub fn is_parent(&self) -> bool {
        self.is_parent
    }

    /// The equations this binding maintains
    pub fn wirings(&self) -> &[Wiring] {
        &self.wirings
    }

    /// Number of maintained equations
    pub fn len(&self) -> usize {
        self.wirings.len()
    }

    /// True for bindings that maintain nothing, such as cross-axis pairs
    pub fn is_empty(&self) -> bool {
        self.wirings.is_empty()
    }

    /// Remove every registration of this relationship
    pub fn dispose(self) {
        debug!(
            observed = %self.observed,
            reference = %self.reference,
            kind = %self.kind,
            "anchor disposed"
        );
        self.subscription.cancel();
    }
}

impl fmt::Debug for AnchorBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchorBinding")
            .field("kind", &self.kind)
            .field("observed", &self.observed)
            .field("reference", &self.reference)
            .field("is_parent", &self.is_parent)
            .field("wirings", &self.wirings.len())
            .finish()
    }
}

/// Holds the bindings of one logical scope.
///
/// Everything held is released when the set is dropped or cleared.
#[derive(Default)]
pub struct AnchorSet {
    bindings: Vec<AnchorBinding>,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(&mut self, binding: AnchorBinding) {
        self.bindings.push(binding);
    }

    /// Dispose of every held binding, most recent first
    pub fn clear(&mut self) {
        while let Some(binding) = self.bindings.pop() {
            binding.dispose();
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnchorBinding> {
        self.bindings.iter()
    }
}

impl Extend<AnchorBinding> for AnchorSet {
    fn extend<I: IntoIterator<Item = AnchorBinding>>(&mut self, iter: I) {
        self.bindings.extend(iter);
    }
}

impl fmt::Debug for AnchorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchorSet")
            .field("binding_count", &self.bindings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::layout::rules::Formula;
    use crate::layout::types::{Dimension, Term};
    use crate::reactive::Observable;

    fn counting_binding(source: &Observable<f64>, hits: &Rc<Cell<u32>>) -> AnchorBinding {
        let hits = Rc::clone(hits);
        let sub = source.subscribe(move |_| hits.set(hits.get() + 1));
        AnchorBinding::new(
            AnchorKind::Fill,
            "n",
            "r",
            false,
            vec![Wiring::new(
                Dimension::X,
                Formula::term(Term::reference(Dimension::X)),
            )],
            sub,
        )
    }

    #[test]
    fn test_dispose_removes_registrations() {
        let source = Observable::new(0.0);
        let hits = Rc::new(Cell::new(0));
        let binding = counting_binding(&source, &hits);

        source.set(1.0);
        binding.dispose();
        source.set(2.0);
        assert_eq!(hits.get(), 1);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn test_inert_binding_is_empty() {
        let kind = AnchorKind::Edge {
            node_edge: AnchorPosition::Top,
            ref_edge: AnchorPosition::Left,
        };
        let binding = AnchorBinding::inert(kind, "n", "r");
        assert!(binding.is_empty());
        assert_eq!(binding.kind().to_string(), "top-left");
    }

    #[test]
    fn test_set_clear_releases_everything() {
        let source = Observable::new(0.0);
        let hits = Rc::new(Cell::new(0));
        let mut set = AnchorSet::new();
        set.hold(counting_binding(&source, &hits));
        set.hold(counting_binding(&source, &hits));
        assert_eq!(set.len(), 2);

        source.set(1.0);
        assert_eq!(hits.get(), 2);

        set.clear();
        assert!(set.is_empty());
        source.set(2.0);
        assert_eq!(hits.get(), 2);
    }
}
