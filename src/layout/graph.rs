//! Dependency graph over the quantities a binding touches
//!
//! Each wiring contributes one edge per trigger, from the trigger to the
//! wiring's target. A wiring that lists its own target as a trigger (the
//! re-assertion case) adds a self-edge, which is ignored: writing the value a
//! quantity already has is a no-op, so it cannot feed a loop.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

use super::rules::Wiring;
use super::types::{Dimension, Side, Term};

/// The quantities left over when a wiring set contains a loop
#[derive(Debug, Clone, PartialEq, Error)]
#[error("circular wiring between {}", format_terms(.remaining))]
pub struct CycleError {
    pub remaining: Vec<Term>,
}

fn format_terms(terms: &[Term]) -> String {
    terms
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// Stable ordering so that results do not depend on hash order.
fn key(term: Term) -> (u8, u8) {
    let side = match term.side {
        Side::Reference => 0,
        Side::Observed => 1,
    };
    let dimension = match term.dimension {
        Dimension::Width => 0,
        Dimension::Height => 1,
        Dimension::X => 2,
        Dimension::Y => 3,
    };
    (side, dimension)
}

/// Directed trigger -> target graph
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: BTreeMap<(u8, u8), BTreeSet<(u8, u8)>>,
    terms: BTreeMap<(u8, u8), Term>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_wirings<'a>(wirings: impl IntoIterator<Item = &'a Wiring>) -> Self {
        let mut graph = Self::new();
        for wiring in wirings {
            graph.add_wiring(wiring);
        }
        graph
    }

    pub fn add_wiring(&mut self, wiring: &Wiring) {
        let target = wiring.target_term();
        self.add_term(target);
        for trigger in wiring.triggers() {
            self.add_term(trigger);
            if trigger != target {
                self.edges.entry(key(trigger)).or_default().insert(key(target));
            }
        }
    }

    fn add_term(&mut self, term: Term) {
        self.terms.entry(key(term)).or_insert(term);
        self.edges.entry(key(term)).or_default();
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    pub fn depends_on(&self, target: Term, trigger: Term) -> bool {
        self.edges
            .get(&key(trigger))
            .is_some_and(|targets| targets.contains(&key(target)))
    }

    /// Kahn's algorithm. Quantities nothing depends on come first.
    pub fn topological_order(&self) -> Result<Vec<Term>, CycleError> {
        let mut in_degree: BTreeMap<(u8, u8), usize> =
            self.terms.keys().map(|k| (*k, 0)).collect();
        for targets in self.edges.values() {
            for target in targets {
                *in_degree.entry(*target).or_insert(0) += 1;
            }
        }

        let mut queue: Vec<(u8, u8)> = in_degree
            .iter()
            .filter(|(_, &deg)| deg == 0)
            .map(|(k, _)| *k)
            .rev()
            .collect();

        let mut result = Vec::with_capacity(self.terms.len());
        while let Some(node) = queue.pop() {
            if let Some(term) = self.terms.get(&node) {
                result.push(*term);
            }
            if let Some(targets) = self.edges.get(&node) {
                for target in targets {
                    if let Some(deg) = in_degree.get_mut(target) {
                        *deg -= 1;
                        if *deg == 0 {
                            queue.push(*target);
                        }
                    }
                }
            }
        }

        if result.len() < self.terms.len() {
            let remaining = in_degree
                .iter()
                .filter(|(_, &deg)| deg > 0)
                .filter_map(|(k, _)| self.terms.get(k).copied())
                .collect();
            return Err(CycleError { remaining });
        }

        Ok(result)
    }

    /// Length of the longest propagation chain, in writes.
    ///
    /// One external change can cause at most this many nested propagated
    /// writes per path through the graph.
    pub fn longest_chain(&self) -> Result<usize, CycleError> {
        let order = self.topological_order()?;
        let mut depth: BTreeMap<(u8, u8), usize> = BTreeMap::new();
        let mut longest = 0;
        for term in order {
            let here = depth.get(&key(term)).copied().unwrap_or(0);
            longest = longest.max(here);
            if let Some(targets) = self.edges.get(&key(term)) {
                for target in targets {
                    let entry = depth.entry(*target).or_insert(0);
                    *entry = (*entry).max(here + 1);
                }
            }
        }
        Ok(longest)
    }
}

impl fmt::Display for DependencyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (from, targets) in &self.edges {
            for to in targets {
                if let (Some(from), Some(to)) = (self.terms.get(from), self.terms.get(to)) {
                    writeln!(f, "{} -> {}", from, to)?;
                }
            }
        }
        Ok(())
    }
}
