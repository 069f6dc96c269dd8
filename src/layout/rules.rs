//! The anchoring rule table
//!
//! Every supported (node edge, reference edge, is-parent) combination maps to
//! a small set of [`Wiring`]s. A wiring says "keep this quantity of the
//! observed element equal to this linear formula", and lists the quantities
//! whose changes must re-evaluate it. The table works purely in
//! corner-plus-size space; shape kinds never appear here.
//!
//! For a same-axis pair along axis `a` (position `p`, size `s`) with cross
//! axis `c`:
//!
//! ```text
//! N.s(c) = R.s(c)                                          cross-fill
//! N.p(a) = [R.p(a) unless parent] + [R.s(a) if ref edge is far]
//!                                 - [N.s(a) if node edge is far]
//! N.p(c) = parent ? 0 : R.p(c)
//! ```
//!
//! In the parent case with both edges near (LEFT-LEFT, TOP-TOP) the main
//! position is left alone, since `N` already originates inside `R`.

use std::fmt;

use super::types::{AnchorPosition, Dimension, Term};

/// Linear combination of terms plus a constant
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    pub terms: Vec<(f64, Term)>,
    pub constant: f64,
}

impl Formula {
    pub fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    pub fn term(term: Term) -> Self {
        Self::constant(0.0).plus(term)
    }

    pub fn plus(mut self, term: Term) -> Self {
        self.terms.push((1.0, term));
        self
    }

    pub fn minus(mut self, term: Term) -> Self {
        self.terms.push((-1.0, term));
        self
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate with `lookup` supplying each term's current value
    pub fn evaluate(&self, lookup: impl Fn(Term) -> f64) -> f64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, (coefficient, term)| {
                acc + coefficient * lookup(*term)
            })
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "{}", self.constant);
        }
        for (i, (coefficient, term)) in self.terms.iter().enumerate() {
            match (i, *coefficient < 0.0) {
                (0, false) => write!(f, "{}", term)?,
                (0, true) => write!(f, "-{}", term)?,
                (_, false) => write!(f, " + {}", term)?,
                (_, true) => write!(f, " - {}", term)?,
            }
        }
        if self.constant != 0.0 {
            write!(f, " + {}", self.constant)?;
        }
        Ok(())
    }
}

/// One maintained equation: `N.target = formula`
#[derive(Debug, Clone, PartialEq)]
pub struct Wiring {
    pub target: Dimension,
    pub formula: Formula,
}

impl Wiring {
    pub fn new(target: Dimension, formula: Formula) -> Self {
        Self { target, formula }
    }

    /// Every quantity whose change re-evaluates this wiring
    pub fn triggers(&self) -> impl Iterator<Item = Term> + '_ {
        self.formula.terms.iter().map(|(_, term)| *term)
    }

    /// Same formula, but also re-evaluated when the observed target itself changes
    pub fn target_term(&self) -> Term {
        Term::observed(self.target)
    }
}

impl fmt::Display for Wiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N.{} = {}", self.target, self.formula)
    }
}

/// Wirings for one edge pairing, or `None` for cross-axis pairs.
///
/// Size wirings come first so that a caller applying the list in order sees
/// final sizes before positions that depend on them.
pub fn wirings_for(
    node_edge: AnchorPosition,
    ref_edge: AnchorPosition,
    is_parent: bool,
) -> Option<Vec<Wiring>> {
    let axis = node_edge.axis();
    if ref_edge.axis() != axis {
        return None;
    }
    let cross = axis.cross();
    let mut wirings = vec![Wiring::new(
        cross.size(),
        Formula::term(Term::reference(cross.size())),
    )];

    let node_far = node_edge.is_far();
    let ref_far = ref_edge.is_far();
    if !(is_parent && !node_far && !ref_far) {
        let mut main = Formula::constant(0.0);
        if !is_parent {
            main = main.plus(Term::reference(axis.position()));
        }
        if ref_far {
            main = main.plus(Term::reference(axis.size()));
        }
        if node_far {
            main = main.minus(Term::observed(axis.size()));
        }
        wirings.push(Wiring::new(axis.position(), main));

        let secondary = if is_parent {
            Formula::constant(0.0)
        } else {
            Formula::term(Term::reference(cross.position()))
        };
        wirings.push(Wiring::new(cross.position(), secondary));
    }

    Some(wirings)
}

/// The four same-edge pairings that together make up `fill`
pub const FILL_PAIRS: [(AnchorPosition, AnchorPosition); 4] = [
    (AnchorPosition::Left, AnchorPosition::Left),
    (AnchorPosition::Right, AnchorPosition::Right),
    (AnchorPosition::Top, AnchorPosition::Top),
    (AnchorPosition::Bottom, AnchorPosition::Bottom),
];
