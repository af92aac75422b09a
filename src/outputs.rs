use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::variable::{Variable, VariableKey};

/// Everything one inference produced. Built fresh by every evaluation and
/// never shared with another.
#[derive(Debug)]
pub struct Outputs<T> {
    facts: HashMap<VariableKey, f64>,
    fuzzified: HashMap<(VariableKey, T), f64>,
    firing_strengths: Vec<f64>,
    aggregated_memberships: HashMap<VariableKey, Vec<f64>>,
    defuzzificated_inferred_memberships: HashMap<VariableKey, f64>,
    degenerate: HashSet<VariableKey>,
}

impl<T: Eq + Hash> Outputs<T> {
    pub(crate) fn new(
        facts: HashMap<VariableKey, f64>,
        fuzzified: HashMap<(VariableKey, T), f64>,
        firing_strengths: Vec<f64>,
        aggregated_memberships: HashMap<VariableKey, Vec<f64>>,
        defuzzificated_inferred_memberships: HashMap<VariableKey, f64>,
        degenerate: HashSet<VariableKey>,
    ) -> Self {
        Self {
            facts,
            fuzzified,
            firing_strengths,
            aggregated_memberships,
            defuzzificated_inferred_memberships,
            degenerate,
        }
    }

    /// The crisp value inferred for an output variable.
    pub fn get_inferred_membership<I>(&self, var: Variable<I>) -> Option<f64> {
        self.defuzzificated_inferred_memberships.get(&var.0).copied()
    }

    /// The input value after saturation to its universe.
    pub fn fact<I>(&self, var: Variable<I>) -> Option<f64> {
        self.facts.get(&var.0).copied()
    }

    pub fn degree<I: Into<T>>(&self, var: Variable<I>, term: I) -> Option<f64> {
        self.fuzzified.get(&(var.0, term.into())).copied()
    }

    /// One strength per rule, in rule base order.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    pub fn aggregated_membership<I>(&self, var: Variable<I>) -> Option<&[f64]> {
        self.aggregated_memberships.get(&var.0).map(Vec::as_slice)
    }

    /// Whether no rule contributed to `var`, so its value is the fallback.
    pub fn is_degenerate<I>(&self, var: Variable<I>) -> bool {
        self.degenerate.contains(&var.0)
    }
}
