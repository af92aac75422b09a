use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// Crisp facts for one inference, keyed by input variable.
#[derive(Clone, Debug, Default)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add<I>(&mut self, var: Variable<I>, val: f64) -> &mut Self {
        self.0.insert(var.0, val);
        self
    }
}
