use crate::dsl::Expr;
use crate::variable::VariableKey;

/// An ordered rule base. Every rule is evaluated on every inference.
#[derive(Clone, Debug)]
pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Rules(Vec::new())
    }
}

impl<T> Rules<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// The consequence must be a single `variable.is(term)`; anything else is
    /// rejected when the engine is built.
    pub fn add(&mut self, premise: Expr<T>, consequence: Expr<T>) {
        self.0.push(Rule {
            premise,
            consequence,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<T>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Rule<T> {
    pub(crate) premise: Expr<T>,
    pub(crate) consequence: Expr<T>,
}

impl<T> Rule<T> {
    pub fn premise(&self) -> &Expr<T> {
        &self.premise
    }

    pub fn consequence(&self) -> &Expr<T> {
        &self.consequence
    }

    /// The `(variable, term)` this rule concludes, if it is a single proposition.
    pub fn conclusion(&self) -> Option<(VariableKey, &T)> {
        match &self.consequence {
            Expr::Is(var_key, term) => Some((*var_key, term)),
            Expr::And(_) | Expr::Or(_) => None,
        }
    }
}
