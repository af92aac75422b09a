use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};
use crate::membership::Triangle;
use crate::terms::{Term, Terms};
use crate::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Typed handle to a variable; `I` is the variable's own term enum.
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Variable<I> {
    pub fn key(&self) -> VariableKey {
        self.0
    }
}

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Variable<I> {}

impl<I> fmt::Debug for Variable<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Input variable, fuzzified against crisp facts.
    Antecedent,
    /// Output variable, whose term curves are clipped and aggregated.
    Consequent,
}

impl Role {
    fn describe(self) -> &'static str {
        match self {
            Role::Antecedent => "an input (antecedent)",
            Role::Consequent => "an output (consequent)",
        }
    }
}

pub struct Variables<T>(pub(crate) SlotMap<VariableKey, LinguisticVariable<T>>);

impl<T> Default for Variables<T> {
    fn default() -> Self {
        Self(SlotMap::with_key())
    }
}

impl<T: Copy + Eq + Hash + fmt::Display> Variables<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// If the step value is not provided, it defaults to 1
    pub fn add_antecedent<I: Into<T> + Term>(
        &mut self,
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        step: Option<f64>,
    ) -> Result<Variable<I>> {
        self.add(Role::Antecedent, name.into(), universe_range, terms, step)
    }

    /// If the step value is not provided, it defaults to 1
    pub fn add_consequent<I: Into<T> + Term>(
        &mut self,
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        step: Option<f64>,
    ) -> Result<Variable<I>> {
        self.add(Role::Consequent, name.into(), universe_range, terms, step)
    }

    fn add<I: Into<T> + Term>(
        &mut self,
        role: Role,
        name: String,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        step: Option<f64>,
    ) -> Result<Variable<I>> {
        let universe = Universe::new(universe_range, step.unwrap_or(1.))?;
        let terms = terms.0.iter().map(|(k, v)| (k.into(), *v));
        let var = LinguisticVariable::new(name, role, universe, terms)?;

        Ok(Variable(self.0.insert(var), PhantomData))
    }
}

impl<T> Variables<T> {
    pub fn get(&self, key: VariableKey) -> Result<&LinguisticVariable<T>> {
        self.0.get(key).ok_or(Error::UnknownVariable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &LinguisticVariable<T>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

struct TermMembership<T> {
    term: T,
    shape: Triangle,
    // The shape sampled over the universe.
    curve: Vec<f64>,
}

/// A named quantity over a fixed universe, described by triangular terms.
pub struct LinguisticVariable<T> {
    name: String,
    role: Role,
    universe: Universe,
    // Declaration order of the terms is kept for reporting.
    terms: Vec<TermMembership<T>>,
}

impl<T: Copy + Eq + fmt::Display> LinguisticVariable<T> {
    fn new(
        name: String,
        role: Role,
        universe: Universe,
        start_terms: impl IntoIterator<Item = (T, Triangle)>,
    ) -> Result<Self> {
        let mut terms = Vec::new();

        for (term, shape) in start_terms {
            let (a, _, c) = shape.breakpoints();

            if !universe.contains(a) || !universe.contains(c) {
                return Err(Error::OutOfUniverse {
                    variable: name,
                    term: term.to_string(),
                    min: universe.min(),
                    max: universe.max(),
                });
            }

            terms.push(TermMembership {
                term,
                shape,
                curve: shape.sample(universe.points()),
            });
        }

        Ok(Self {
            name,
            role,
            universe,
            terms,
        })
    }

    fn lookup(&self, term: &T) -> Result<&TermMembership<T>> {
        self.terms
            .iter()
            .find(|m| m.term == *term)
            .ok_or_else(|| Error::UnknownTerm {
                variable: self.name.clone(),
                term: term.to_string(),
            })
    }

    pub fn membership(&self, term: &T) -> Result<&Triangle> {
        self.lookup(term).map(|m| &m.shape)
    }

    /// Degree to which the crisp value `x` belongs to `term`.
    pub fn fuzzify(&self, term: &T, x: f64) -> Result<f64> {
        self.lookup(term).map(|m| m.shape.degree(x))
    }

    /// The term's membership evaluated at every universe sample point.
    /// Only output variables expose their curves for aggregation.
    pub fn term_curve(&self, term: &T) -> Result<&[f64]> {
        if self.role != Role::Consequent {
            return Err(Error::RoleMismatch {
                variable: self.name.clone(),
                expected: Role::Consequent.describe(),
            });
        }

        self.lookup(term).map(|m| &*m.curve)
    }
}

impl<T: Copy> LinguisticVariable<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> impl Iterator<Item = T> + '_ {
        self.terms.iter().map(|m| m.term)
    }

    /// Every term's sampled curve, in declaration order, regardless of role.
    pub fn curves(&self) -> impl Iterator<Item = (T, &[f64])> {
        self.terms.iter().map(|m| (m.term, &*m.curve))
    }

    pub(crate) fn ensure_role(&self, role: Role) -> Result<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(Error::RoleMismatch {
                variable: self.name.clone(),
                expected: role.describe(),
            })
        }
    }
}
