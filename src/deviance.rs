//! Deviance level of a pupil from academic performance, school behavior and
//! family situation, all scored on `[0, 100]`.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::inference::InferenceEngine;
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::terms::{Key, Term, Terms};
use crate::variable::{LinguisticVariable, Variable, Variables};

pub const ACADEMIC_PERFORMANCE: &str = "academic_performance";
pub const SCHOOL_BEHAVIOR: &str = "school_behavior";
pub const FAMILY_SITUATION: &str = "family_situation";
pub const DEVIANCE_LEVEL: &str = "deviance_level";

const UNIVERSE: RangeInclusive<f64> = 0. ..=100.;
const STEP: f64 = 1.;

// Every variable splits its universe the same way
const LOWER: (f64, f64, f64) = (0., 0., 50.);
const MIDDLE: (f64, f64, f64) = (25., 50., 75.);
const UPPER: (f64, f64, f64) = (50., 100., 100.);

macro_rules! term_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl From<$name> for DevianceTerm {
            fn from(term: $name) -> Self {
                DevianceTerm::$name(term)
            }
        }
    };
}

term_enum!(
    /// Terms of `academic_performance`
    Academic { Low => "low", Medium => "medium", High => "high" }
);
term_enum!(
    /// Terms of `school_behavior`
    Behavior { Poor => "poor", Average => "average", Good => "good" }
);
term_enum!(
    /// Terms of `family_situation`
    Family { Unstable => "unstable", Average => "average", Stable => "stable" }
);
term_enum!(
    /// Terms of `deviance_level`
    Deviance { Low => "low", Medium => "medium", High => "high" }
);

/// Any term of any variable of the model.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DevianceTerm {
    Academic(Academic),
    Behavior(Behavior),
    Family(Family),
    Deviance(Deviance),
}

impl fmt::Display for DevianceTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Academic(t) => t.label(),
            Self::Behavior(t) => t.label(),
            Self::Family(t) => t.label(),
            Self::Deviance(t) => t.label(),
        })
    }
}

/// The rule base, in order: `academic & behavior & family => deviance`.
///
/// Only 12 of the 27 premise combinations are covered; inputs that only
/// touch uncovered combinations fire nothing.
pub const RULE_TABLE: [(Academic, Behavior, Family, Deviance); 12] = [
    (Academic::Low, Behavior::Poor, Family::Unstable, Deviance::High),
    (Academic::Low, Behavior::Poor, Family::Average, Deviance::Medium),
    (Academic::Medium, Behavior::Average, Family::Stable, Deviance::Low),
    (Academic::High, Behavior::Good, Family::Stable, Deviance::Low),
    (Academic::Medium, Behavior::Poor, Family::Unstable, Deviance::High),
    (Academic::High, Behavior::Average, Family::Unstable, Deviance::Medium),
    (Academic::Low, Behavior::Good, Family::Average, Deviance::Medium),
    (Academic::Medium, Behavior::Average, Family::Unstable, Deviance::High),
    (Academic::Medium, Behavior::Poor, Family::Average, Deviance::Medium),
    (Academic::Low, Behavior::Poor, Family::Stable, Deviance::High),
    (Academic::High, Behavior::Good, Family::Unstable, Deviance::Medium),
    (Academic::Medium, Behavior::Good, Family::Stable, Deviance::Low),
];

fn three_terms<K: Term>(lower: K, middle: K, upper: K) -> Result<Terms<K>> {
    Terms::new()
        .triangle(lower, LOWER)?
        .triangle(middle, MIDDLE)?
        .triangle(upper, UPPER)
}

/// The deviance inference system. Build it once and share it; evaluation
/// only reads it.
pub struct DevianceModel {
    engine: InferenceEngine<DevianceTerm>,
    academic: Variable<Academic>,
    behavior: Variable<Behavior>,
    family: Variable<Family>,
    deviance: Variable<Deviance>,
}

impl DevianceModel {
    pub fn new() -> Result<Self> {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        let mut vars = Variables::<DevianceTerm>::new();

        let academic = vars.add_antecedent(
            ACADEMIC_PERFORMANCE,
            UNIVERSE,
            three_terms(Academic::Low, Academic::Medium, Academic::High)?,
            Some(STEP),
        )?;
        let behavior = vars.add_antecedent(
            SCHOOL_BEHAVIOR,
            UNIVERSE,
            three_terms(Behavior::Poor, Behavior::Average, Behavior::Good)?,
            Some(STEP),
        )?;
        let family = vars.add_antecedent(
            FAMILY_SITUATION,
            UNIVERSE,
            three_terms(Family::Unstable, Family::Average, Family::Stable)?,
            Some(STEP),
        )?;
        let deviance = vars.add_consequent(
            DEVIANCE_LEVEL,
            UNIVERSE,
            three_terms(Deviance::Low, Deviance::Medium, Deviance::High)?,
            Some(STEP),
        )?;

        let mut rules = Rules::with_capacity(RULE_TABLE.len());

        for (a, b, f, d) in RULE_TABLE {
            rules.add(
                academic.is(a).and2(behavior.is(b), family.is(f)),
                deviance.is(d),
            );
        }

        let engine = InferenceEngine::new(vars, rules, config)?;

        debug!("deviance model ready");

        Ok(Self {
            engine,
            academic,
            behavior,
            family,
            deviance,
        })
    }

    pub fn engine(&self) -> &InferenceEngine<DevianceTerm> {
        &self.engine
    }

    pub fn academic(&self) -> Variable<Academic> {
        self.academic
    }

    pub fn behavior(&self) -> Variable<Behavior> {
        self.behavior
    }

    pub fn family(&self) -> Variable<Family> {
        self.family
    }

    pub fn deviance(&self) -> Variable<Deviance> {
        self.deviance
    }

    /// Runs one inference and returns its full evaluation context.
    pub fn evaluate(
        &self,
        academic_performance: f64,
        school_behavior: f64,
        family_situation: f64,
    ) -> Result<Outputs<DevianceTerm>> {
        let mut inputs = Inputs::new();

        inputs
            .add(self.academic, academic_performance)
            .add(self.behavior, school_behavior)
            .add(self.family, family_situation);

        self.engine.eval(&inputs)
    }

    /// Crisp deviance level in `[0, 100]`. Inputs outside `[0, 100]` are
    /// saturated; when no rule fires the result is 50.
    pub fn compute_deviance(
        &self,
        academic_performance: f64,
        school_behavior: f64,
        family_situation: f64,
    ) -> Result<f64> {
        self.evaluate(academic_performance, school_behavior, family_situation)?
            .get_inferred_membership(self.deviance)
            .ok_or(Error::UnknownVariable)
    }

    pub fn report(
        &self,
        academic_performance: f64,
        school_behavior: f64,
        family_situation: f64,
    ) -> Result<DevianceReport> {
        let outputs = self.evaluate(academic_performance, school_behavior, family_situation)?;
        let fact = |var: Option<f64>| var.ok_or(Error::UnknownVariable);

        Ok(DevianceReport {
            academic_performance: fact(outputs.fact(self.academic))?,
            school_behavior: fact(outputs.fact(self.behavior))?,
            family_situation: fact(outputs.fact(self.family))?,
            firing_strengths: outputs.firing_strengths().to_vec(),
            deviance_level: fact(outputs.get_inferred_membership(self.deviance))?,
            no_rule_fired: outputs.is_degenerate(self.deviance),
        })
    }

    /// Every term of the four variables sampled over its universe, inputs
    /// first, for plotting.
    pub fn membership_curves(&self) -> Result<Vec<VariableCurves>> {
        let vars = self.engine.variables();

        [
            self.academic.key(),
            self.behavior.key(),
            self.family.key(),
            self.deviance.key(),
        ]
        .into_iter()
        .map(|key| vars.get(key).map(VariableCurves::from))
        .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct DevianceReport {
    pub academic_performance: f64,
    pub school_behavior: f64,
    pub family_situation: f64,
    pub firing_strengths: Vec<f64>,
    pub deviance_level: f64,
    pub no_rule_fired: bool,
}

#[derive(Debug, Serialize)]
pub struct VariableCurves {
    pub variable: String,
    pub universe: Vec<f64>,
    pub terms: Vec<TermCurve>,
}

#[derive(Debug, Serialize)]
pub struct TermCurve {
    pub term: String,
    pub membership: Vec<f64>,
}

impl From<&LinguisticVariable<DevianceTerm>> for VariableCurves {
    fn from(var: &LinguisticVariable<DevianceTerm>) -> Self {
        Self {
            variable: var.name().to_owned(),
            universe: var.universe().points().to_vec(),
            terms: var
                .curves()
                .map(|(term, curve)| TermCurve {
                    term: term.to_string(),
                    membership: curve.to_vec(),
                })
                .collect(),
        }
    }
}
