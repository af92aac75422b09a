use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use tracing::{debug, instrument, trace};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::variable::{Role, VariableKey, Variables};

/// A Mamdani inference system over a fixed set of variables and rules.
///
/// Holds no per-call state: `eval` takes `&self`, so one engine can serve
/// any number of threads.
pub struct InferenceEngine<T> {
    vars: Variables<T>,
    rules: Rules<T>,
    config: EngineConfig,
}

impl<T: Copy + Eq + Hash + fmt::Display> InferenceEngine<T> {
    /// Checks every rule against the variable definitions, so that a
    /// misconfigured rule base fails here rather than during evaluation.
    pub fn new(vars: Variables<T>, rules: Rules<T>, config: EngineConfig) -> Result<Self> {
        for (i, rule) in rules.iter().enumerate() {
            for (var_key, term) in rule.premise().propositions() {
                let var = vars.get(var_key)?;

                var.ensure_role(Role::Antecedent)?;
                var.membership(term)?;
            }

            let (var_key, term) = rule
                .conclusion()
                .ok_or(Error::InvalidConsequence { rule: i + 1 })?;

            vars.get(var_key)?.term_curve(term)?;
        }

        debug!(variables = vars.len(), rules = rules.len(), ?config, "built inference engine");

        Ok(Self { vars, rules, config })
    }

    pub fn variables(&self) -> &Variables<T> {
        &self.vars
    }

    pub fn rules(&self) -> &Rules<T> {
        &self.rules
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[instrument(level = "debug", skip_all)]
    pub fn eval(&self, inputs: &Inputs) -> Result<Outputs<T>> {
        // Saturate crisp facts to their universes
        let mut facts = HashMap::with_capacity(inputs.0.len());

        for (&key, &value) in &inputs.0 {
            let var = self.vars.get(key)?;

            var.ensure_role(Role::Antecedent)?;

            if value.is_nan() {
                return Err(Error::NonFiniteInput(var.name().to_owned()));
            }

            let clamped = var.universe().clamp(value);

            if clamped != value {
                debug!(variable = var.name(), value, clamped, "input saturated to universe");
            }

            facts.insert(key, clamped);
        }

        // Fuzzificate facts against every term of their variable
        let mut fuzzified = HashMap::new();

        for (&key, &fact) in &facts {
            let var = self.vars.get(key)?;

            for term in var.terms() {
                fuzzified.insert((key, term), var.fuzzify(&term, fact)?);
            }
        }

        // Compute firing strengths, every rule, no short circuit
        let degree = |key: VariableKey, term: &T| -> Result<f64> {
            match fuzzified.get(&(key, *term)) {
                Some(degree) => Ok(*degree),
                None => Err(Error::MissingInput(self.vars.get(key)?.name().to_owned())),
            }
        };
        let mut firing_strengths = Vec::with_capacity(self.rules.len());

        for (i, rule) in self.rules.iter().enumerate() {
            let strength = rule
                .premise()
                .strength(&degree, self.config.and_op, self.config.or_op)?;

            trace!(rule = i + 1, strength, "rule evaluated");
            firing_strengths.push(strength);
        }

        // Shape each consequent term by the rules concluding it
        let mut term_memberships: HashMap<(VariableKey, T), Vec<f64>> = HashMap::new();

        for (i, (rule, &strength)) in self.rules.iter().zip(&firing_strengths).enumerate() {
            let (key, term) = rule
                .conclusion()
                .ok_or(Error::InvalidConsequence { rule: i + 1 })?;
            let curve = self.vars.get(key)?.term_curve(term)?;
            let implied = self.config.implication.call(strength, curve);

            self.config.aggregation.accumulate(
                term_memberships
                    .entry((key, *term))
                    .or_insert_with(|| vec![0.; curve.len()]),
                &implied,
            );
        }

        // Aggregate terms into one curve per output and defuzzificate it
        let mut aggregated_memberships = HashMap::new();
        let mut defuzzificated = HashMap::new();
        let mut degenerate = HashSet::new();

        for (key, var) in self.vars.iter().filter(|(_, var)| var.role() == Role::Consequent) {
            let universe = var.universe();
            let mut aggregated = vec![0.; universe.len()];

            for term in var.terms() {
                if let Some(membership) = term_memberships.get(&(key, term)) {
                    self.config.aggregation.accumulate(&mut aggregated, membership);
                }
            }

            let crisp = match self.config.defuzzification.call(universe.points(), &aggregated) {
                Some(crisp) => crisp,
                None => {
                    let fallback = universe.mean();

                    debug!(variable = var.name(), fallback, "no rule fired, using universe mean");
                    degenerate.insert(key);

                    fallback
                },
            };

            defuzzificated.insert(key, crisp);
            aggregated_memberships.insert(key, aggregated);
        }

        Ok(Outputs::new(
            facts,
            fuzzified,
            firing_strengths,
            aggregated_memberships,
            defuzzificated,
            degenerate,
        ))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::dsl::Expr;
    use crate::terms::{Key, Terms};
    use crate::variable::Variable;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Temp {
        Cold,
        Hot,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Fan {
        Slow,
        Fast,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    enum VarTerms {
        Temp(Temp),
        Fan(Fan),
    }

    impl From<Temp> for VarTerms {
        fn from(t: Temp) -> Self {
            Self::Temp(t)
        }
    }

    impl From<Fan> for VarTerms {
        fn from(f: Fan) -> Self {
            Self::Fan(f)
        }
    }

    impl fmt::Display for VarTerms {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            fmt::Debug::fmt(self, f)
        }
    }

    struct Fixture {
        vars: Variables<VarTerms>,
        temp: Variable<Temp>,
        fan: Variable<Fan>,
    }

    fn fixture() -> Fixture {
        let temp_terms = Terms::new()
            .triangle(Temp::Cold, (0., 0., 10.))
            .and_then(|t| t.triangle(Temp::Hot, (0., 10., 10.)))
            .unwrap();
        let fan_terms = Terms::new()
            .triangle(Fan::Slow, (0., 0., 10.))
            .and_then(|t| t.triangle(Fan::Fast, (0., 10., 10.)))
            .unwrap();
        let mut vars = Variables::<VarTerms>::new();
        let temp = vars.add_antecedent("temp", 0. ..=10., temp_terms, None).unwrap();
        let fan = vars.add_consequent("fan", 0. ..=10., fan_terms, None).unwrap();

        Fixture { vars, temp, fan }
    }

    #[test]
    fn test_single_rule_clip() {
        let Fixture { vars, temp, fan } = fixture();
        let mut rules = Rules::new();

        rules.add(temp.is(Temp::Hot), fan.is(Fan::Fast));

        let engine = InferenceEngine::new(vars, rules, EngineConfig::default()).unwrap();
        let mut inputs = Inputs::new();

        inputs.add(temp, 5.);

        let outputs = engine.eval(&inputs).unwrap();

        assert_eq!(outputs.firing_strengths(), &[0.5]);
        assert_eq!(outputs.degree(temp, Temp::Cold), Some(0.5));

        // Fast clipped at 0.5 is a ramp 0.0..0.5 over 0..5 then flat to 10
        let aggregated = outputs.aggregated_membership(fan).unwrap();
        assert_eq!(aggregated[3], 0.3);
        assert_eq!(aggregated[5], 0.5);
        assert_eq!(aggregated[9], 0.5);

        let num: f64 = (0..=10).map(|x| x as f64 * aggregated[x]).sum();
        let den: f64 = aggregated.iter().sum();
        assert_relative_eq!(outputs.get_inferred_membership(fan).unwrap(), num / den);
        assert!(!outputs.is_degenerate(fan));
    }

    #[test]
    fn test_saturates_inputs() {
        let Fixture { vars, temp, fan } = fixture();
        let mut rules = Rules::new();

        rules.add(temp.is(Temp::Cold), fan.is(Fan::Slow));
        rules.add(temp.is(Temp::Hot), fan.is(Fan::Fast));

        let engine = InferenceEngine::new(vars, rules, EngineConfig::default()).unwrap();
        let eval = |x: f64| {
            let mut inputs = Inputs::new();
            inputs.add(temp, x);
            engine.eval(&inputs).unwrap()
        };

        let below = eval(-40.);
        assert_eq!(below.fact(temp), Some(0.));
        assert_eq!(
            below.get_inferred_membership(fan),
            eval(0.).get_inferred_membership(fan)
        );
        assert_eq!(
            eval(f64::INFINITY).get_inferred_membership(fan),
            eval(10.).get_inferred_membership(fan)
        );
    }

    #[test]
    fn test_degenerate_uses_universe_mean() {
        let Fixture { vars, temp, fan } = fixture();
        let mut rules = Rules::new();

        rules.add(temp.is(Temp::Hot), fan.is(Fan::Fast));

        let engine = InferenceEngine::new(vars, rules, EngineConfig::default()).unwrap();
        let mut inputs = Inputs::new();

        inputs.add(temp, 0.);

        let outputs = engine.eval(&inputs).unwrap();

        assert_eq!(outputs.firing_strengths(), &[0.]);
        assert_eq!(outputs.get_inferred_membership(fan), Some(5.));
        assert!(outputs.is_degenerate(fan));
        assert!(outputs.aggregated_membership(fan).unwrap().iter().all(|m| *m == 0.));
    }

    #[test]
    fn test_rejects_bad_rule_bases() {
        let Fixture { vars, temp, fan: _ } = fixture();
        let mut rules = Rules::new();

        // Conclusion on an input variable
        rules.add(temp.is(Temp::Hot), temp.is(Temp::Cold));
        assert!(matches!(
            InferenceEngine::new(vars, rules, EngineConfig::default()),
            Err(Error::RoleMismatch { .. })
        ));

        let Fixture { vars, temp, fan } = fixture();
        let mut rules = Rules::new();

        // Premise on a term the variable does not define
        rules.add(Expr::Is(temp.key(), VarTerms::Fan(Fan::Fast)), fan.is(Fan::Slow));
        assert!(matches!(
            InferenceEngine::new(vars, rules, EngineConfig::default()),
            Err(Error::UnknownTerm { .. })
        ));

        let Fixture { vars, temp, fan } = fixture();
        let mut rules = Rules::new();

        rules.add(temp.is(Temp::Hot), fan.is(Fan::Fast).and(fan.is(Fan::Slow)));
        assert!(matches!(
            InferenceEngine::new(vars, rules, EngineConfig::default()),
            Err(Error::InvalidConsequence { rule: 1 })
        ));
    }

    #[test]
    fn test_input_errors() {
        let Fixture { vars, temp, fan } = fixture();
        let mut rules = Rules::new();

        rules.add(temp.is(Temp::Hot), fan.is(Fan::Fast));

        let engine = InferenceEngine::new(vars, rules, EngineConfig::default()).unwrap();

        let missing = engine.eval(&Inputs::new()).unwrap_err();
        assert_eq!(missing.to_string(), "no input value supplied for `temp`");

        let mut inputs = Inputs::new();
        inputs.add(temp, f64::NAN);
        assert!(matches!(engine.eval(&inputs), Err(Error::NonFiniteInput(_))));

        let mut inputs = Inputs::new();
        inputs.add(fan, 3.);
        assert!(matches!(engine.eval(&inputs), Err(Error::RoleMismatch { .. })));
    }
}
