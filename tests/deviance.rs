use approx::assert_relative_eq;
use fuzzy_deviance::ops::{DefuzzificationOp, ImplicationOp};
use fuzzy_deviance::{Academic, Behavior, DevianceModel, EngineConfig, Family};
use proptest::prelude::*;
use rayon::prelude::*;

fn model() -> DevianceModel {
    DevianceModel::new().unwrap()
}

#[test]
fn test_saturates_out_of_range_inputs() {
    let model = model();

    assert_eq!(
        model.compute_deviance(-10., 50., 50.).unwrap(),
        model.compute_deviance(0., 50., 50.).unwrap()
    );
    assert_eq!(
        model.compute_deviance(150., 50., 50.).unwrap(),
        model.compute_deviance(100., 50., 50.).unwrap()
    );
    assert_eq!(
        model.compute_deviance(30., -1e9, 1e9).unwrap(),
        model.compute_deviance(30., 0., 100.).unwrap()
    );
}

#[test]
fn test_low_academic_membership() {
    let model = model();
    let outputs = model.evaluate(0., 0., 0.).unwrap();

    assert_eq!(outputs.degree(model.academic(), Academic::Low), Some(1.));

    let outputs = model.evaluate(25., 0., 0.).unwrap();
    assert_eq!(outputs.degree(model.academic(), Academic::Low), Some(0.5));

    let outputs = model.evaluate(50., 0., 0.).unwrap();
    assert_eq!(outputs.degree(model.academic(), Academic::Low), Some(0.));
    assert_eq!(outputs.degree(model.academic(), Academic::Medium), Some(1.));
}

#[test]
fn test_all_lowest_scores_yield_pure_high_centroid() {
    let model = model();
    let outputs = model.evaluate(0., 0., 0.).unwrap();

    // Only the first rule fires, fully, into `high`
    let strengths = outputs.firing_strengths();
    assert_eq!(strengths[0], 1.);
    assert!(strengths[1..].iter().all(|s| *s == 0.));

    // sum(x * (x - 50) / 50) / sum((x - 50) / 50) for x in 50..=100
    let deviance = outputs.get_inferred_membership(model.deviance()).unwrap();
    assert_relative_eq!(deviance, 251. / 3., epsilon = 1e-9);
}

#[test]
fn test_all_highest_scores_yield_low_deviance() {
    let model = model();
    let outputs = model.evaluate(100., 100., 100.).unwrap();

    assert_eq!(outputs.firing_strengths()[3], 1.);

    let deviance = outputs.get_inferred_membership(model.deviance()).unwrap();
    assert!(deviance < 50.);
    assert_relative_eq!(deviance, 49. / 3., epsilon = 1e-9);
}

#[test]
fn test_reference_values() {
    let model = model();

    for ((a, b, f), expected) in [
        ((25., 25., 25.), 80.8157894736842),
        ((30., 40., 20.), 77.65934065934066),
        ((60., 55., 80.), 18.305164319248828),
        ((35., 20., 60.), 59.45370370370373),
        ((10., 70., 40.), 49.99999999999998),
    ] {
        let actual = model.compute_deviance(a, b, f).unwrap();
        assert_relative_eq!(actual, expected, epsilon = 1e-9);
    }
}

#[test]
fn test_no_rule_fired_falls_back_to_midpoint() {
    let model = model();

    // `high` academics never meet `poor` behavior in the rule base, and at 50
    // every input sits on its middle term, which no rule combines either.
    for (a, b, f) in [(100., 0., 0.), (50., 50., 50.)] {
        let outputs = model.evaluate(a, b, f).unwrap();

        assert!(outputs.firing_strengths().iter().all(|s| *s == 0.));
        assert!(outputs.is_degenerate(model.deviance()));
        assert_eq!(outputs.get_inferred_membership(model.deviance()), Some(50.));
    }
}

#[test]
fn test_not_a_number_is_rejected() {
    let model = model();

    assert!(model.compute_deviance(f64::NAN, 10., 10.).is_err());
}

#[test]
fn test_repeated_calls_are_identical() {
    let model = model();
    let first = model.compute_deviance(42., 17., 63.).unwrap();

    for _ in 0..100 {
        assert_eq!(model.compute_deviance(42., 17., 63.).unwrap(), first);
    }
}

#[test]
fn test_concurrent_callers_do_not_interfere() {
    let model = model();
    let grid: Vec<(f64, f64, f64)> = (0..=100)
        .step_by(10)
        .flat_map(|a| (0..=100).step_by(10).map(move |b| (a as f64, b as f64, ((a + b) % 101) as f64)))
        .collect();

    let sequential: Vec<f64> = grid
        .iter()
        .map(|&(a, b, f)| model.compute_deviance(a, b, f).unwrap())
        .collect();
    let parallel: Vec<f64> = grid
        .par_iter()
        .map(|&(a, b, f)| model.compute_deviance(a, b, f).unwrap())
        .collect();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_rule_terms_drive_the_clipped_output() {
    let model = model();
    // academic low .25 / medium .5, behavior poor 1, family unstable 1:
    // rules 1 and 5 both conclude `high`, at .25 and .5
    let outputs = model.evaluate(37.5, 0., 0.).unwrap();
    let strengths = outputs.firing_strengths();

    assert_eq!(outputs.degree(model.behavior(), Behavior::Poor), Some(1.));
    assert_eq!(outputs.degree(model.family(), Family::Unstable), Some(1.));
    assert_eq!((strengths[0], strengths[4]), (0.25, 0.5));

    let aggregated = outputs.aggregated_membership(model.deviance()).unwrap();
    assert!(aggregated.iter().all(|m| *m <= 0.5));
    assert_eq!(aggregated[100], 0.5);
    assert_eq!(aggregated[50], 0.);
    assert!(model.compute_deviance(37.5, 0., 0.).unwrap() > 50.);
}

#[test]
fn test_alternative_operators() {
    let config = EngineConfig {
        implication: ImplicationOp::Prod,
        defuzzification: DefuzzificationOp::MeanOfMaximum,
        ..EngineConfig::default()
    };
    let model = DevianceModel::with_config(config).unwrap();

    // `high` scaled by 1.0 peaks only at 100
    assert_eq!(model.compute_deviance(0., 0., 0.).unwrap(), 100.);
    // `low` peaks only at 0
    assert_eq!(model.compute_deviance(100., 100., 100.).unwrap(), 0.);

    let outputs = model.evaluate(100., 100., 0.).unwrap();
    // high & good & unstable => medium
    assert_eq!(outputs.firing_strengths()[10], 1.);
    assert_eq!(outputs.get_inferred_membership(model.deviance()), Some(50.));
    assert!(!outputs.is_degenerate(model.deviance()));
}

proptest! {
    #[test]
    fn prop_deviance_stays_in_range(
        a in -50.0f64..150.0,
        b in -50.0f64..150.0,
        f in -50.0f64..150.0,
    ) {
        let value = model().compute_deviance(a, b, f).unwrap();

        prop_assert!((0. ..=100.).contains(&value), "{value} out of range for ({a}, {b}, {f})");
    }
}
