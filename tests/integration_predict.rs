//! End-to-end predictions over the fixture artifacts.

mod common;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use solar_predict::features::FeatureRecord;
use solar_predict::inputs::{InputPanel, SLIDERS};

#[test]
fn documented_defaults_predict_expected_value() {
    let predictor = common::fixture_predictor();
    let p = predictor
        .predict(&FeatureRecord::defaults())
        .expect("defaults should predict");
    assert_eq!(p.power_kw, common::DEFAULTS_KW);
    assert_eq!(p.to_string(), "325.00 kW");
}

#[test]
fn defaults_are_deterministic_across_runs() {
    let a = common::fixture_predictor();
    let b = common::fixture_predictor();
    let record = InputPanel::new().record();
    let first = a.predict(&record).expect("defaults should predict");
    for _ in 0..10 {
        assert_eq!(a.predict(&record).expect("repeat should predict"), first);
        assert_eq!(b.predict(&record).expect("second predictor should predict"), first);
    }
}

#[test]
fn all_minimum_inputs_clamp_to_zero() {
    let predictor = common::fixture_predictor();
    let mut panel = InputPanel::new();
    panel.all_to_min();
    let p = predictor
        .predict(&panel.record())
        .expect("minimum inputs should predict");
    assert_eq!(p.raw_kw, common::ALL_MIN_RAW_KW);
    assert_eq!(p.power_kw, 0.0);
    assert_eq!(p.to_string(), "0.00 kW");
}

#[test]
fn all_maximum_inputs_predict_non_negative() {
    let predictor = common::fixture_predictor();
    let mut panel = InputPanel::new();
    panel.all_to_max();
    let p = predictor
        .predict(&panel.record())
        .expect("maximum inputs should predict");
    assert_eq!(p.power_kw, common::ALL_MAX_KW);
}

#[test]
fn random_slider_positions_never_predict_negative() {
    let predictor = common::fixture_predictor();
    let mut rng = StdRng::seed_from_u64(42);
    let mut panel = InputPanel::new();

    for _ in 0..2_000 {
        for spec in &SLIDERS {
            let value = rng.random_range(spec.min..=spec.max);
            if let Some(slider) = panel.slider_mut(spec.field) {
                slider.set_value(value);
            }
        }
        let record = panel.record();
        for spec in &SLIDERS {
            assert!(spec.contains(spec.field.get(&record)), "{record:?}");
        }
        let p = predictor
            .predict(&record)
            .unwrap_or_else(|e| panic!("{record:?} failed: {e}"));
        assert!(p.power_kw >= 0.0, "{record:?} -> {p}");
    }
}

#[test]
fn low_irradiation_lowers_output() {
    let predictor = common::fixture_predictor();
    let dim = FeatureRecord {
        irradiation: 0.2,
        ..FeatureRecord::defaults()
    };
    let p = predictor.predict(&dim).expect("low irradiation should predict");
    assert_eq!(p.power_kw, 75.0);
}
