//! End-to-end scoring of generated text against location records.

use proptest::prelude::*;
use rmai_core::{Location, Resident};
use rmai_eval::{FactSheet, evaluate};

fn citadel() -> Location {
    Location {
        id: "3".into(),
        name: "Citadel".into(),
        kind: "Space Station".into(),
        dimension: "C-137".into(),
        residents: vec![Resident { name: "Morty".into(), ..Default::default() }],
    }
}

#[test]
fn citadel_welcome_is_complete_and_consistent() {
    let report =
        evaluate("Welcome to the Citadel, a space station in dimension C-137.", &citadel());
    assert_eq!(report.completeness, 1.0);
    assert!(report.consistency > 0.3);
    assert!((report.consistency - 0.75).abs() < 1e-12);
    assert!(report.grounding > 0.0);
}

#[test]
fn empty_text_has_zero_consistency() {
    let report = evaluate("", &citadel());
    assert_eq!(report.consistency, 0.0);
    assert_eq!(report.completeness, 0.0);
    assert_eq!(report.grounding, 0.0);
    assert_eq!(report.creativity, 0.4);
}

#[test]
fn reference_without_keywords_is_trivially_complete() {
    let report = evaluate("Some prose about nowhere in particular.", &Location::default());
    assert_eq!(report.completeness, 1.0);
    assert_eq!(report.consistency, 0.5);
}

#[test]
fn record_with_missing_fields_deserializes_and_scores() {
    let location: Location =
        serde_json::from_value(serde_json::json!({ "name": "Earth (Replacement Dimension)" }))
            .unwrap();
    let report = evaluate("Earth (Replacement Dimension) is fine.", &location);
    assert_eq!(report.completeness, 1.0);
    assert!((report.consistency - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn overall_is_mean_of_axes() {
    let report = evaluate("The Citadel hums. Morty waves at a space station.", &citadel());
    let mean =
        (report.consistency + report.creativity + report.completeness + report.grounding) / 4.0;
    assert!((report.overall - mean).abs() < 1e-12);
}

#[test]
fn grounding_uses_the_rendered_sheet() {
    let sheet = FactSheet::from_location(&citadel());
    let on_sheet = evaluate(&sheet.to_string(), &citadel());
    let off_sheet = evaluate("Pickles and interdimensional cable all day long.", &citadel());
    assert!((on_sheet.grounding - 1.0).abs() < 1e-9);
    assert!(on_sheet.grounding > off_sheet.grounding);
}

mod prop_evaluate {
    use super::*;

    fn arb_location() -> impl Strategy<Value = Location> {
        (
            ".{0,12}",
            ".{0,12}",
            ".{0,8}",
            proptest::collection::vec(".{0,10}", 0..15),
        )
            .prop_map(|(name, kind, dimension, residents)| Location {
                name,
                kind,
                dimension,
                residents: residents
                    .into_iter()
                    .map(|name| Resident { name, ..Default::default() })
                    .collect(),
                ..Default::default()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn axes_are_bounded_and_deterministic(text in ".{0,200}", location in arb_location()) {
            let first = evaluate(&text, &location);
            let second = evaluate(&text, &location);
            prop_assert_eq!(first, second);

            for (axis, score) in first.axes() {
                prop_assert!(score.is_finite(), "{} is not finite", axis);
                prop_assert!((0.0..=1.0).contains(&score), "{} = {} out of range", axis, score);
            }
        }
    }
}
