//! # rmai-eval
//!
//! Heuristic quality scores for generated text about a location.
//!
//! [`evaluate`] derives a [`FactSheet`] from the location record and scores the
//! text on four independent axes:
//!
//! | Axis | Measures |
//! |------|----------|
//! | consistency | fact tokens (name, type, dimension, residents) mentioned |
//! | creativity | lexical variety (type-token ratio) |
//! | completeness | name, type and dimension all mentioned |
//! | grounding | word TF-IDF cosine to the rendered fact sheet |
//!
//! `overall` is their unweighted mean. Scoring is pure: the same inputs always
//! give the same [`ScoreReport`], and no input makes it fail.

pub mod fact_sheet;
pub mod report;
pub mod scorers;

pub use fact_sheet::FactSheet;
pub use report::ScoreReport;

use rmai_core::Location;
use tracing::debug;

/// Score `text` against the facts of `reference`.
pub fn evaluate(text: &str, reference: &Location) -> ScoreReport {
    evaluate_against(text, &FactSheet::from_location(reference))
}

/// Score `text` against an already derived fact sheet.
pub fn evaluate_against(text: &str, sheet: &FactSheet) -> ScoreReport {
    let report = ScoreReport::from_axes(
        scorers::consistency(text, &sheet.fact_tokens()),
        scorers::creativity(text),
        scorers::completeness(text, &sheet.required_keywords()),
        scorers::grounding(text, &sheet.to_string()),
    );
    debug!(location = %sheet.name, overall = report.overall, "evaluated generation");
    report
}
