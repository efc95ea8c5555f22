//! Score report for one generated text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-axis scores in `[0, 1]` plus their unweighted mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub consistency: f64,
    pub creativity: f64,
    pub completeness: f64,
    pub grounding: f64,
    pub overall: f64,
}

impl ScoreReport {
    /// Build a report, deriving `overall` as the mean of the four axes.
    pub fn from_axes(consistency: f64, creativity: f64, completeness: f64, grounding: f64) -> Self {
        let overall = (consistency + creativity + completeness + grounding) / 4.0;
        Self { consistency, creativity, completeness, grounding, overall }
    }

    /// Every field rounded to `places` decimal places, for display.
    pub fn rounded(&self, places: u32) -> Self {
        let factor = 10f64.powi(places as i32);
        let round = |x: f64| (x * factor).round() / factor;
        Self {
            consistency: round(self.consistency),
            creativity: round(self.creativity),
            completeness: round(self.completeness),
            grounding: round(self.grounding),
            overall: round(self.overall),
        }
    }

    /// `(axis, score)` pairs in display order.
    pub fn axes(&self) -> [(&'static str, f64); 5] {
        [
            ("consistency", self.consistency),
            ("creativity", self.creativity),
            ("completeness", self.completeness),
            ("grounding", self.grounding),
            ("overall", self.overall),
        ]
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (axis, score)) in self.axes().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{axis}={score:.3}")?;
        }
        Ok(())
    }
}
