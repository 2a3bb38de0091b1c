//! Grading scheme selection.
//!
//! A scheme is either four fixed point cutoffs or four percentage quotas.
//! It can be stored as JSON on disk:
//! ```json
//! { "method": "points", "cutoffs": [90, 80, 70, 60] }
//! ```
//! ```json
//! { "method": "percentages", "quotas": { "a": 30, "b": 40, "c": 20, "d": 10 } }
//! ```

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grading::cutoffs::{check_points, check_quotas};
use crate::grading::{Cutoffs, GradingWarning, Quotas, ScoreMapping, calculate_cutoffs};

/// Largest value accepted for a point cutoff or a quota.
pub const MAX_INPUT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum GradingScheme {
    Points { cutoffs: [i64; 4] },
    Percentages { quotas: Quotas },
}

impl Default for GradingScheme {
    fn default() -> Self {
        GradingScheme::Points {
            cutoffs: [90, 80, 70, 60],
        }
    }
}

impl fmt::Display for GradingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradingScheme::Points { cutoffs: [a, b, c, d] } => {
                write!(f, "Point Cutoffs (A {a}, B {b}, C {c}, D {d})")
            }
            GradingScheme::Percentages { quotas } => write!(
                f,
                "Percentages (A {}%, B {}%, C {}%, D {}%, F {}%)",
                quotas.a,
                quotas.b,
                quotas.c,
                quotas.d,
                quotas.f_percent()
            ),
        }
    }
}

impl GradingScheme {
    pub fn points(a: i64, b: i64, c: i64, d: i64) -> Self {
        GradingScheme::Points {
            cutoffs: [a, b, c, d],
        }
    }

    pub fn percentages(a: u32, b: u32, c: u32, d: u32) -> Self {
        GradingScheme::Percentages {
            quotas: Quotas::new(a, b, c, d),
        }
    }

    /// Loads a scheme from a JSON file at `path` and checks its ranges.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let scheme: GradingScheme = serde_json::from_str(&content)?;
        scheme.validate()?;
        Ok(scheme)
    }

    /// Picks the scheme from explicit values, then a config file, then the
    /// default point cutoffs.
    pub fn resolve(
        config: Option<&str>,
        points: Option<&[i64]>,
        percentages: Option<&[u32]>,
    ) -> Result<Self> {
        let scheme = match (points, percentages) {
            (Some(_), Some(_)) => bail!("choose either point cutoffs or percentages, not both"),
            (Some(&[a, b, c, d]), None) => Self::points(a, b, c, d),
            (None, Some(&[a, b, c, d])) => Self::percentages(a, b, c, d),
            (Some(_), None) | (None, Some(_)) => bail!("expected exactly four values for A, B, C and D"),
            (None, None) => match config {
                Some(path) => Self::load(path)?,
                None => Self::default(),
            },
        };
        scheme.validate()?;
        Ok(scheme)
    }

    /// Rejects values outside `0..=100`.
    pub fn validate(&self) -> Result<()> {
        match self {
            GradingScheme::Points { cutoffs } => {
                if let Some(v) = cutoffs.iter().find(|&&v| !(0..=MAX_INPUT as i64).contains(&v)) {
                    bail!("point cutoff {v} is outside 0..={MAX_INPUT}");
                }
            }
            GradingScheme::Percentages { quotas } => {
                let values = [quotas.a, quotas.b, quotas.c, quotas.d];
                if let Some(v) = values.iter().find(|&&v| v > MAX_INPUT) {
                    bail!("percentage {v} is outside 0..={MAX_INPUT}");
                }
            }
        }
        Ok(())
    }

    /// Configuration problems worth telling the instructor about.
    pub fn warnings(&self) -> Vec<GradingWarning> {
        match self {
            GradingScheme::Points { cutoffs } => check_points(*cutoffs).into_iter().collect(),
            GradingScheme::Percentages { quotas } => check_quotas(quotas).into_iter().collect(),
        }
    }

    /// Absolute thresholds for this scheme over the given scores.
    pub fn cutoffs(&self, scores: &ScoreMapping) -> Cutoffs {
        match self {
            GradingScheme::Points { cutoffs } => Cutoffs::Point(*cutoffs),
            GradingScheme::Percentages { quotas } => calculate_cutoffs(&scores.scores(), quotas),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::Grade;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_default_is_points() {
        assert_eq!(GradingScheme::default(), GradingScheme::points(90, 80, 70, 60));
    }

    #[test]
    fn test_parse_json() {
        let points: GradingScheme =
            serde_json::from_str(r#"{"method": "points", "cutoffs": [93, 85, 77, 65]}"#).unwrap();
        assert_eq!(points, GradingScheme::points(93, 85, 77, 65));

        let pct: GradingScheme = serde_json::from_str(
            r#"{"method": "percentages", "quotas": {"a": 25, "b": 35, "c": 25, "d": 10}}"#,
        )
        .unwrap();
        assert_eq!(pct, GradingScheme::percentages(25, 35, 25, 10));
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_path("grade_curve_test_scheme.json");
        fs::write(&path, r#"{"method": "percentages", "quotas": {"a": 30, "b": 40, "c": 20, "d": 10}}"#)
            .unwrap();

        let scheme = GradingScheme::load(&path).unwrap();
        assert_eq!(scheme, GradingScheme::percentages(30, 40, 20, 10));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_out_of_range() {
        let path = temp_path("grade_curve_test_bad_scheme.json");
        fs::write(&path, r#"{"method": "points", "cutoffs": [190, 80, 70, 60]}"#).unwrap();

        assert!(GradingScheme::load(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_resolve_precedence() {
        let scheme = GradingScheme::resolve(None, Some(&[95, 85, 75, 65]), None).unwrap();
        assert_eq!(scheme, GradingScheme::points(95, 85, 75, 65));

        let scheme = GradingScheme::resolve(None, None, Some(&[10, 20, 30, 40])).unwrap();
        assert_eq!(scheme, GradingScheme::percentages(10, 20, 30, 40));

        let scheme = GradingScheme::resolve(None, None, None).unwrap();
        assert_eq!(scheme, GradingScheme::default());
    }

    #[test]
    fn test_resolve_rejects_bad_input() {
        assert!(GradingScheme::resolve(None, Some(&[90, 80, 70]), None).is_err());
        assert!(GradingScheme::resolve(None, Some(&[90, 80, 70, 60]), Some(&[1, 2, 3, 4])).is_err());
        assert!(GradingScheme::resolve(None, Some(&[90, 80, 70, -1]), None).is_err());
        assert!(GradingScheme::resolve(None, None, Some(&[101, 0, 0, 0])).is_err());
    }

    #[test]
    fn test_warnings() {
        assert!(GradingScheme::default().warnings().is_empty());
        assert_eq!(GradingScheme::points(80, 90, 70, 60).warnings().len(), 1);
        assert_eq!(
            GradingScheme::percentages(60, 30, 20, 0).warnings(),
            vec![GradingWarning::QuotaSumExceeds100 { total: 110 }]
        );
    }

    #[test]
    fn test_cutoffs_by_method() {
        let scores: ScoreMapping = [("a", 100), ("b", 90), ("c", 80), ("d", 70), ("e", 60)]
            .into_iter()
            .collect();

        let points = GradingScheme::default().cutoffs(&scores);
        assert_eq!(points, Cutoffs::Point([90, 80, 70, 60]));

        let pct = GradingScheme::percentages(20, 20, 20, 20).cutoffs(&scores);
        assert_eq!(pct.threshold(Grade::A), 100);
        assert_eq!(pct.threshold(Grade::D), 70);
        assert_eq!(pct.threshold(Grade::F), 0);
    }
}
