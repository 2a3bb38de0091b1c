//! Cutoff representations and the quota-based cutoff calculator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::grading::grade::Grade;

/// Absolute score thresholds for each letter grade.
///
/// Point cutoffs are entered directly by the instructor as an A, B, C, D
/// tuple. Percentage cutoffs are derived from the roster by
/// [`calculate_cutoffs`]. F is always 0 in both forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "thresholds", rename_all = "snake_case")]
pub enum Cutoffs {
    Percentage(BTreeMap<Grade, i64>),
    Point([i64; 4]),
}

impl Cutoffs {
    /// Threshold for `grade`. F, and any grade missing from a mapping, is 0.
    pub fn threshold(&self, grade: Grade) -> i64 {
        match self {
            Cutoffs::Percentage(map) => map.get(&grade).copied().unwrap_or(0),
            Cutoffs::Point([a, b, c, d]) => match grade {
                Grade::A => *a,
                Grade::B => *b,
                Grade::C => *c,
                Grade::D => *d,
                Grade::F => 0,
            },
        }
    }
}

/// Target share of the class (0–100) for each of A, B, C and D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotas {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
}

impl Quotas {
    pub fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self { a, b, c, d }
    }

    pub fn get(&self, grade: Grade) -> u32 {
        match grade {
            Grade::A => self.a,
            Grade::B => self.b,
            Grade::C => self.c,
            Grade::D => self.d,
            Grade::F => self.f_percent(),
        }
    }

    pub fn total(&self) -> u32 {
        self.a + self.b + self.c + self.d
    }

    /// Whatever the lettered quotas leave over, never negative.
    pub fn f_percent(&self) -> u32 {
        100u32.saturating_sub(self.total())
    }
}

impl Default for Quotas {
    fn default() -> Self {
        Self::new(30, 40, 20, 10)
    }
}

/// Non-fatal configuration problems. Grading proceeds with the values as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum GradingWarning {
    QuotaSumExceeds100 { total: u32 },
    PointsNotDescending { cutoffs: [i64; 4] },
}

impl fmt::Display for GradingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradingWarning::QuotaSumExceeds100 { total } => write!(
                f,
                "The sum of percentages is {total}%, which exceeds 100%! Please adjust values."
            ),
            GradingWarning::PointsNotDescending { .. } => write!(
                f,
                "Check your cutoffs: They should be in descending order (A > B > C > D)."
            ),
        }
    }
}

pub fn check_quotas(quotas: &Quotas) -> Option<GradingWarning> {
    let total = quotas.total();
    (total > 100).then_some(GradingWarning::QuotaSumExceeds100 { total })
}

pub fn check_points(cutoffs: [i64; 4]) -> Option<GradingWarning> {
    let [a, b, c, d] = cutoffs;
    let descending = a > b && b > c && c > d;
    (!descending).then_some(GradingWarning::PointsNotDescending { cutoffs })
}

/// Number of students a quota claims out of `n`, rounded up.
fn quota_count(percent: u32, n: usize) -> usize {
    (percent as usize * n).div_ceil(100)
}

/// Derives absolute thresholds from percentage quotas.
///
/// Scores are ranked best first and each grade, in A → D order, claims the
/// next `ceil(quota * n / 100)` students directly after the previous grade's
/// window. The threshold is the lowest score in that window, clamped to the
/// last student. Quotas are not rebalanced when they overlap or exceed 100%.
///
/// An empty roster yields all-zero thresholds. A grade whose quota claims
/// nobody repeats the previous threshold, or the top score if nothing has
/// been claimed yet.
pub fn calculate_cutoffs(scores: &[i64], quotas: &Quotas) -> Cutoffs {
    let mut thresholds: BTreeMap<Grade, i64> = Grade::ALL.iter().map(|&g| (g, 0)).collect();

    let mut sorted = scores.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let n = sorted.len();
    if n == 0 {
        return Cutoffs::Percentage(thresholds);
    }

    let mut cumulative = 0usize;
    for grade in Grade::LETTERED {
        let count = quota_count(quotas.get(grade), n);
        let index = (cumulative + count).saturating_sub(1).min(n - 1);
        thresholds.insert(grade, sorted[index]);
        cumulative += count;
    }

    Cutoffs::Percentage(thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds(cutoffs: &Cutoffs) -> Vec<i64> {
        Grade::ALL.iter().map(|&g| cutoffs.threshold(g)).collect()
    }

    #[test]
    fn test_even_quotas() {
        let cutoffs = calculate_cutoffs(&[100, 90, 80, 70, 60], &Quotas::new(20, 20, 20, 20));
        assert_eq!(thresholds(&cutoffs), vec![100, 90, 80, 70, 0]);
    }

    #[test]
    fn test_unsorted_input_is_ranked() {
        let cutoffs = calculate_cutoffs(&[70, 100, 60, 80, 90], &Quotas::new(20, 20, 20, 20));
        assert_eq!(thresholds(&cutoffs), vec![100, 90, 80, 70, 0]);
    }

    #[test]
    fn test_counts_round_up() {
        // ceil(30 * 4 / 100) = 2, ceil(40 * 4 / 100) = 2, then clamped.
        let cutoffs = calculate_cutoffs(&[95, 85, 75, 65], &Quotas::default());
        assert_eq!(thresholds(&cutoffs), vec![85, 65, 65, 65, 0]);
    }

    #[test]
    fn test_empty_roster_is_all_zero() {
        let cutoffs = calculate_cutoffs(&[], &Quotas::new(50, 50, 50, 50));
        assert_eq!(thresholds(&cutoffs), vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_overflowing_quotas_clamp_to_last() {
        let cutoffs = calculate_cutoffs(&[100, 50], &Quotas::new(100, 100, 0, 0));
        assert_eq!(thresholds(&cutoffs), vec![50, 50, 50, 50, 0]);
    }

    #[test]
    fn test_zero_quota_clamps_to_top_score() {
        let cutoffs = calculate_cutoffs(&[100, 90, 80, 70], &Quotas::new(0, 25, 0, 25));
        assert_eq!(cutoffs.threshold(Grade::A), 100);
        assert_eq!(cutoffs.threshold(Grade::B), 100);
        assert_eq!(cutoffs.threshold(Grade::C), 100);
        assert_eq!(cutoffs.threshold(Grade::D), 90);
    }

    #[test]
    fn test_point_thresholds() {
        let cutoffs = Cutoffs::Point([90, 80, 70, 60]);
        assert_eq!(thresholds(&cutoffs), vec![90, 80, 70, 60, 0]);
    }

    #[test]
    fn test_f_percent() {
        assert_eq!(Quotas::default().f_percent(), 0);
        assert_eq!(Quotas::new(10, 20, 30, 10).f_percent(), 30);
        assert_eq!(Quotas::new(50, 50, 50, 0).f_percent(), 0);
    }

    #[test]
    fn test_check_quotas() {
        assert_eq!(check_quotas(&Quotas::default()), None);
        assert_eq!(
            check_quotas(&Quotas::new(50, 40, 20, 0)),
            Some(GradingWarning::QuotaSumExceeds100 { total: 110 })
        );
    }

    #[test]
    fn test_check_points() {
        assert_eq!(check_points([90, 80, 70, 60]), None);
        assert!(check_points([90, 90, 70, 60]).is_some());
        assert!(check_points([60, 70, 80, 90]).is_some());
    }
}
