use serde::Serialize;
use std::fmt;

use crate::grading::cutoffs::Cutoffs;
use crate::grading::types::{GradeMapping, ScoreMapping};

/// A letter grade, ordered best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// All grades in report order.
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    /// Grades that carry an explicit threshold. F is implicitly 0.
    pub const LETTERED: [Grade; 4] = [Grade::A, Grade::B, Grade::C, Grade::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the highest grade whose threshold is at or below `score`.
///
/// Thresholds are checked in A → D order and the first match wins, so a
/// score equal to a threshold earns that grade. Falls through to F.
pub fn assign_grade(score: i64, cutoffs: &Cutoffs) -> Grade {
    Grade::LETTERED
        .into_iter()
        .find(|&g| score >= cutoffs.threshold(g))
        .unwrap_or(Grade::F)
}

/// Grades every student. Recomputed from the scores each time it is called.
pub fn grade_students(scores: &ScoreMapping, cutoffs: &Cutoffs) -> GradeMapping {
    scores
        .iter()
        .map(|(student, score)| (student.to_string(), assign_grade(score, cutoffs)))
        .collect()
}
