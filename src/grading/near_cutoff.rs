use serde::Serialize;
use std::collections::BTreeMap;

use crate::grading::cutoffs::Cutoffs;
use crate::grading::grade::Grade;
use crate::grading::types::ScoreMapping;

/// Width of the window just below a threshold, in points.
pub const NEAR_CUTOFF_WINDOW: i64 = 2;

/// Students sitting just under one grade's threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NearCutoff {
    pub threshold: i64,
    pub students: Vec<String>,
}

/// Finds, for each of A through D, the students whose score lies in
/// `[threshold - 2, threshold)`. Grades with nobody in the window are left
/// out. Students are listed in roster order.
pub fn near_cutoff(scores: &ScoreMapping, cutoffs: &Cutoffs) -> BTreeMap<Grade, NearCutoff> {
    let mut groups = BTreeMap::new();

    for grade in Grade::LETTERED {
        let threshold = cutoffs.threshold(grade);
        let window = (threshold - NEAR_CUTOFF_WINDOW)..threshold;
        let students: Vec<String> = scores
            .iter()
            .filter(|(_, score)| window.contains(score))
            .map(|(student, _)| student.to_string())
            .collect();

        if !students.is_empty() {
            groups.insert(grade, NearCutoff { threshold, students });
        }
    }

    groups
}

/// Whether `student` currently appears in any near-cutoff group.
pub fn is_near_cutoff(groups: &BTreeMap<Grade, NearCutoff>, student: &str) -> bool {
    groups
        .values()
        .any(|group| group.students.iter().any(|s| s == student))
}
