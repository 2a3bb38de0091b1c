use serde::Serialize;

use crate::grading::cutoffs::Cutoffs;
use crate::grading::grade::Grade;
use crate::grading::types::GradeMapping;
use crate::grading::utility::pct;

/// One bar of the distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeBucket {
    pub grade: Grade,
    pub count: usize,
    pub percent: f64,
    pub threshold: i64,
}

/// Per-grade counts for a class, always listing A through F.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub total: usize,
    pub buckets: Vec<GradeBucket>,
}

impl Distribution {
    pub fn bucket(&self, grade: Grade) -> Option<&GradeBucket> {
        self.buckets.iter().find(|b| b.grade == grade)
    }
}

/// Counts each grade and its share of the class, alongside the cutoff it
/// was awarded at. F is always shown at 0.
pub fn distribution(grades: &GradeMapping, cutoffs: &Cutoffs) -> Distribution {
    let total = grades.len();
    let buckets = Grade::ALL
        .into_iter()
        .map(|grade| {
            let count = grades.values().filter(|&&g| g == grade).count();
            GradeBucket {
                grade,
                count,
                percent: pct(count, total),
                threshold: cutoffs.threshold(grade),
            }
        })
        .collect();

    Distribution { total, buckets }
}
