//! Letter grading for a class roster.
//!
//! Turns a mapping of student scores into letter grades under either fixed
//! point cutoffs or cutoffs derived from percentage quotas, and produces the
//! read-only views built on top of it: the grade distribution and the list
//! of students just below each cutoff.

pub mod cutoffs;
pub mod distribution;
pub mod grade;
pub mod near_cutoff;
pub mod types;
pub mod utility;

pub use cutoffs::{Cutoffs, GradingWarning, Quotas, calculate_cutoffs};
pub use distribution::{Distribution, GradeBucket, distribution};
pub use grade::{Grade, assign_grade, grade_students};
pub use near_cutoff::{NEAR_CUTOFF_WINDOW, NearCutoff, near_cutoff};
pub use types::{Adjustment, GradeMapping, ScoreMapping};
