//! Score and grade containers shared by the grading pipeline.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::grading::grade::Grade;

/// Student name → score, iterated in the order students were first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreMapping(IndexMap<String, i64>);

impl ScoreMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the score for `student`, returning the previous one if present.
    /// A replaced student keeps its original position.
    pub fn insert(&mut self, student: impl Into<String>, score: i64) -> Option<i64> {
        self.0.insert(student.into(), score)
    }

    pub fn get(&self, student: &str) -> Option<i64> {
        self.0.get(student).copied()
    }

    pub fn get_mut(&mut self, student: &str) -> Option<&mut i64> {
        self.0.get_mut(student)
    }

    pub fn contains(&self, student: &str) -> bool {
        self.0.contains_key(student)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(name, &score)| (name.as_str(), score))
    }

    pub fn scores(&self) -> Vec<i64> {
        self.0.values().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for ScoreMapping {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(student, score)| (student.into(), score))
                .collect(),
        )
    }
}

/// Student name → letter grade, ordered by name.
pub type GradeMapping = BTreeMap<String, Grade>;

/// A student whose adjusted score no longer matches the uploaded one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adjustment {
    pub student: String,
    pub original: i64,
    pub adjusted: i64,
}
