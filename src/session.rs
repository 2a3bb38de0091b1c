//! The grading session: uploaded scores, instructor bumps, and everything
//! derived from them.
//!
//! [`GradingSession`] owns the only mutable state in the tool. All changes go
//! through [`GradingSession::apply`], and every view is rebuilt from scratch
//! by [`GradingSession::evaluate`].

use anyhow::{Result, bail};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::config::GradingScheme;
use crate::grading::near_cutoff::is_near_cutoff;
use crate::grading::{
    Adjustment, Cutoffs, Distribution, Grade, GradeMapping, GradingWarning, NearCutoff,
    ScoreMapping, distribution, grade_students, near_cutoff,
};

/// Points added to a student's score by one bump.
pub const BUMP_POINTS: i64 = 2;

/// A change requested by the instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Add [`BUMP_POINTS`] to a student currently just below a cutoff.
    ApplyBump(String),
    /// Switch to a different grading method or different values.
    SetScheme(GradingScheme),
}

/// Everything shown to the instructor for the current state of the session.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub scheme: GradingScheme,
    pub cutoffs: Cutoffs,
    pub grades: GradeMapping,
    pub distribution: Distribution,
    pub near_cutoff: BTreeMap<Grade, NearCutoff>,
    pub warnings: Vec<GradingWarning>,
    pub adjustments: Vec<Adjustment>,
}

#[derive(Debug, Clone)]
pub struct GradingSession {
    original: ScoreMapping,
    adjusted: ScoreMapping,
    scheme: GradingScheme,
}

impl GradingSession {
    pub fn new(original: ScoreMapping, scheme: GradingScheme) -> Self {
        let adjusted = original.clone();
        Self {
            original,
            adjusted,
            scheme,
        }
    }

    pub fn original(&self) -> &ScoreMapping {
        &self.original
    }

    pub fn adjusted(&self) -> &ScoreMapping {
        &self.adjusted
    }

    pub fn scheme(&self) -> &GradingScheme {
        &self.scheme
    }

    /// Applies one command and returns the adjusted scores afterwards.
    ///
    /// # Errors
    ///
    /// A bump fails, leaving the scores untouched, if the student is unknown
    /// or not currently within the near-cutoff window. A scheme change fails
    /// if its values are out of range.
    pub fn apply(&mut self, command: SessionCommand) -> Result<&ScoreMapping> {
        match command {
            SessionCommand::ApplyBump(student) => self.bump(&student)?,
            SessionCommand::SetScheme(scheme) => {
                scheme.validate()?;
                info!(scheme = %scheme, "Grading scheme changed");
                self.scheme = scheme;
            }
        }
        Ok(&self.adjusted)
    }

    fn bump(&mut self, student: &str) -> Result<()> {
        if !self.adjusted.contains(student) {
            bail!("no student named {student:?} in the roster");
        }

        let cutoffs = self.scheme.cutoffs(&self.adjusted);
        if !is_near_cutoff(&near_cutoff(&self.adjusted, &cutoffs), student) {
            bail!("{student} is not within {BUMP_POINTS} points below a cutoff");
        }

        if let Some(score) = self.adjusted.get_mut(student) {
            *score += BUMP_POINTS;
            info!(student, score = *score, "Student bumped");
        }
        Ok(())
    }

    /// Students whose score has been bumped, in roster order.
    pub fn adjustments(&self) -> Vec<Adjustment> {
        self.adjusted
            .iter()
            .filter_map(|(student, adjusted)| {
                let original = self.original.get(student)?;
                (original != adjusted).then(|| Adjustment {
                    student: student.to_string(),
                    original,
                    adjusted,
                })
            })
            .collect()
    }

    /// Recomputes cutoffs, grades and both views from the adjusted scores.
    pub fn evaluate(&self) -> Evaluation {
        let cutoffs = self.scheme.cutoffs(&self.adjusted);
        let grades = grade_students(&self.adjusted, &cutoffs);
        let distribution = distribution(&grades, &cutoffs);
        let near_cutoff = near_cutoff(&self.adjusted, &cutoffs);

        let warnings = self.scheme.warnings();
        for warning in &warnings {
            warn!(%warning, "Grading configuration");
        }

        debug!(
            students = grades.len(),
            near_cutoff_groups = near_cutoff.len(),
            "Session evaluated"
        );

        Evaluation {
            scheme: self.scheme,
            cutoffs,
            grades,
            distribution,
            near_cutoff,
            warnings,
            adjustments: self.adjustments(),
        }
    }
}
