//! Roster ingestion from a gradebook CSV export.
//!
//! The export carries a header row, two metadata rows that are not
//! students, a `Student` column formatted `"Last, First"` and a
//! `Final Score` column. A test student row is always present and dropped.

use anyhow::{Context, Result, anyhow, ensure};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::grading::ScoreMapping;

/// Score given to a student whose final score is blank.
pub const MISSING_SCORE: i64 = 0;

/// Records between the header and the first student.
const METADATA_ROWS: usize = 2;

/// Placeholder student the gradebook adds to every course.
pub const TEST_STUDENT: &str = "Student, Test";

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Student")]
    student: String,
    #[serde(rename = "Final Score")]
    final_score: Option<f64>,
}

/// Converts `"Last, First"` into `"First Last"`.
///
/// Splits on the first comma only and trims both halves.
///
/// # Errors
///
/// Returns an error if `name` contains no comma.
pub fn convert_name(name: &str) -> Result<String> {
    let (last, first) = name
        .split_once(',')
        .ok_or_else(|| anyhow!("expected \"Last, First\" but found {name:?}"))?;
    Ok(format!("{} {}", first.trim(), last.trim()))
}

/// Rounds half to even, the same way the gradebook tooling rounds.
pub fn round_score(score: f64) -> i64 {
    score.round_ties_even() as i64
}

/// Reads a roster CSV from disk.
pub fn load_roster(path: impl AsRef<Path>) -> Result<ScoreMapping> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening roster {}", path.display()))?;
    let scores = parse_roster(file).with_context(|| format!("reading roster {}", path.display()))?;
    info!(path = %path.display(), students = scores.len(), "Roster loaded");
    Ok(scores)
}

/// Parses roster CSV content into a score mapping in file order.
///
/// A blank final score counts as [`MISSING_SCORE`] so the student still
/// receives a grade. If a name appears twice the later score wins.
///
/// # Errors
///
/// Returns an error naming the line for a malformed name or a score that
/// is not a finite number.
pub fn parse_roster<R: Read>(reader: R) -> Result<ScoreMapping> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut scores = ScoreMapping::new();

    for (index, result) in rdr.records().enumerate().skip(METADATA_ROWS) {
        // Header is line 1, records start on line 2.
        let line = index + 2;
        let record = result.with_context(|| format!("line {line}"))?;
        let row: RosterRow = record
            .deserialize(Some(&headers))
            .with_context(|| format!("line {line}"))?;

        if row.student == TEST_STUDENT {
            debug!(line, "Skipping test student");
            continue;
        }

        let student = convert_name(&row.student).with_context(|| format!("line {line}"))?;

        let score = match row.final_score {
            Some(final_score) => {
                ensure!(
                    final_score.is_finite(),
                    "line {line}: final score {final_score} for {student} is not a finite number"
                );
                round_score(final_score)
            }
            None => {
                warn!(line, student = %student, score = MISSING_SCORE, "No final score");
                MISSING_SCORE
            }
        };

        if let Some(previous) = scores.insert(student.clone(), score) {
            warn!(line, student = %student, previous, "Duplicate student, keeping later score");
        }
    }

    Ok(scores)
}
