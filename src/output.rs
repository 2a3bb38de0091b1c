//! Output formatting and export for graded rosters.
//!
//! Supports the grade CSV download, a terminal bar chart of the
//! distribution, the near-cutoff listing, and a JSON report.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use tracing::{debug, info};

use crate::grading::{Distribution, GradeMapping};
use crate::session::{BUMP_POINTS, Evaluation};

/// File name used when no export path is given.
pub const EXPORT_FILE_NAME: &str = "student_letter_grades.csv";

/// Media type of the exported grade file.
pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// Widest bar in the terminal chart, in characters.
const CHART_WIDTH: usize = 40;

#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Student")]
    student: &'a str,
    #[serde(rename = "Letter Grade")]
    grade: &'a str,
}

/// Serializes grades as CSV with a `Student,Letter Grade` header, one row per
/// student sorted by name. The same grades always produce the same bytes.
pub fn export_grades_csv(grades: &GradeMapping) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    // GradeMapping is ordered by name already.
    for (student, grade) in grades {
        writer.serialize(ExportRow {
            student,
            grade: grade.as_str(),
        })?;
    }
    if grades.is_empty() {
        writer.write_record(["Student", "Letter Grade"])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Writes the grade CSV to `path`, replacing any existing file.
pub fn write_grades_csv(path: &str, grades: &GradeMapping) -> Result<()> {
    let content = export_grades_csv(grades)?;
    fs::write(path, content)?;
    info!(path, mime = EXPORT_MIME_TYPE, rows = grades.len(), "Grades exported");
    Ok(())
}

/// Draws the grade distribution as horizontal bars, each labelled with the
/// cutoff and annotated with the count and share of the class.
pub fn render_chart(distribution: &Distribution) -> String {
    let max = distribution
        .buckets
        .iter()
        .map(|b| b.count)
        .max()
        .unwrap_or(0);

    let mut out = String::from("Grade Distribution\n");
    for bucket in &distribution.buckets {
        let len = if max == 0 {
            0
        } else {
            (bucket.count * CHART_WIDTH).div_ceil(max)
        };
        let label = format!("{} ({})", bucket.grade, bucket.threshold);
        let _ = writeln!(
            out,
            "{label:<9}|{bar:<width$}| {count} ({pct:.1}%)",
            bar = "#".repeat(len),
            width = CHART_WIDTH,
            count = bucket.count,
            pct = bucket.percent,
        );
    }
    let _ = writeln!(out, "{} students", distribution.total);
    out
}

/// Renders everything the instructor sees for one evaluation.
pub fn render_evaluation(evaluation: &Evaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Grading method: {}", evaluation.scheme);
    for warning in &evaluation.warnings {
        let _ = writeln!(out, "Warning: {warning}");
    }
    out.push('\n');
    out.push_str(&render_chart(&evaluation.distribution));

    let _ = writeln!(out, "\nStudents within {BUMP_POINTS} points of the cutoff");
    if evaluation.near_cutoff.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (grade, group) in &evaluation.near_cutoff {
        let _ = writeln!(out, "{grade} cutoff ({})", group.threshold);
        for student in &group.students {
            let _ = writeln!(out, "  {student}");
        }
    }

    if !evaluation.adjustments.is_empty() {
        let _ = writeln!(out, "\nBumped students");
        for adj in &evaluation.adjustments {
            let _ = writeln!(out, "  {}: {} -> {}", adj.student, adj.original, adj.adjusted);
        }
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    evaluation: &'a Evaluation,
}

/// Serializes an evaluation as pretty JSON stamped with the current time.
pub fn report_json(evaluation: &Evaluation) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now(),
        evaluation,
    };
    let json = serde_json::to_string_pretty(&report)?;
    debug!(bytes = json.len(), "JSON report built");
    Ok(json)
}
