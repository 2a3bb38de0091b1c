//! CLI entry point for the grade curve tool.
//!
//! Loads a gradebook roster, assigns letter grades by point cutoffs or by
//! percentage of the class, and either reports, exports, or opens an
//! interactive session for bumping borderline students.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use grade_curve::{
    config::GradingScheme,
    interactive,
    output::{EXPORT_FILE_NAME, render_evaluation, report_json, write_grades_csv},
    roster::load_roster,
    session::{GradingSession, SessionCommand},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "grade_curve")]
#[command(about = "Assign letter grades to a class roster and curve borderline students", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GradingArgs {
    /// Gradebook CSV export
    #[arg(value_name = "ROSTER")]
    roster: String,

    /// Fixed point cutoffs for A, B, C and D
    #[arg(long, num_args = 4, value_names = ["A", "B", "C", "D"], conflicts_with = "percentages")]
    points: Option<Vec<i64>>,

    /// Percentage of the class receiving A, B, C and D
    #[arg(long, num_args = 4, value_names = ["A", "B", "C", "D"])]
    percentages: Option<Vec<u32>>,

    /// JSON file with the grading method, used when no values are given
    #[arg(short, long)]
    config: Option<String>,

    /// Bump a student near a cutoff before grading (repeatable)
    #[arg(short, long = "bump", value_name = "STUDENT")]
    bumps: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the grade distribution and students near each cutoff
    Report {
        #[command(flatten)]
        grading: GradingArgs,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write the final letter grades as CSV
    Export {
        #[command(flatten)]
        grading: GradingArgs,

        /// CSV file to write
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: String,
    },
    /// Grade interactively, bumping students one at a time
    Session {
        #[command(flatten)]
        grading: GradingArgs,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/grade_curve.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("grade_curve.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { grading, json } => {
            let session = open_session(&grading)?;
            let evaluation = session.evaluate();
            if json {
                println!("{}", report_json(&evaluation)?);
            } else {
                print!("{}", render_evaluation(&evaluation));
            }
        }
        Commands::Export { grading, output } => {
            let session = open_session(&grading)?;
            write_grades_csv(&output, &session.evaluate().grades)?;
        }
        Commands::Session { grading } => {
            let mut session = open_session(&grading)?;
            let stdin = std::io::stdin();
            interactive::run(&mut session, stdin.lock(), std::io::stdout())?;
        }
    }

    Ok(())
}

/// Loads the roster, resolves the grading scheme, and applies any bumps
/// given on the command line in order.
#[tracing::instrument(skip_all, fields(roster = %args.roster))]
fn open_session(args: &GradingArgs) -> Result<GradingSession> {
    let scores = load_roster(&args.roster)?;
    let scheme = GradingScheme::resolve(
        args.config.as_deref(),
        args.points.as_deref(),
        args.percentages.as_deref(),
    )?;
    info!(scheme = %scheme, students = scores.len(), "Grading roster");

    let mut session = GradingSession::new(scores, scheme);
    for student in &args.bumps {
        session.apply(SessionCommand::ApplyBump(student.clone()))?;
    }
    Ok(session)
}
