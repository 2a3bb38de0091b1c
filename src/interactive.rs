//! Line-oriented interactive session over any reader and writer.

use anyhow::{Result, anyhow, bail};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{error, info};

use crate::config::GradingScheme;
use crate::output::{EXPORT_FILE_NAME, render_evaluation, write_grades_csv};
use crate::session::{GradingSession, SessionCommand};

const HELP: &str = "\
Commands:
  show                     redraw the distribution and near-cutoff list
  bump <student>           add 2 points to a student just below a cutoff
  points <A> <B> <C> <D>   grade with fixed point cutoffs
  percentages <A> <B> <C> <D>
                           grade by percentage of the class
  export [file]            write the grade CSV
  help                     show this message
  quit                     leave the session
";

/// One line typed by the instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Show,
    Help,
    Quit,
    Export(Option<String>),
    Command(SessionCommand),
}

fn four<T: FromStr>(args: &str) -> Result<[T; 4]> {
    let values = args
        .split_whitespace()
        .map(|v| v.parse::<T>().map_err(|_| anyhow!("{v:?} is not a valid number")))
        .collect::<Result<Vec<T>>>()?;
    values
        .try_into()
        .map_err(|_| anyhow!("expected four values for A, B, C and D"))
}

impl FromStr for Instruction {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let instruction = match word.to_ascii_lowercase().as_str() {
            "show" | "" => Instruction::Show,
            "help" | "?" => Instruction::Help,
            "quit" | "exit" => Instruction::Quit,
            "export" => Instruction::Export((!rest.is_empty()).then(|| rest.to_string())),
            "bump" => {
                if rest.is_empty() {
                    bail!("bump needs a student name");
                }
                Instruction::Command(SessionCommand::ApplyBump(rest.to_string()))
            }
            "points" => {
                let [a, b, c, d] = four::<i64>(rest)?;
                Instruction::Command(SessionCommand::SetScheme(GradingScheme::points(a, b, c, d)))
            }
            "percentages" | "percent" => {
                let [a, b, c, d] = four::<u32>(rest)?;
                Instruction::Command(SessionCommand::SetScheme(GradingScheme::percentages(
                    a, b, c, d,
                )))
            }
            other => bail!("unknown command {other:?}, type help for a list"),
        };
        Ok(instruction)
    }
}

/// Runs the session until `quit` or end of input, redrawing after every
/// change. Bad input is reported and the session carries on.
pub fn run<R: BufRead, W: Write>(session: &mut GradingSession, input: R, mut out: W) -> Result<()> {
    write!(out, "{}", render_evaluation(&session.evaluate()))?;

    for line in input.lines() {
        let line = line?;
        let instruction = match line.parse::<Instruction>() {
            Ok(instruction) => instruction,
            Err(e) => {
                writeln!(out, "Error: {e}")?;
                continue;
            }
        };

        match instruction {
            Instruction::Quit => break,
            Instruction::Help => write!(out, "{HELP}")?,
            Instruction::Show => write!(out, "{}", render_evaluation(&session.evaluate()))?,
            Instruction::Export(path) => {
                let path = path.as_deref().unwrap_or(EXPORT_FILE_NAME);
                match write_grades_csv(path, &session.evaluate().grades) {
                    Ok(()) => writeln!(out, "Wrote {path}")?,
                    Err(e) => {
                        error!(path, error = %e, "Export failed");
                        writeln!(out, "Error: {e:#}")?;
                    }
                }
            }
            Instruction::Command(command) => match session.apply(command) {
                Ok(_) => write!(out, "{}", render_evaluation(&session.evaluate()))?,
                Err(e) => writeln!(out, "Error: {e:#}")?,
            },
        }
        out.flush()?;
    }

    info!(bumped = session.adjustments().len(), "Session finished");
    Ok(())
}
