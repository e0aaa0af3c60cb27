//! Reporting results back to the CI host
//!
//! A run ends in exactly one of two ways: both outputs are emitted, or a
//! single failure message is. Nothing is emitted before the installation
//! has fully succeeded.

use crate::error::{AngleError, AngleResult};
use crate::installer::Installation;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Output carrying the resolved branch
pub const OUTPUT_BRANCH: &str = "angle-branch";
/// Output carrying the installation directory
pub const OUTPUT_PATH: &str = "angle-path";

/// Host-provided channel for action outputs and the failure status
pub trait OutputSink {
    /// Set every named output in one step; on error none of them is set
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> AngleResult<()>;

    /// Mark the run as failed with `message`
    fn set_failed(&mut self, message: &str);
}

/// GitHub Actions workflow-command sink.
///
/// Outputs go to the file named by `GITHUB_OUTPUT` when set, otherwise to
/// `name=value` lines on the writer. Failures are `::error::` commands.
pub struct GithubActionsSink<W: Write> {
    output_file: Option<PathBuf>,
    writer: W,
}

impl GithubActionsSink<io::Stdout> {
    /// Sink configured from the runner environment, writing commands to stdout
    pub fn from_env() -> Self {
        let output_file = std::env::var_os("GITHUB_OUTPUT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(output_file, io::stdout())
    }
}

impl<W: Write> GithubActionsSink<W> {
    /// Create a sink with an explicit output file and command writer
    pub fn new(output_file: Option<PathBuf>, writer: W) -> Self {
        Self {
            output_file,
            writer,
        }
    }

    /// Consume the sink and return the command writer
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn append_to_file(&self, path: &Path, block: &str) -> AngleResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AngleError::io(format!("opening {}", path.display()), e))?;

        file.write_all(block.as_bytes())
            .map_err(|e| AngleError::io(format!("writing {}", path.display()), e))
    }
}

/// Render outputs in the file-command delimiter form
fn delimited_block(outputs: &[(&str, &str)]) -> AngleResult<String> {
    let mut block = String::new();
    for (name, value) in outputs {
        let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
        if name.contains(&delimiter) || value.contains(&delimiter) {
            return Err(AngleError::Internal(format!(
                "output {} collides with its delimiter",
                name
            )));
        }
        block.push_str(&format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"));
    }
    Ok(block)
}

impl<W: Write> OutputSink for GithubActionsSink<W> {
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> AngleResult<()> {
        for (name, value) in outputs {
            debug!("Setting output {}={}", name, value);
        }

        match self.output_file.as_deref() {
            Some(path) => self.append_to_file(path, &delimited_block(outputs)?),
            None => {
                let lines: String = outputs
                    .iter()
                    .map(|(name, value)| format!("{name}={value}\n"))
                    .collect();
                self.writer
                    .write_all(lines.as_bytes())
                    .map_err(|e| AngleError::io("writing output", e))
            }
        }
    }

    fn set_failed(&mut self, message: &str) {
        // Nothing left to report to if the command channel is gone
        let _ = writeln!(self.writer, "::error::{}", escape_data(message));
        let _ = self.writer.flush();
    }
}

/// Escape a workflow command payload
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Report the outcome of a run. Returns whether the run succeeded.
pub fn report(result: AngleResult<Installation>, sink: &mut dyn OutputSink) -> bool {
    let outcome = result.and_then(|installation| {
        let path = installation.path.display().to_string();
        sink.set_outputs(&[
            (OUTPUT_BRANCH, installation.branch),
            (OUTPUT_PATH, path.as_str()),
        ])?;
        Ok(installation)
    });

    match outcome {
        Ok(installation) => {
            info!(
                "ANGLE {} ({}) is available at {}",
                installation.branch,
                installation.platform,
                installation.path.display()
            );
            true
        }
        Err(e) => {
            if let Some(hint) = e.hint() {
                info!("Hint: {}", hint);
            }
            sink.set_failed(&e.to_string());
            false
        }
    }
}
