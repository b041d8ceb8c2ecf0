//! Running `git clone`

use anyhow::{Context, Result};
use std::io;
use std::process::{Command, Stdio};

use crate::transform::TransformOutcome;
use crate::url::redact_credentials;

/// The external program that performs the clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    program: String,
}

impl GitCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run `<program> clone --progress <args...>` and wait for it.
    ///
    /// Both output streams of the child go to our stderr; stdout is left
    /// for the final report.
    pub fn run_clone(&self, outcome: &TransformOutcome) -> Result<()> {
        eprintln!("git clone {}", describe(outcome));

        let status = self
            .command(outcome)
            .stdin(Stdio::inherit())
            .stdout(io::stderr())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to run {}", self.program))?;

        if !status.success() {
            anyhow::bail!("git clone failed ({status})");
        }
        Ok(())
    }

    fn command(&self, outcome: &TransformOutcome) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("clone").arg("--progress").args(outcome.clone_args());
        cmd
    }
}

/// The clone arguments as one line, with any password masked.
fn describe(outcome: &TransformOutcome) -> String {
    let mut parts: Vec<String> = outcome.pass_through().to_vec();
    parts.push(redact_credentials(outcome.repository()).into_owned());
    parts.push(outcome.target_directory().display().to_string());
    parts.join(" ")
}
