//! Cloning into the resolved destination
//!
//! The destination is checked before `git` runs: an existing directory is
//! either treated as already cloned or, with `fail_on_existing`, rejected.

use anyhow::{Context, Result};
use std::fs;
use std::io;

use crate::transform::TransformOutcome;

pub mod git;

pub use git::GitCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneStatus {
    Cloned,
    AlreadyPresent,
}

/// Clone `outcome` with `git` unless its destination already exists.
pub fn clone_repository(
    outcome: &TransformOutcome,
    git: &GitCommand,
    fail_on_existing: bool,
) -> Result<CloneStatus> {
    let target = outcome.target_directory();

    match fs::metadata(target) {
        Ok(meta) if meta.is_dir() => {
            if fail_on_existing {
                anyhow::bail!("{} already exists, can not clone to it", target.display());
            }
            tracing::info!("{} already exists, skipping clone", target.display());
            return Ok(CloneStatus::AlreadyPresent);
        }
        Ok(_) => anyhow::bail!("{} exists and is not a directory", target.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to inspect {}", target.display()));
        }
    }

    tracing::debug!(program = git.program(), destination = %target.display(), "cloning");
    git.run_clone(outcome)?;
    Ok(CloneStatus::Cloned)
}
