//! Argument transformation
//!
//! Turns the raw command line into the argument list for `git clone` and the
//! directory the repository will be cloned into.

mod partition;

pub use partition::{partition, Partition};

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::url::{self, UrlError};
use crate::utils::paths::{expand_home, ExpandError};

pub const DEFAULT_DIRECTORY: &str = "~/code";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    /// Base directory for destinations derived from the repository URL.
    pub default_directory: String,
    /// Fail instead of succeeding when the destination already exists.
    pub fail_on_existing: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self { default_directory: DEFAULT_DIRECTORY.to_string(), fail_on_existing: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("{0}")]
    BadUsage(String),

    #[error(transparent)]
    Url(#[from] UrlError),

    #[error(transparent)]
    Home(#[from] ExpandError),
}

/// The finished `git clone` invocation for one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutcome {
    pass_through: Vec<String>,
    repository: String,
    target_directory: PathBuf,
}

impl TransformOutcome {
    pub fn pass_through(&self) -> &[String] {
        &self.pass_through
    }

    /// The repository exactly as it was typed.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn target_directory(&self) -> &Path {
        &self.target_directory
    }

    /// Options first, then the repository, then the destination.
    pub fn clone_args(&self) -> Vec<OsString> {
        self.pass_through
            .iter()
            .map(OsString::from)
            .chain([OsString::from(&self.repository), self.target_directory.clone().into_os_string()])
            .collect()
    }
}

/// Build the `git clone` invocation from the raw arguments (program name
/// excluded).
///
/// With a single positional the destination is derived from the parsed
/// repository URL; with two the second is used as given. Anything else is
/// [`TransformError::BadUsage`].
pub fn transform<S: AsRef<str>>(
    args: &[S],
    config: &TransformConfig,
) -> Result<TransformOutcome, TransformError> {
    let Partition { ours, pass_through } = partition(args);
    tracing::debug!(positionals = ours.len(), options = pass_through.len(), "partitioned arguments");

    let (repository, target_directory) = match ours.as_slice() {
        [] => return Err(TransformError::BadUsage("a repository location is required".to_string())),
        [repository] => (repository.clone(), derive_destination(repository, config)?),
        [repository, directory] => (repository.clone(), expand_home(directory)?),
        extra => {
            return Err(TransformError::BadUsage(format!(
                "expected a repository and an optional directory, got {} positional arguments",
                extra.len()
            )))
        }
    };

    tracing::debug!(destination = %target_directory.display(), "resolved clone destination");

    Ok(TransformOutcome { pass_through, repository, target_directory })
}

fn derive_destination(repository: &str, config: &TransformConfig) -> Result<PathBuf, TransformError> {
    let location = url::parse(repository)?;
    let mut target = expand_home(&config.default_directory)?;
    target.push(location.relative_destination());
    Ok(target)
}
