//! gclone: clone git repositories into a predictable directory tree
//!
//! Recognises ssh, git, http(s) and scp-like repository locations, derives
//! `<base>/<hostname>/<path>` as the destination when none is given, and
//! hands the clone to the `git` binary.

pub mod cli;
pub mod config;
pub mod fetch;
pub mod render;
pub mod transform;
pub mod url;
pub mod utils;

pub use transform::{transform, TransformConfig, TransformError, TransformOutcome};
pub use url::{parse, RepositoryLocation, Scheme, UrlError};
