//! gclone: an improved git cloning experience
//!
//! A drop in replacement for `git clone` that organises repositories into
//! `<base>/<hostname>/<path>`.

use anyhow::Result;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    gclone::cli::run()
}
