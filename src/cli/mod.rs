//! Command-line interface for gclone
//!
//! Every argument is collected verbatim and handed to the transformer, so
//! options meant for `git clone` never have to be declared here. clap is
//! used to render help and version text.

use anyhow::Result;
use clap::{crate_version, Arg, Command};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, ConfigSources};
use crate::fetch::{self, GitCommand};
use crate::render::CloneReport;
use crate::transform::{transform, TransformError};

/// Log filter variable; falls back to `RUST_LOG`, then `warn`.
pub const LOG_ENV: &str = "GCLONE_LOG";

const LONG_ABOUT: &str = "\
An improved git cloning experience.

A drop in replacement for git clone that organises cloned repositories.

Without a DIRECTORY the repository is cloned into
<default_directory>/<hostname>/<path>, e.g. git@github.com:user/project.git
lands in ~/code/github.com/user/project. Any option is passed to git clone
unchanged. On success the target directory is printed as JSON on stdout.";

const AFTER_HELP: &str = "\
Configuration (config.toml or config.yaml in /etc/gclone or ~/.config/gclone):
  default_directory   base for derived destinations [default: ~/code]
  fail_on_existing    fail if the destination already exists [default: false]
  git                 program used to clone [default: git]

Every key can be overridden with GCLONE_<KEY>, e.g. GCLONE_DEFAULT_DIRECTORY.
GCLONE_CONFIG names an explicit config file. GCLONE_LOG sets the log filter.";

/// The command definition, used for help and version output.
pub fn command() -> Command {
    Command::new("gclone")
        .version(crate_version!())
        .about("An improved git cloning experience")
        .long_about(LONG_ABOUT)
        .override_usage("gclone [GIT CLONE OPTIONS] <REPOSITORY> [DIRECTORY]")
        .after_help(AFTER_HELP)
        .arg(
            Arg::new("repository")
                .value_name("REPOSITORY")
                .help("ssh://, git://, http(s):// or user@host:path repository location"),
        )
        .arg(
            Arg::new("directory")
                .value_name("DIRECTORY")
                .help("Clone into this directory instead of a derived one"),
        )
}

pub fn run() -> Result<ExitCode> {
    init_tracing();

    let args = raw_args()?;
    match args.as_slice() {
        [flag] if flag == "-h" || flag == "--help" => {
            print!("{}", command().render_long_help());
            return Ok(ExitCode::SUCCESS);
        }
        [flag] if flag == "-V" || flag == "--version" => {
            print!("{}", command().render_version());
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let config = load_config(&ConfigSources::discover())?;

    let transform_config = config.transform_config();
    let outcome = match transform(&args, &transform_config) {
        Ok(outcome) => outcome,
        Err(TransformError::BadUsage(reason)) => {
            eprint!("{}", command().render_help());
            eprintln!("\nerror: {reason}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    let git = GitCommand::new(&config.git);
    let status = fetch::clone_repository(&outcome, &git, transform_config.fail_on_existing)?;
    tracing::debug!(?status, "clone finished");

    println!("{}", CloneReport::new(outcome.target_directory()).to_json()?);
    Ok(ExitCode::SUCCESS)
}

fn raw_args() -> Result<Vec<String>> {
    std::env::args_os()
        .skip(1)
        .map(|arg| {
            arg.into_string().map_err(|arg| {
                anyhow::anyhow!("Argument is not valid UTF-8: {}", arg.to_string_lossy())
            })
        })
        .collect()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
