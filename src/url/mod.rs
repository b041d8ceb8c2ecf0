//! Repository URL recognition
//!
//! Classifies a repository location into one of four schemes and extracts
//! its username, hostname, port and path. Supported forms:
//! - `ssh://[user@]host[:port]/path/to/repo.git[/]`
//! - `git://host[:port]/path/to/repo.git[/][#ref]`
//! - `http[s]://[user[:password]@]host[:port]/path/to/repo.git[/]`
//! - `user@host:path/to/repo.git` (scp-like shorthand)

mod grammar;

pub use grammar::redact_credentials;

use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::utils::paths::{named_segments, push_segments};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("unable to determine type of repository URL: {input}")]
    UnrecognizedFormat { input: String },
}

/// The four recognised repository location syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Ssh,
    Git,
    Http,
    Scp,
}

impl Scheme {
    pub const ALL: [Scheme; 4] = [Scheme::Ssh, Scheme::Git, Scheme::Http, Scheme::Scp];

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Ssh => "ssh",
            Scheme::Git => "git",
            Scheme::Http => "http",
            Scheme::Scp => "scp",
        }
    }

    /// Return the scheme whose grammar matches `input`, if any.
    ///
    /// Every grammar is evaluated; two matches would mean the grammars
    /// overlap, which is a bug in the table rather than an ambiguity.
    pub fn detect(input: &str) -> Option<Scheme> {
        let mut matching = Scheme::ALL.into_iter().filter(|scheme| scheme.grammar().is_match(input));
        let scheme = matching.next()?;
        debug_assert!(
            matching.next().is_none(),
            "overlapping scheme grammars for {}",
            redact_credentials(input)
        );
        Some(scheme)
    }

    fn grammar(self) -> &'static Regex {
        grammar::pattern(self)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully parsed repository location.
///
/// Only [`parse`] builds one, so every instance has a non-empty hostname and
/// a path with at least one named segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocation {
    scheme: Scheme,
    username: Option<String>,
    hostname: String,
    port: Option<u16>,
    path: String,
}

impl RepositoryLocation {
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Repository path without the `.git` suffix or trailing slash.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `hostname/path`, joined segment by segment.
    ///
    /// Empty, `.` and `..` segments are dropped so the result always stays
    /// below whatever base directory it is joined onto.
    pub fn relative_destination(&self) -> PathBuf {
        let mut dest = PathBuf::from(&self.hostname);
        push_segments(&mut dest, &self.path);
        dest
    }
}

impl FromStr for RepositoryLocation {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse a repository location.
///
/// Either every required component is present or the whole parse fails with
/// [`UrlError::UnrecognizedFormat`].
pub fn parse(input: &str) -> Result<RepositoryLocation, UrlError> {
    let unrecognized =
        || UrlError::UnrecognizedFormat { input: redact_credentials(input).into_owned() };

    let scheme = Scheme::detect(input).ok_or_else(unrecognized)?;
    let captures = scheme.grammar().captures(input).ok_or_else(unrecognized)?;

    let hostname = captures
        .name("hostname")
        .map(|m| m.as_str())
        .filter(|host| !host.is_empty())
        .ok_or_else(unrecognized)?;

    let path = captures
        .name("path")
        .map(|m| normalize_path(m.as_str()))
        .filter(|path| named_segments(path).next().is_some())
        .ok_or_else(unrecognized)?;

    let port = match captures.name("port") {
        Some(m) => Some(m.as_str().parse::<u16>().map_err(|_| unrecognized())?),
        None => None,
    };

    let username = captures.name("username").map(|m| m.as_str().to_string());

    tracing::debug!(%scheme, hostname, path, ?port, "parsed repository location");

    Ok(RepositoryLocation {
        scheme,
        username,
        hostname: hostname.to_string(),
        port,
        path: path.to_string(),
    })
}

/// Strip one trailing `/`, then one trailing `.git`, then any slashes left
/// in front of it.
fn normalize_path(raw: &str) -> &str {
    let trimmed = raw.strip_suffix('/').unwrap_or(raw);
    trimmed.strip_suffix(".git").unwrap_or(trimmed).trim_end_matches('/')
}
