//! Path helpers: home expansion and segment-wise joining

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    #[error("cannot expand user-specific home directory in {0}")]
    OtherUser(String),

    #[error("unable to determine the home directory")]
    NoHome,
}

/// Replace a leading `~` or `~/` with the current user's home directory.
///
/// Paths without a leading `~` are returned unchanged. `~user/...` is not
/// supported.
pub fn expand_home(path: &str) -> Result<PathBuf, ExpandError> {
    expand_home_with(path, dirs::home_dir)
}

fn expand_home_with(
    path: &str,
    home_dir: impl FnOnce() -> Option<PathBuf>,
) -> Result<PathBuf, ExpandError> {
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(PathBuf::from(path));
    };

    if !rest.is_empty() && !rest.starts_with(['/', '\\']) {
        return Err(ExpandError::OtherUser(path.to_string()));
    }

    let home = home_dir().ok_or(ExpandError::NoHome)?;
    let rest = rest.trim_start_matches(['/', '\\']);
    if rest.is_empty() {
        Ok(home)
    } else {
        Ok(home.join(rest))
    }
}

/// Push each `/`-separated segment of `path` onto `base`.
///
/// Empty, `.` and `..` segments are skipped, so a leading slash can never
/// replace `base` and the result never climbs above it.
pub fn push_segments(base: &mut PathBuf, path: &str) {
    for segment in named_segments(path) {
        base.push(segment);
    }
}

/// The `/`-separated segments of `path` other than empty, `.` and `..`.
pub fn named_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !matches!(*segment, "" | "." | ".."))
}
