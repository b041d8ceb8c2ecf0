//! Configuration loading and merging
//!
//! Settings are layered with precedence Env > explicit file > discovered
//! files > defaults.

pub mod loader;

pub use loader::{load_config, ConfigSources};

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::transform::{TransformConfig, DEFAULT_DIRECTORY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base directory for destinations derived from the repository URL.
    #[serde(deserialize_with = "scalar_string")]
    pub default_directory: String,

    /// Fail when the destination directory already exists instead of
    /// treating the clone as done.
    pub fail_on_existing: bool,

    /// Program invoked as `<git> clone ...`.
    #[serde(deserialize_with = "scalar_string")]
    pub git: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_directory: DEFAULT_DIRECTORY.to_string(),
            fail_on_existing: false,
            git: "git".to_string(),
        }
    }
}

impl Config {
    pub fn transform_config(&self) -> TransformConfig {
        TransformConfig {
            default_directory: self.default_directory.clone(),
            fail_on_existing: self.fail_on_existing,
        }
    }
}

/// Accept any scalar for a string setting.
///
/// Environment values are typed on the way in, so `GCLONE_DEFAULT_DIRECTORY=2024`
/// arrives as a number and `GCLONE_GIT=true` as a bool.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarString;

    impl Visitor<'_> for ScalarString {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_char<E: de::Error>(self, v: char) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(ScalarString)
}
