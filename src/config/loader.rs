//! Config file discovery and loading

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

use super::Config;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GCLONE_CONFIG";

/// Prefix for per-setting overrides, e.g. `GCLONE_DEFAULT_DIRECTORY`.
pub const ENV_PREFIX: &str = "GCLONE_";

const CONFIG_FILE_NAMES: &[&str] = &["config.toml", "config.yaml", "config.yml"];

/// The config files to layer, lowest precedence first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    pub discovered: Vec<PathBuf>,
    pub explicit: Option<PathBuf>,
}

impl ConfigSources {
    /// Look for `config.{toml,yaml,yml}` under `/etc/gclone`, the platform
    /// config directory and `~/.config/gclone`, plus `$GCLONE_CONFIG`.
    pub fn discover() -> Self {
        let mut search_dirs = vec![PathBuf::from("/etc/gclone")];
        if let Some(config_dir) = dirs::config_dir() {
            search_dirs.push(config_dir.join("gclone"));
        }
        if let Some(home) = dirs::home_dir() {
            let dotconfig = home.join(".config").join("gclone");
            if !search_dirs.contains(&dotconfig) {
                search_dirs.push(dotconfig);
            }
        }

        let discovered = search_dirs
            .iter()
            .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
            .filter(|path| path.is_file())
            .collect();

        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);

        Self { discovered, explicit }
    }
}

/// Load the layered configuration.
///
/// An explicit config file must exist and parse. A discovered file that
/// fails to parse is skipped with a warning.
pub fn load_config(sources: &ConfigSources) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    for path in &sources.discovered {
        let candidate = merge_file(figment.clone(), path)?;
        match candidate.extract::<Config>() {
            Ok(_) => {
                tracing::info!("Using config file: {}", path.display());
                figment = candidate;
            }
            Err(e) => {
                tracing::warn!("Failed to parse auto-discovered config {}: {}", path.display(), e);
            }
        }
    }

    if let Some(path) = &sources.explicit {
        if !path.is_file() {
            anyhow::bail!("Config file named by {CONFIG_ENV} does not exist: {}", path.display());
        }
        figment = merge_file(figment, path)?;
        tracing::info!("Using config file: {}", path.display());
    }

    figment.merge(Env::prefixed(ENV_PREFIX)).extract().context("Invalid gclone configuration")
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => Ok(figment.merge(Toml::file(path))),
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        other => {
            anyhow::bail!("Unsupported config extension '.{}' for file {}", other, path.display())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn load(sources: &ConfigSources) -> figment::error::Result<Config> {
        load_config(sources).map_err(|e| figment::Error::from(format!("{e:#}")))
    }

    #[test]
    fn test_defaults_when_nothing_is_configured() {
        Jail::expect_with(|_jail| {
            let cfg = load(&ConfigSources::default())?;
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.default_directory, "~/code");
            assert!(!cfg.fail_on_existing);
            assert_eq!(cfg.git, "git");
            Ok(())
        });
    }

    #[test]
    fn test_discovered_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "default_directory = '/srv/repos'\n")?;
            let sources = ConfigSources {
                discovered: vec![jail.directory().join("config.toml")],
                explicit: None,
            };
            let cfg = load(&sources)?;
            assert_eq!(cfg.default_directory, "/srv/repos");
            assert!(!cfg.fail_on_existing);
            Ok(())
        });
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        Jail::expect_with(|jail| {
            jail.create_file("system.toml", "default_directory = '/srv/repos'\ngit = 'git2'\n")?;
            jail.create_file("user.yaml", "default_directory: ~/src\n")?;
            let sources = ConfigSources {
                discovered: vec![
                    jail.directory().join("system.toml"),
                    jail.directory().join("user.yaml"),
                ],
                explicit: None,
            };
            let cfg = load(&sources)?;
            assert_eq!(cfg.default_directory, "~/src");
            assert_eq!(cfg.git, "git2");
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_files() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "default_directory = '/srv/repos'\n")?;
            jail.set_env("GCLONE_DEFAULT_DIRECTORY", "/tmp/elsewhere");
            jail.set_env("GCLONE_FAIL_ON_EXISTING", "true");
            let sources = ConfigSources {
                discovered: vec![jail.directory().join("config.toml")],
                explicit: None,
            };
            let cfg = load(&sources)?;
            assert_eq!(cfg.default_directory, "/tmp/elsewhere");
            assert!(cfg.fail_on_existing);
            Ok(())
        });
    }

    #[test]
    fn test_numeric_and_boolean_env_values_are_strings() {
        Jail::expect_with(|jail| {
            jail.set_env("GCLONE_DEFAULT_DIRECTORY", "2024");
            jail.set_env("GCLONE_GIT", "true");
            let cfg = load(&ConfigSources::default())?;
            assert_eq!(cfg.default_directory, "2024");
            assert_eq!(cfg.git, "true");
            Ok(())
        });
    }

    #[test]
    fn test_numeric_file_value_is_a_string() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "default_directory: 2024\n")?;
            let sources = ConfigSources {
                discovered: vec![jail.directory().join("config.yaml")],
                explicit: None,
            };
            let cfg = load(&sources)?;
            assert_eq!(cfg.default_directory, "2024");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_discovered_file_is_skipped() {
        Jail::expect_with(|jail| {
            jail.create_file("good.toml", "default_directory = '/srv/repos'\n")?;
            jail.create_file("bad.toml", "fail_on_existing = 'maybe'\n")?;
            let sources = ConfigSources {
                discovered: vec![jail.directory().join("good.toml"), jail.directory().join("bad.toml")],
                explicit: None,
            };
            let cfg = load(&sources)?;
            assert_eq!(cfg.default_directory, "/srv/repos");
            assert!(!cfg.fail_on_existing);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_explicit_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.toml", "fail_on_existing = 'maybe'\n")?;
            let sources =
                ConfigSources { discovered: vec![], explicit: Some(jail.directory().join("bad.toml")) };
            assert!(load_config(&sources).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        Jail::expect_with(|jail| {
            let sources = ConfigSources {
                discovered: vec![],
                explicit: Some(jail.directory().join("missing.toml")),
            };
            let err = load_config(&sources).unwrap_err();
            assert!(err.to_string().contains("does not exist"));
            Ok(())
        });
    }

    #[test]
    fn test_unsupported_extension_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("config.ini", "default_directory=/x\n")?;
            let sources = ConfigSources {
                discovered: vec![],
                explicit: Some(jail.directory().join("config.ini")),
            };
            assert!(load_config(&sources).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_discover_reads_explicit_path_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env(CONFIG_ENV, "/tmp/gclone-test.toml");
            let sources = ConfigSources::discover();
            assert_eq!(sources.explicit, Some(PathBuf::from("/tmp/gclone-test.toml")));
            Ok(())
        });
    }

    #[test]
    fn test_transform_config_carries_settings() {
        let cfg = Config {
            default_directory: "/srv".to_string(),
            fail_on_existing: true,
            git: "git".to_string(),
        };
        let transform = cfg.transform_config();
        assert_eq!(transform.default_directory, "/srv");
        assert!(transform.fail_on_existing);
    }
}
