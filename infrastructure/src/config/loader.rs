//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

const PROJECT_FILES: [&str; 2] = ["askcli.toml", ".askcli.toml"];
const ENV_PREFIX: &str = "ASKCLI_";

/// One place configuration may come from, as reported by `--show-config`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub label: &'static str,
    pub location: String,
    pub found: bool,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. `ASKCLI_` environment variables (`__` separates nested keys)
    /// 3. Project root: `./askcli.toml` or `./.askcli.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/askcli/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::load_from(config_path, Path::new("."), Self::global_config_path())
    }

    /// [`load`](Self::load) with explicit project directory and global path
    pub fn load_from(
        config_path: Option<&Path>,
        project_dir: &Path,
        global_path: Option<PathBuf>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global_path.filter(|p| p.exists()) {
            debug!(path = %global_path.display(), "Loading global config");
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(path) = Self::find_project_config(project_dir) {
            debug!(path = %path.display(), "Loading project config");
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(path) = config_path {
            if !path.is_file() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            debug!(path = %path.display(), "Loading explicit config");
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/askcli/config.toml if set, otherwise the
    /// platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("askcli").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::find_project_config(Path::new("."))
    }

    fn find_project_config(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Configuration sources in priority order (for --show-config)
    pub fn sources(config_path: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = Vec::new();

        if let Some(path) = config_path {
            sources.push(ConfigSource {
                label: "Explicit",
                location: path.display().to_string(),
                found: path.exists(),
            });
        }

        let env_found = std::env::vars().any(|(key, _)| key.starts_with(ENV_PREFIX));
        sources.push(ConfigSource {
            label: "Env",
            location: format!("{}*", ENV_PREFIX),
            found: env_found,
        });

        sources.push(match Self::project_config_path() {
            Some(path) => ConfigSource {
                label: "Project",
                location: path.display().to_string(),
                found: true,
            },
            None => ConfigSource {
                label: "Project",
                location: format!("./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]),
                found: false,
            },
        });

        if let Some(path) = Self::global_config_path() {
            sources.push(ConfigSource {
                label: "Global",
                found: path.exists(),
                location: path.display().to_string(),
            });
        }

        sources.push(ConfigSource {
            label: "Default",
            location: "built-in defaults".to_string(),
            found: true,
        });
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.tools.is_empty());
        assert!(config.security.enabled);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("askcli"));
    }

    #[test]
    fn test_project_file_overrides_global() {
        let global_dir = tempfile::tempdir().unwrap();
        let global = global_dir.path().join("config.toml");
        fs::write(
            &global,
            "[execution]\ntimeout_secs = 100\nhelp_timeout_secs = 5\n",
        )
        .unwrap();

        let project = tempfile::tempdir().unwrap();
        fs::write(
            project.path().join(".askcli.toml"),
            "[execution]\ntimeout_secs = 200\n\n[[tools]]\ncommand = \"qwen\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from(None, project.path(), Some(global)).unwrap();
        assert_eq!(config.execution.timeout_secs, 200);
        assert_eq!(config.execution.help_timeout_secs, 5);
        assert_eq!(config.tools.len(), 1);
    }

    #[test]
    fn test_explicit_file_wins() {
        let project = tempfile::tempdir().unwrap();
        fs::write(
            project.path().join("askcli.toml"),
            "[security]\nenabled = true\n",
        )
        .unwrap();
        let explicit = project.path().join("custom.toml");
        fs::write(&explicit, "[security]\nenabled = false\n").unwrap();

        let config =
            ConfigLoader::load_from(Some(&explicit), project.path(), None).unwrap();
        assert!(!config.security.enabled);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let project = tempfile::tempdir().unwrap();
        let missing = project.path().join("nope.toml");
        assert!(ConfigLoader::load_from(Some(&missing), project.path(), None).is_err());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let project = tempfile::tempdir().unwrap();
        fs::write(project.path().join("askcli.toml"), "[[tools]\ncommand = ").unwrap();
        assert!(ConfigLoader::load_from(None, project.path(), None).is_err());
    }

    #[test]
    fn test_sources_end_with_defaults() {
        let sources = ConfigLoader::sources(Some(Path::new("/nonexistent/askcli.toml")));
        assert_eq!(sources[0].label, "Explicit");
        assert!(!sources[0].found);
        assert_eq!(sources.last().unwrap().label, "Default");
    }
}
