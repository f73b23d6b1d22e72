//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

const PROJECT_FILES: [&str; 2] = ["gurubu.toml", ".gurubu.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `GURUBU_*` environment variables (`GURUBU_AI__ENDPOINT=...`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./gurubu.toml` or `./.gurubu.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/gurubu/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        // Add global config (XDG or fallback)
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        // Add explicit config path (highest priority for files)
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("GURUBU_").split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/gurubu/config.toml if set,
    /// otherwise falls back to ~/.config/gurubu/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("gurubu").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Environment: GURUBU_* variables");

        // Project config
        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./gurubu.toml or ./.gurubu.toml");
        }

        // Global config
        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.estimation.room, "default");
        assert!(!config.ai.enabled);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("gurubu"));
    }

    /// Run `f` with cwd, XDG config dir and env vars isolated to a temp jail
    fn in_jail(f: impl FnOnce(&mut Jail) -> figment::Result<()>) {
        Jail::expect_with(|jail| {
            let home = jail.directory().join("xdg");
            jail.set_env("XDG_CONFIG_HOME", home.display());
            f(jail)
        });
    }

    #[test]
    fn test_explicit_path_overrides_defaults() {
        in_jail(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[estimation]
scale = ["1", "2", "3"]
room = "explicit-room"

[output]
format = "json"
"#,
            )?;

            let path = PathBuf::from("custom.toml");
            let config = ConfigLoader::load(Some(&path)).map_err(|e| *e)?;
            assert_eq!(config.estimation.room, "explicit-room");
            assert_eq!(config.estimation.scale, vec!["1", "2", "3"]);
            assert_eq!(config.output.format, Some(gurubu_domain::OutputFormat::Json));
            // Sections absent from the file keep their defaults
            assert!(config.output.color);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_project_file() {
        in_jail(|jail| {
            jail.create_file(
                "gurubu.toml",
                r#"
[estimation]
room = "file-room"

[ai]
timeout_seconds = 5
"#,
            )?;
            jail.set_env("GURUBU_ESTIMATION__ROOM", "env-room");
            jail.set_env("GURUBU_AI__TIMEOUT_SECONDS", 30);

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.estimation.room, "env-room");
            assert_eq!(config.ai.timeout_seconds, Some(30));
            // Untouched keys still come from defaults
            assert_eq!(config.estimation.scale.len(), 8);
            Ok(())
        });
    }

    #[test]
    fn test_project_file_is_picked_up() {
        in_jail(|jail| {
            jail.create_file(".gurubu.toml", "[output]\ncolor = false\n")?;

            assert_eq!(
                ConfigLoader::project_config_path(),
                Some(PathBuf::from(".gurubu.toml"))
            );
            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert!(!config.output.color);
            Ok(())
        });
    }
}
