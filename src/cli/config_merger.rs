//! Configuration merger for CLI arguments and config files
//!
//! CLI flags have the final say over file and environment values.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI argument overrides on top of loaded settings.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base settings the way the CLI asks for.
    ///
    /// `--config` switches to single-file mode and `--env` overrides
    /// `PODCAST_APP_ENV` when choosing `{environment}.toml`.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = match &cli.config {
            Some(path) => ConfigLoader::from_file(path.clone()),
            None => ConfigLoader::new()?,
        };
        let loader = match cli.env {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        };

        Ok(Self::new(loader.load()?))
    }

    /// Settings with CLI overrides applied and validated.
    ///
    /// `serve --log-level` beats `--verbose`/`--quiet`, which beat the files.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Commands::Serve {
            host,
            port,
            log_level,
            ..
        } = cli.command()
        {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use clap::Parser;

    fn base_config() -> Settings {
        Settings {
            jwt: JwtConfig {
                secret: "merger-test-secret-0123456789abcdef".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn merge(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(base_config())
            .merge_cli_args(&cli)
            .unwrap()
    }

    #[test]
    fn test_verbose_and_quiet_flags() {
        assert_eq!(merge(&["podcast-rs", "--verbose"]).logger.level, "debug");
        assert_eq!(merge(&["podcast-rs", "--quiet"]).logger.level, "error");
    }

    #[test]
    fn test_serve_overrides() {
        let merged = merge(&["podcast-rs", "serve", "--host", "0.0.0.0", "--port", "8080"]);
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merged = merge(&["podcast-rs", "--verbose", "serve", "--log-level", "warn"]);
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_invalid_base_config_is_rejected() {
        let cli = Cli::try_parse_from(["podcast-rs"]).unwrap();
        let result = ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli);
        assert!(matches!(result, Err(ConfigError::InvalidSetting { .. })));
    }

    #[test]
    fn test_load_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("podcast.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 4100

[jwt]
secret = "file-secret-0123456789abcdef0123456789"
"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from(["podcast-rs", "--config", path.to_str().unwrap()]).unwrap();
        let merger = ConfigurationMerger::load(&cli).unwrap();
        assert_eq!(merger.config().server.port, 4100);
    }
}
