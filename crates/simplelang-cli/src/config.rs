//! Project configuration (`simplelang.toml`) parsing and validation.

use serde::{Deserialize, Serialize};
use simplelang_core::codegen::{EmitConfig, IndentStyle};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "simplelang.toml";

/// Errors that can occur when loading project configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{0}': {1}")]
    Invalid(&'static str, &'static str),
}

/// The complete simplelang.toml file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Input and output locations.
    pub build: BuildConfig,

    /// Go output formatting.
    pub emit: EmitConfig,
}

/// The `[build]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Source file to transpile.
    pub input: PathBuf,

    /// Where the Go file is written.
    pub output: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("in/main.sl"),
            output: PathBuf::from("out/main.go"),
        }
    }
}

impl ProjectConfig {
    /// Load a config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `simplelang.toml` from `dir`, or the defaults when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        tracing::debug!(path = %path.display(), "loading config");
        Self::from_path(path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.build.input.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("build.input", "path cannot be empty"));
        }
        if self.build.output.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("build.output", "path cannot be empty"));
        }
        if self.emit.indent == IndentStyle::Spaces(0) {
            return Err(ConfigError::Invalid(
                "emit.indent",
                "space indentation needs at least one space",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_empty_config() {
        let config = ProjectConfig::parse("").unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.build.input, PathBuf::from("in/main.sl"));
        assert_eq!(config.build.output, PathBuf::from("out/main.go"));
        assert_eq!(config.emit.indent, IndentStyle::Tabs);
    }

    #[test]
    fn parse_full_config() {
        let config = ProjectConfig::parse(
            r#"
[build]
input = "src/app.sl"
output = "gen/app.go"

[emit]
indent = { spaces = 2 }
trailing-newline = false
"#,
        )
        .unwrap();

        assert_eq!(config.build.input, PathBuf::from("src/app.sl"));
        assert_eq!(config.build.output, PathBuf::from("gen/app.go"));
        assert_eq!(config.emit.indent, IndentStyle::Spaces(2));
        assert!(!config.emit.trailing_newline);
    }

    #[test]
    fn partial_build_section_keeps_defaults() {
        let config = ProjectConfig::parse("[build]\noutput = \"go/main.go\"\n").unwrap();
        assert_eq!(config.build.input, PathBuf::from("in/main.sl"));
        assert_eq!(config.build.output, PathBuf::from("go/main.go"));
    }

    #[test]
    fn reject_unknown_fields() {
        let err = ProjectConfig::parse("[build]\nsource = \"x.sl\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = ProjectConfig::parse("[target]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reject_zero_width_indent() {
        let err = ProjectConfig::parse("[emit]\nindent = { spaces = 0 }\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("emit.indent", _)));
    }

    #[test]
    fn reject_empty_paths() {
        let err = ProjectConfig::parse("[build]\ninput = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("build.input", _)));
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn load_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[emit]\nindent = { spaces = 4 }\n",
        )
        .unwrap();

        let config = ProjectConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.emit.indent, IndentStyle::Spaces(4));
    }

    #[test]
    fn load_invalid_file_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[build\n").unwrap();
        assert!(ProjectConfig::load_or_default(dir.path()).is_err());
    }
}
