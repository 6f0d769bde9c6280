//! Output configuration for the Go generator

use serde::{Deserialize, Serialize};

/// Indentation used for generated Go code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentStyle {
    /// One tab per level (what gofmt produces)
    #[default]
    Tabs,
    /// The given number of spaces per level
    Spaces(usize),
}

impl IndentStyle {
    /// The text written for one indentation level
    #[must_use]
    pub fn unit(self) -> String {
        match self {
            IndentStyle::Tabs => "\t".to_string(),
            IndentStyle::Spaces(n) => " ".repeat(n),
        }
    }
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EmitConfig {
    /// Indentation style
    pub indent: IndentStyle,
    /// Whether to end the output with a newline
    pub trailing_newline: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent: IndentStyle::Tabs,
            trailing_newline: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EmitConfig::default();
        assert_eq!(config.indent, IndentStyle::Tabs);
        assert!(config.trailing_newline);
        assert_eq!(config.indent.unit(), "\t");
    }

    #[test]
    fn parse_from_toml() {
        let config: EmitConfig = toml::from_str("indent = { spaces = 2 }\ntrailing-newline = false").unwrap();
        assert_eq!(config.indent, IndentStyle::Spaces(2));
        assert_eq!(config.indent.unit(), "  ");
        assert!(!config.trailing_newline);

        let config: EmitConfig = toml::from_str("indent = \"tabs\"").unwrap();
        assert_eq!(config, EmitConfig::default());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: EmitConfig = toml::from_str("").unwrap();
        assert_eq!(config, EmitConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<EmitConfig>("tabs = true").is_err());
    }
}
