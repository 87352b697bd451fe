//! CLI utilities for binaries
//!
//! Handles configuration path resolution and subcommand parsing.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Quote generator configuration (quote_config.yaml)
    Quotes,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Quotes => "config/quote_config.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        match self {
            ConfigType::Quotes => "QUOTE_CONFIG_PATH",
            ConfigType::Custom(_) => "QUOTE_CONFIG_PATH",
        }
    }
}

/// Load configuration path from environment or use default
///
/// A custom path always wins over the environment.
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    if let ConfigType::Custom(path) = &config_type {
        return PathBuf::from(path);
    }

    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Subcommands of the quote generator binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show a random quote, optionally overriding the saved filter
    Show(Option<String>),
    Add { text: String, category: String },
    Categories,
    Filter(String),
    Export(Option<String>),
    Import(String),
    /// Run one reconciliation cycle
    Sync,
    /// Keep syncing until Ctrl+C
    Run,
    Help,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Show(None));
        };

        let command = match (name.as_str(), rest) {
            ("show", []) => Command::Show(None),
            ("show", [category]) => Command::Show(Some(category.clone())),
            ("add", [text, category]) => Command::Add {
                text: text.clone(),
                category: category.clone(),
            },
            ("categories", []) => Command::Categories,
            ("filter", [category]) => Command::Filter(category.clone()),
            ("export", []) => Command::Export(None),
            ("export", [path]) => Command::Export(Some(path.clone())),
            ("import", [path]) => Command::Import(path.clone()),
            ("sync", []) => Command::Sync,
            ("run", []) => Command::Run,
            ("help" | "--help" | "-h", _) => Command::Help,
            (name, _) => {
                return Err(format!(
                    "Invalid arguments for '{}'\n\n{}",
                    name,
                    Self::usage()
                ))
            }
        };

        Ok(command)
    }

    pub fn usage() -> &'static str {
        "Usage: quote-generator <command>\n\
         \n\
         Commands:\n\
         \x20 show [category]        Show a random quote\n\
         \x20 add <text> <category>  Add a quote\n\
         \x20 categories             List categories\n\
         \x20 filter <category>      Save the category filter\n\
         \x20 export [path]          Export quotes to JSON (default quotes.json)\n\
         \x20 import <path>          Import quotes from a JSON file\n\
         \x20 sync                   Merge quotes from the server once\n\
         \x20 run                    Sync periodically until Ctrl+C"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_config_type_paths() {
        assert_eq!(ConfigType::Quotes.default_path(), "config/quote_config.yaml");

        let custom = ConfigType::Custom("custom/path.yaml".to_string());
        assert_eq!(custom.default_path(), "custom/path.yaml");
    }

    #[test]
    fn test_config_type_env_vars() {
        assert_eq!(ConfigType::Quotes.env_var_name(), "QUOTE_CONFIG_PATH");
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(&[]).unwrap(), Command::Show(None));
        assert_eq!(
            Command::parse(&args(&["show", "Life"])).unwrap(),
            Command::Show(Some("Life".to_string()))
        );
        assert_eq!(
            Command::parse(&args(&["add", "Carpe diem", "Life"])).unwrap(),
            Command::Add {
                text: "Carpe diem".to_string(),
                category: "Life".to_string()
            }
        );
        assert_eq!(Command::parse(&args(&["export"])).unwrap(), Command::Export(None));
        assert_eq!(Command::parse(&args(&["run"])).unwrap(), Command::Run);
        assert_eq!(Command::parse(&args(&["--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn test_parse_rejects_bad_arity() {
        assert!(Command::parse(&args(&["add", "only text"])).is_err());
        assert!(Command::parse(&args(&["import"])).is_err());
        assert!(Command::parse(&args(&["unknown"])).is_err());
    }
}
