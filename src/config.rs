//! Configuration: interpreters, theme and terminal options.
//!
//! A [`Config`] is built once at startup from defaults, an optional TOML
//! file and command-line overrides, then passed by value to the pieces that
//! need it. Nothing changes it at runtime.
//!
//! ```toml
//! [shell]
//! program = "zsh"
//! args = ["-c"]
//!
//! [markdown]
//! program = "glow"
//! args = ["-s", "dark", "-"]
//!
//! [ui]
//! prompt = "$ "
//! placeholder = "Enter command..."
//! alternate_screen = true
//! input_poll_ms = 10
//! ```

use crate::controller::KeyMap;
use crate::exec::{Command, InterpreterConfig};
use crate::terminal::TerminalConfig;
use crate::view::Theme;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has the wrong shape.
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },
}

/// Everything the notebook needs at startup.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Interpreters for shell and markdown cells.
    pub interpreters: InterpreterConfig,
    /// Colors and prompt text.
    pub theme: Theme,
    /// Terminal options.
    pub terminal: TerminalConfig,
    /// Key bindings.
    pub keys: KeyMap,
}

/// On-disk shape. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    shell: Option<Command>,
    markdown: Option<Command>,
    #[serde(default)]
    ui: UiSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct UiSection {
    prompt: Option<String>,
    placeholder: Option<String>,
    alternate_screen: Option<bool>,
    input_poll_ms: Option<u64>,
}

impl Config {
    /// Parse a TOML document over the defaults.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::default();
        if let Some(shell) = file.shell {
            config.interpreters.shell = shell;
        }
        if let Some(markdown) = file.markdown {
            config.interpreters.markdown = markdown;
        }
        if let Some(prompt) = file.ui.prompt {
            config.theme.prompt = prompt;
        }
        if let Some(placeholder) = file.ui.placeholder {
            config.theme.placeholder = placeholder;
        }
        if let Some(alternate_screen) = file.ui.alternate_screen {
            config.terminal.alternate_screen = alternate_screen;
        }
        if let Some(ms) = file.ui.input_poll_ms {
            config.terminal.input_poll_timeout = Duration::from_millis(ms);
        }
        Ok(config)
    }

    /// Load a TOML file over the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.interpreters.shell, Command::new("sh", ["-c"]));
        assert_eq!(config.interpreters.markdown, Command::new("echo", ["-e"]));
        assert_eq!(config.theme.prompt, "> ");
        assert!(config.terminal.alternate_screen);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let text = r#"
            [shell]
            program = "zsh"
            args = ["-c"]

            [ui]
            input_poll_ms = 25
        "#;
        let config = Config::from_toml(text, Path::new("grappler.toml")).unwrap();
        assert_eq!(config.interpreters.shell, Command::new("zsh", ["-c"]));
        assert_eq!(config.interpreters.markdown, Command::new("echo", ["-e"]));
        assert_eq!(config.terminal.input_poll_timeout, Duration::from_millis(25));
        assert_eq!(config.theme.placeholder, "Enter command...");
    }

    #[test]
    fn test_command_args_default_to_empty() {
        let text = "[markdown]\nprogram = \"cat\"\n";
        let config = Config::from_toml(text, Path::new("grappler.toml")).unwrap();
        assert_eq!(config.interpreters.markdown.program, "cat");
        assert!(config.interpreters.markdown.args.is_empty());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_toml("[ui]\ncolour = 1\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\nprompt = \"$ \"\nalternate_screen = false").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.theme.prompt, "$ ");
        assert!(!config.terminal.alternate_screen);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
