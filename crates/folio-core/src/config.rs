//! Configuration management for folio.
//!
//! Loads configuration from ${FOLIO_HOME}/config.toml with sensible defaults.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::clock::Millis;

/// What happens to a running animation when a new command starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionPolicy {
    /// Cancel the running session's timers; only the newest output animates.
    #[default]
    Cancel,
    /// Let earlier sessions keep typing into their own blocks.
    Overlap,
}

impl SessionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionPolicy::Cancel => "cancel",
            SessionPolicy::Overlap => "overlap",
        }
    }
}

/// Typing animation delays, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Delay between two characters of a line.
    pub char_delay_ms: Millis,
    /// Pause after a blank line.
    pub blank_line_delay_ms: Millis,
    /// Pause after a typed line.
    pub line_delay_ms: Millis,
}

impl TypingConfig {
    const DEFAULT_CHAR_DELAY_MS: Millis = 15;
    const DEFAULT_BLANK_LINE_DELAY_MS: Millis = 50;
    const DEFAULT_LINE_DELAY_MS: Millis = 80;

    /// Zero delays everywhere: output appears as fast as the host advances time.
    pub fn instant() -> Self {
        Self {
            char_delay_ms: 0,
            blank_line_delay_ms: 0,
            line_delay_ms: 0,
        }
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            char_delay_ms: Self::DEFAULT_CHAR_DELAY_MS,
            blank_line_delay_ms: Self::DEFAULT_BLANK_LINE_DELAY_MS,
            line_delay_ms: Self::DEFAULT_LINE_DELAY_MS,
        }
    }
}

/// A navigation shortcut: a label that submits a literal command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub command: String,
}

impl NavItem {
    fn new(label: &str, command: &str) -> Self {
        Self {
            label: label.to_string(),
            command: command.to_string(),
        }
    }
}

/// A user-defined command, or an override of a built-in one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub output: String,
    /// Hidden commands are left out of `help` but still run and complete.
    #[serde(default)]
    pub hidden: bool,
}

/// Commented template embedded at build time.
///
/// Regenerate it with `cargo xtask update-default-config` after changing a
/// default.
const TEMPLATE: &str = include_str!("../default_config.toml");

/// Copies every value of `values` into `doc`, descending into tables that
/// exist on both sides so the template's comments and key order survive.
/// Arrays of tables (`[[nav]]`) are taken wholesale.
fn overlay(doc: &mut toml_edit::Table, values: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, item) in values {
        match (doc.get_mut(key), item) {
            (_, Item::None) => {}
            (Some(Item::Table(existing)), Item::Table(incoming)) => overlay(existing, incoming),
            _ => {
                doc.insert(key, item.clone());
            }
        }
    }
}

pub mod paths {
    //! Path resolution for folio configuration and data directories.
    //!
    //! FOLIO_HOME resolution order:
    //! 1. FOLIO_HOME environment variable (if set)
    //! 2. ~/.config/folio (default)
    //! 3. ./.folio when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the folio home directory.
    pub fn folio_home() -> PathBuf {
        if let Ok(home) = std::env::var("FOLIO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".folio"),
            |h| h.join(".config").join("folio"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        folio_home().join("config.toml")
    }

    /// Returns the directory holding rolling log files.
    pub fn logs_dir() -> PathBuf {
        folio_home().join("logs")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt shown before the input line and in command echoes.
    pub prompt: String,

    /// Command processed once after startup. Empty disables it.
    pub startup_command: String,

    /// Delay before the startup command runs.
    pub startup_delay_ms: Millis,

    /// What a new command does to a still-running animation.
    pub session_policy: SessionPolicy,

    /// Blank columns kept to the left of block output.
    pub output_margin: u16,

    pub typing: TypingConfig,

    /// Navigation bar entries, in display order.
    pub nav: Vec<NavItem>,

    /// Extra commands, or overrides of built-ins with the same name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandSpec>,
}

impl Config {
    const DEFAULT_PROMPT: &str = "visitor@folio:~$";
    const DEFAULT_STARTUP_COMMAND: &str = "welcome";
    const DEFAULT_STARTUP_DELAY_MS: Millis = 200;
    const DEFAULT_OUTPUT_MARGIN: u16 = 1;

    /// Reads `${FOLIO_HOME}/config.toml`.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Reads `path`. A missing file yields the defaults; keys absent from the
    /// file keep their default values.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read config from {}", path.display()));
            }
        };

        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Writes the commented template to `path`, creating parent directories.
    /// Never overwrites an existing file.
    pub fn init(path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        let mut staged = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to stage config in {}", dir.display()))?;
        staged
            .write_all(TEMPLATE.as_bytes())
            .context("Failed to write config template")?;

        // The rename is atomic and refuses to replace an existing file.
        staged.persist_noclobber(path).map_err(|err| {
            if err.error.kind() == io::ErrorKind::AlreadyExists {
                anyhow::anyhow!("Config file already exists at {}", path.display())
            } else {
                anyhow::Error::new(err.error)
                    .context(format!("Failed to write config to {}", path.display()))
            }
        })?;
        Ok(())
    }

    /// Renders the template with the values of `Config::default()` filled in.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let defaults: DocumentMut = toml::to_string(&Config::default())
            .context("Failed to serialize default config")?
            .parse()
            .context("Failed to re-parse serialized defaults")?;
        let mut doc: DocumentMut = TEMPLATE
            .parse()
            .context("Failed to parse embedded config template")?;

        overlay(doc.as_table_mut(), defaults.as_table());
        Ok(doc.to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: Self::DEFAULT_PROMPT.to_string(),
            startup_command: Self::DEFAULT_STARTUP_COMMAND.to_string(),
            startup_delay_ms: Self::DEFAULT_STARTUP_DELAY_MS,
            session_policy: SessionPolicy::default(),
            output_margin: Self::DEFAULT_OUTPUT_MARGIN,
            typing: TypingConfig::default(),
            nav: vec![
                NavItem::new("About", "about"),
                NavItem::new("Projects", "projects"),
                NavItem::new("Experience", "experience"),
                NavItem::new("Education", "education"),
                NavItem::new("Skills", "skills"),
                NavItem::new("Contact", "contact"),
            ],
            commands: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.typing.char_delay_ms, 15);
        assert_eq!(config.typing.blank_line_delay_ms, 50);
        assert_eq!(config.typing.line_delay_ms, 80);
        assert_eq!(config.session_policy, SessionPolicy::Cancel);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "prompt = \"me@home:~$\"\nsession_policy = \"overlap\"\n\n[typing]\nchar_delay_ms = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.prompt, "me@home:~$");
        assert_eq!(config.session_policy, SessionPolicy::Overlap);
        assert_eq!(config.typing.char_delay_ms, 5);
        assert_eq!(config.typing.line_delay_ms, 80);
        assert_eq!(config.startup_command, "welcome");
        assert_eq!(config.nav.len(), 6);
    }

    #[test]
    fn test_load_commands_and_nav() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            r#"
[[nav]]
label = "Blog"
command = "blog"

[[commands]]
name = "blog"
description = "Read the blog"
output = "Posts: https://blog.example"

[[commands]]
name = "secret"
output = "shh"
hidden = true
"#,
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.nav, vec![NavItem::new("Blog", "blog")]);
        assert_eq!(config.commands.len(), 2);
        assert_eq!(config.commands[0].description, "Read the blog");
        assert!(config.commands[1].hidden);
        assert!(config.commands[1].description.is_empty());
    }

    #[test]
    fn test_load_invalid_policy_is_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "session_policy = \"queue\"\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# [[commands]]"));
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let err = Config::init(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("already exists"));
        assert_eq!(fs::read_to_string(&config_path).unwrap(), "");
    }

    #[test]
    fn test_generate_matches_defaults() {
        let generated = Config::generate().unwrap();
        let config: Config = toml::from_str(&generated).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_folio_home_env_overrides_default() {
        // Only reads the variable the test process was started with.
        let home = paths::folio_home();
        match std::env::var("FOLIO_HOME") {
            Ok(value) => assert_eq!(home, std::path::PathBuf::from(value)),
            Err(_) => assert!(home.ends_with("folio") || home.ends_with(".folio")),
        }
        assert_eq!(paths::config_path(), home.join("config.toml"));
        assert_eq!(paths::logs_dir(), home.join("logs"));
    }

    #[test]
    fn test_default_nav_covers_visible_portfolio_commands() {
        let config = Config::default();
        let commands: Vec<&str> = config
            .nav
            .iter()
            .map(|item| item.command.as_str())
            .collect();
        assert_eq!(commands.first(), Some(&"about"));
        assert_eq!(commands.get(5), Some(&"contact"));
        assert_eq!(commands.len(), 6);
    }
}
