//! Command registry.
//!
//! An ordered table of portfolio commands. Each entry produces a plain-text
//! payload on demand; the built-in entries can be overridden and extended from
//! the `[[commands]]` section of the config.

use std::fmt;
use std::sync::Arc;

use crate::config::CommandSpec;

/// Zero-argument payload producer.
pub type Producer = Arc<dyn Fn() -> String + Send + Sync>;

/// How a command produces its payload.
#[derive(Clone)]
pub enum CommandOutput {
    /// Fixed text.
    Text(String),
    /// Text computed each time the command runs.
    Generated(Producer),
    /// The listing of visible commands.
    Help,
    /// The empty payload, which clears the output.
    Clear,
}

impl fmt::Debug for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutput::Text(text) => f.debug_tuple("Text").field(text).finish(),
            CommandOutput::Generated(_) => f.write_str("Generated(..)"),
            CommandOutput::Help => f.write_str("Help"),
            CommandOutput::Clear => f.write_str("Clear"),
        }
    }
}

/// Definition of a command.
#[derive(Debug, Clone)]
pub struct CommandEntry {
    /// Lowercase name the user types.
    pub name: String,
    /// Short description shown by `help`.
    pub description: String,
    /// Hidden commands are left out of `help`.
    pub hidden: bool,
    pub output: CommandOutput,
}

impl CommandEntry {
    pub fn new(name: &str, description: &str, output: CommandOutput) -> Self {
        Self {
            name: normalize(name),
            description: description.to_string(),
            hidden: false,
            output,
        }
    }

    pub fn text(name: &str, description: &str, text: &str) -> Self {
        Self::new(name, description, CommandOutput::Text(text.to_string()))
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

impl From<&CommandSpec> for CommandEntry {
    fn from(spec: &CommandSpec) -> Self {
        // Multi-line TOML strings carry the newlines around their body.
        let mut entry = CommandEntry::text(&spec.name, &spec.description, spec.output.trim());
        entry.hidden = spec.hidden;
        entry
    }
}

const HELP_HEADER: &str = "Available commands:";
const HELP_HINT: &str = "Type any command above or click the navigation links at the top.";
/// Minimum width of the name column in the help listing.
const HELP_NAME_WIDTH: usize = 12;

const WELCOME: &str = "\
Hi, welcome to my interactive portfolio.

Type `help` to see available commands.";

const ABOUT: &str = "\
I build software end to end: backend services, data pipelines, and the
interfaces in front of them.

Set your own text with a [[commands]] entry named \"about\" in config.toml.";

const PROJECTS: &str = "\
▸ Project One
  A short description of the project
    Link: https://example.com

▸ Project Two
  Another project worth showing";

const EXPERIENCE: &str = "\
Work Experience:

Software Engineer | Company (2022 - present)
- What you built and why it mattered.

Type 'projects' to see my recent work.";

const EDUCATION: &str = "\
Education:

Degree | University (2017 - 2021)

Key Topics:
- Data Structures and Algorithms
- Operating Systems";

const SKILLS: &str = "\
Skills:

  • Languages: Rust, Python, SQL
  • Backend: HTTP services, databases, queues
  • Tooling: Git, Linux, CI/CD";

const CONTACT: &str = "\
Contact:

  • Email: someone@example.com
  • GitHub: https://github.com/example
  • Website: https://example.com";

/// Ordered command table.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in commands, with placeholder content.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for entry in [
            CommandEntry::new("help", "Show this help message", CommandOutput::Help),
            CommandEntry::text("welcome", "Welcome message", WELCOME).hidden(),
            CommandEntry::text("about", "Short summary of who I am", ABOUT),
            CommandEntry::text("projects", "Key projects", PROJECTS),
            CommandEntry::text("experience", "Work experience", EXPERIENCE),
            CommandEntry::text("education", "Education", EDUCATION),
            CommandEntry::text("skills", "Key stack areas", SKILLS),
            CommandEntry::text("contact", "Email and social links", CONTACT),
            CommandEntry::new("clear", "Clear the terminal", CommandOutput::Clear),
        ] {
            registry.register(entry);
        }
        registry
    }

    /// Built-ins with the configured commands applied on top.
    pub fn from_specs(specs: &[CommandSpec]) -> Self {
        let mut registry = Self::builtin();
        for spec in specs {
            let entry = CommandEntry::from(spec);
            if entry.name.is_empty() {
                tracing::warn!("ignoring configured command with an empty name");
                continue;
            }
            registry.register(entry);
        }
        registry
    }

    /// Adds a command. A command with the same name is replaced in place.
    pub fn register(&mut self, entry: CommandEntry) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == entry.name) {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Produces the payload of a command.
    pub fn produce(&self, name: &str) -> Option<String> {
        let entry = self.lookup(name)?;
        let payload = match &entry.output {
            CommandOutput::Text(text) => text.clone(),
            CommandOutput::Generated(producer) => producer(),
            CommandOutput::Help => self.help_text(),
            CommandOutput::Clear => String::new(),
        };
        Some(payload)
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Every registered name, hidden ones included, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Names starting with `prefix` (case-sensitive).
    pub fn complete(&self, prefix: &str) -> Vec<&str> {
        self.names().filter(|name| name.starts_with(prefix)).collect()
    }

    /// The `help` listing of visible commands.
    pub fn help_text(&self) -> String {
        let visible: Vec<&CommandEntry> = self.entries.iter().filter(|e| !e.hidden).collect();
        let width = visible
            .iter()
            .map(|e| e.name.chars().count())
            .max()
            .unwrap_or(0)
            .max(HELP_NAME_WIDTH);

        let mut out = String::from(HELP_HEADER);
        out.push_str("\n\n");
        for entry in &visible {
            out.push_str(&format!("  {:<width$} - {}\n", entry.name, entry.description));
        }
        out.push('\n');
        out.push_str(HELP_HINT);
        out
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let registry = CommandRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "help",
                "welcome",
                "about",
                "projects",
                "experience",
                "education",
                "skills",
                "contact",
                "clear"
            ]
        );
    }

    #[test]
    fn test_help_lists_visible_commands_only() {
        let help = CommandRegistry::builtin().produce("help").unwrap();
        assert!(help.starts_with("Available commands:\n\n"));
        assert!(help.contains("  about        - Short summary of who I am\n"));
        assert!(help.contains("  clear        - Clear the terminal\n"));
        assert!(!help.contains("welcome"));
        assert!(help.ends_with(HELP_HINT));
    }

    #[test]
    fn test_clear_produces_empty_payload() {
        let registry = CommandRegistry::builtin();
        assert_eq!(registry.produce("clear").as_deref(), Some(""));
    }

    #[test]
    fn test_lookup_missing() {
        let registry = CommandRegistry::builtin();
        assert!(registry.lookup("xyz").is_none());
        assert!(registry.produce("xyz").is_none());
    }

    #[test]
    fn test_config_overrides_in_place_and_appends() {
        let specs = vec![
            CommandSpec {
                name: "About".into(),
                description: "Me".into(),
                output: "custom about".into(),
                hidden: false,
            },
            CommandSpec {
                name: "blog".into(),
                description: "Posts".into(),
                output: "https://blog.example".into(),
                hidden: false,
            },
            CommandSpec {
                name: "  ".into(),
                description: String::new(),
                output: "ignored".into(),
                hidden: false,
            },
        ];
        let registry = CommandRegistry::from_specs(&specs);

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names[2], "about");
        assert_eq!(names.last(), Some(&"blog"));
        assert_eq!(names.len(), 10);
        assert_eq!(registry.produce("about").as_deref(), Some("custom about"));
        assert!(registry.help_text().contains("  blog         - Posts\n"));
    }

    #[test]
    fn test_configured_output_is_trimmed() {
        let config: crate::config::Config = toml::from_str(
            "[[commands]]\nname = \"about\"\noutput = \"\"\"\nHi.\nWebsite: https://example.com\n\"\"\"\n",
        )
        .unwrap();
        let registry = CommandRegistry::from_specs(&config.commands);
        assert_eq!(
            registry.produce("about").as_deref(),
            Some("Hi.\nWebsite: https://example.com")
        );
    }

    #[test]
    fn test_generated_output_runs_each_time() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new(
            "count",
            "Counts",
            CommandOutput::Generated(Arc::new(move || {
                (counter.fetch_add(1, Ordering::SeqCst) + 1).to_string()
            })),
        ));

        assert_eq!(registry.produce("count").as_deref(), Some("1"));
        assert_eq!(registry.produce("count").as_deref(), Some("2"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_complete_by_prefix() {
        let mut registry = CommandRegistry::new();
        for name in ["help", "about", "projects"] {
            registry.register(CommandEntry::text(name, "", ""));
        }
        assert_eq!(registry.complete("pro"), vec!["projects"]);
        assert!(registry.complete("z").is_empty());
        assert_eq!(registry.complete("").len(), 3);
    }

    #[test]
    fn test_hidden_commands_still_complete() {
        let registry = CommandRegistry::builtin();
        assert_eq!(registry.complete("wel"), vec!["welcome"]);
    }

    #[test]
    fn test_long_names_widen_help_column() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::text("a-very-long-name", "Long", ""));
        registry.register(CommandEntry::text("x", "Short", ""));
        let help = registry.help_text();
        assert!(help.contains("  a-very-long-name - Long\n"));
        assert!(help.contains("  x                - Short\n"));
    }
}
