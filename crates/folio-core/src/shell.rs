//! Command processing and tab completion.
//!
//! The shell is the single entry point for typed commands, navigation
//! shortcuts, and the startup command. It normalizes the input, echoes it, and
//! hands the registry's payload (or the not-found message) to the engine.

use crate::config::Config;
use crate::engine::{RenderEngine, SessionId};
use crate::output::{OutputBuffer, RenderTarget};
use crate::registry::CommandRegistry;

/// Heading of the completion listing.
const COMPLETIONS_HEADER: &str = "Possible completions:";

/// The message rendered for an unknown command.
pub fn not_found_message(command: &str) -> String {
    format!("command not found: {command}. type 'help' to see available commands.")
}

/// What [`Shell::process_command`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The input was empty after trimming.
    Ignored,
    /// A registered command ran. `session` is `None` when its payload cleared
    /// the output.
    Ran {
        command: String,
        session: Option<SessionId>,
    },
    /// No command has this name; the not-found message is rendering.
    NotFound {
        command: String,
        session: Option<SessionId>,
    },
}

/// Result of tab completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing matches; the input stays as it is.
    None,
    /// Exactly one match: the new input, with a trailing space.
    Unique(String),
    /// Several matches; the listing is rendering.
    Many(Vec<String>),
}

/// Command pipeline over a registry and a render engine.
#[derive(Debug)]
pub struct Shell<T: RenderTarget = OutputBuffer> {
    registry: CommandRegistry,
    engine: RenderEngine<T>,
    prompt: String,
}

impl<T: RenderTarget> Shell<T> {
    pub fn new(registry: CommandRegistry, engine: RenderEngine<T>, prompt: impl Into<String>) -> Self {
        Self {
            registry,
            engine,
            prompt: prompt.into(),
        }
    }

    /// Builds the registry and engine described by `config` around `target`.
    pub fn from_config(config: &Config, target: T) -> Self {
        Self::new(
            CommandRegistry::from_specs(&config.commands),
            RenderEngine::new(target, config.typing, config.session_policy),
            config.prompt.clone(),
        )
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &RenderEngine<T> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RenderEngine<T> {
        &mut self.engine
    }

    pub fn into_engine(self) -> RenderEngine<T> {
        self.engine
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Runs one command line.
    pub fn process_command(&mut self, raw: &str) -> Outcome {
        let command = raw.trim().to_lowercase();
        if command.is_empty() {
            return Outcome::Ignored;
        }

        self.engine.target_mut().echo(&self.prompt, &command);

        if let Some(payload) = self.registry.produce(&command) {
            tracing::info!(command = %command, "command processed");
            let session = self.engine.render(&payload);
            Outcome::Ran { command, session }
        } else {
            tracing::info!(command = %command, "command not found");
            let session = self.engine.render(&not_found_message(&command));
            Outcome::NotFound { command, session }
        }
    }

    /// Completes `input` against every registered name.
    pub fn complete(&mut self, input: &str) -> Completion {
        let matches: Vec<String> = self
            .registry
            .complete(input.trim())
            .into_iter()
            .map(str::to_string)
            .collect();

        match matches.as_slice() {
            [] => Completion::None,
            [only] => Completion::Unique(format!("{only} ")),
            _ => {
                self.engine.render(&completion_listing(&matches));
                Completion::Many(matches)
            }
        }
    }
}

fn completion_listing(matches: &[String]) -> String {
    let items: Vec<String> = matches.iter().map(|m| format!("  {m}")).collect();
    format!("{COMPLETIONS_HEADER}\n\n{}", items.join("\n"))
}
