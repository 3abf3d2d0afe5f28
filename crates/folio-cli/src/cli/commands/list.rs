//! Commands listing handler.

use folio_core::CommandRegistry;
use folio_core::config::Config;

/// Prints one command per line: name, then description.
pub fn run(config: &Config, all: bool) {
    let registry = CommandRegistry::from_specs(&config.commands);
    for line in listing(&registry, all) {
        println!("{line}");
    }
}

fn listing(registry: &CommandRegistry, all: bool) -> Vec<String> {
    let entries: Vec<_> = registry
        .entries()
        .iter()
        .filter(|entry| all || !entry.hidden)
        .collect();
    let width = entries
        .iter()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|entry| {
            let suffix = if entry.hidden { " (hidden)" } else { "" };
            format!("{:<width$}  {}{suffix}", entry.name, entry.description)
                .trim_end()
                .to_string()
        })
        .collect()
}
