//! Subcommand table parsing.

use helpwrap_core::OrderedMap;

use super::PATTERNS;

/// Collects `  name  description` rows into name → description.
///
/// A trailing `*` on the name (plugin marker) is dropped. Later duplicates
/// replace earlier ones. No rows means the command is a leaf.
pub fn parse_command_table(text: &str) -> OrderedMap<String> {
    let mut commands = OrderedMap::new();
    for line in text.lines() {
        if let Some(caps) = PATTERNS.command_row.captures(line) {
            commands.insert(caps[1].to_string(), caps[2].to_string());
        }
    }
    commands
}
