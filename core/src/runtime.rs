//! Command-line rendering used by generated wrappers.
//!
//! Generated methods build a [`CommandLine`] token by token, one fixed call
//! per encoding strategy, and hand the rendered string to an injected
//! [`Runner`]. Tests substitute a recording runner; production code can use
//! [`ShellRunner`].
//!
//! # Examples
//!
//! ```
//! use helpwrap_core::runtime::CommandLine;
//!
//! let mut cmd = CommandLine::new("docker");
//! cmd.push("run");
//! cmd.positional("nginx");
//! cmd.presence("--detach", true);
//! cmd.scalar("--name", "web");
//! cmd.joined("--env", &["A=1", "B=2"]);
//! assert_eq!(cmd.render(), "docker run nginx --detach --name=web --env=A=1,B=2");
//! ```

use std::collections::BTreeMap;
use std::fmt::Display;
use std::io;
use std::process::{Child, Command, Stdio};

/// Executes a rendered command line.
///
/// The handle type is whatever the implementation hands back: a child
/// process, a captured output, or a recorded string in tests.
pub trait Runner {
    type Handle;

    fn run(&self, command_line: &str) -> Self::Handle;
}

/// Runs command lines through `sh -c`, inheriting stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl Runner for ShellRunner {
    type Handle = io::Result<Child>;

    fn run(&self, command_line: &str) -> Self::Handle {
        Command::new("sh")
            .arg("-c")
            .arg(command_line)
            .stdin(Stdio::inherit())
            .spawn()
    }
}

/// A value that can appear in a list-valued flag.
pub trait FlagValue {
    fn render_value(&self) -> String;
}

impl FlagValue for &str {
    fn render_value(&self) -> String {
        (*self).to_string()
    }
}

impl FlagValue for String {
    fn render_value(&self) -> String {
        self.clone()
    }
}

/// Filter pairs render as `key=value`.
impl FlagValue for (&str, &str) {
    fn render_value(&self) -> String {
        format!("{}={}", self.0, self.1)
    }
}

impl FlagValue for (String, String) {
    fn render_value(&self) -> String {
        format!("{}={}", self.0, self.1)
    }
}

/// Ordered command-line tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Starts a command line with the program name.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            tokens: vec![program.into()],
        }
    }

    /// Appends a literal token (subcommand name).
    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// Appends one positional value.
    pub fn positional(&mut self, value: &str) {
        self.tokens.push(value.to_string());
    }

    /// Appends each value as its own positional token.
    pub fn positionals(&mut self, values: &[&str]) {
        self.tokens.extend(values.iter().map(|v| (*v).to_string()));
    }

    /// `scalar` encoding: `--flag=value`.
    pub fn scalar(&mut self, flag: &str, value: impl Display) {
        self.tokens.push(format!("{flag}={value}"));
    }

    /// `presence` encoding: bare `--flag` when enabled.
    pub fn presence(&mut self, flag: &str, enabled: bool) {
        if enabled {
            self.tokens.push(flag.to_string());
        }
    }

    /// `joinedList` encoding: one `--flag=a,b,c` occurrence.
    pub fn joined<V: FlagValue>(&mut self, flag: &str, values: &[V]) {
        if values.is_empty() {
            return;
        }
        let joined = values
            .iter()
            .map(FlagValue::render_value)
            .collect::<Vec<_>>()
            .join(",");
        self.tokens.push(format!("{flag}={joined}"));
    }

    /// `repeatedList` encoding: one `--flag=value` per element.
    pub fn repeated<V: FlagValue>(&mut self, flag: &str, values: &[V]) {
        for value in values {
            self.tokens.push(format!("{flag}={}", value.render_value()));
        }
    }

    /// `jsonValue` encoding: `--flag=<json object>`.
    pub fn json(&mut self, flag: &str, value: &BTreeMap<String, String>) {
        let object: serde_json::Map<String, serde_json::Value> = value
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        self.tokens
            .push(format!("{flag}={}", serde_json::Value::Object(object)));
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Joins tokens with single spaces, quoting tokens the shell would split.
    pub fn render(&self) -> String {
        self.tokens
            .iter()
            .map(|token| shell_quote(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn is_shell_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(ch, '-' | '_' | '.' | '/' | ':' | '=' | ',' | '@' | '%' | '+')
}

/// Quotes a token with POSIX single quotes when it holds unsafe characters.
///
/// # Examples
///
/// ```
/// use helpwrap_core::runtime::shell_quote;
///
/// assert_eq!(shell_quote("--name=web"), "--name=web");
/// assert_eq!(shell_quote("echo hi"), "'echo hi'");
/// assert_eq!(shell_quote("it's"), r"'it'\''s'");
/// assert_eq!(shell_quote(""), "''");
/// ```
pub fn shell_quote(token: &str) -> String {
    if !token.is_empty() && token.chars().all(is_shell_safe) {
        return token.to_string();
    }
    format!("'{}'", token.replace('\'', r"'\''"))
}
