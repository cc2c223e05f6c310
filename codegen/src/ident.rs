//! Rust identifier hygiene for generated code.

/// Words that need the `r#` prefix to be used as identifiers (edition 2024).
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

/// Words that cannot be raw identifiers, plus names the method bodies bind.
const SUFFIXED: &[&str] = &["self", "Self", "super", "crate", "_", "cmd"];

/// Makes a snake_case name usable as a Rust identifier.
pub fn escape(name: &str) -> String {
    if SUFFIXED.contains(&name) {
        return format!("{name}_");
    }
    if name.starts_with(|ch: char| ch.is_ascii_digit()) {
        return format!("_{name}");
    }
    if RAW_KEYWORDS.contains(&name) {
        return format!("r#{name}");
    }
    name.to_string()
}

/// Method name for a command; `new` is taken by the constructor.
pub fn method(name: &str) -> String {
    let folded = helpwrap_core::naming::method_name(name);
    if folded == "new" {
        return "new_".to_string();
    }
    escape(&folded)
}
