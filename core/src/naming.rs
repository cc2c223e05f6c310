//! Identifier folding rules.
//!
//! Raw usage tokens and long flags are folded into snake_case parameter
//! names, and command names into PascalCase type names. The folding is
//! deterministic so regenerated code keeps the same signatures.

use crate::CommandNode;

/// Splits text into lowercase alphanumeric words.
fn words(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Folds a usage token into a parameter name.
///
/// Brackets, ellipses and separators are dropped.
///
/// # Examples
///
/// ```
/// use helpwrap_core::naming::param_name_for_token;
///
/// assert_eq!(param_name_for_token("IMAGE"), "image");
/// assert_eq!(param_name_for_token("[CONTAINER...]"), "container");
/// assert_eq!(param_name_for_token("[NAME|ID...]"), "name_id");
/// assert_eq!(param_name_for_token("[REPOSITORY[:TAG]]"), "repository_tag");
/// ```
pub fn param_name_for_token(token: &str) -> String {
    words(token).collect::<Vec<_>>().join("_")
}

/// Folds a long flag (`--build-arg`) into a parameter name (`build_arg`).
pub fn param_name_for_flag(flag: &str) -> String {
    words(flag.trim_start_matches('-'))
        .collect::<Vec<_>>()
        .join("_")
}

/// Folds a command name into a PascalCase type name.
///
/// # Examples
///
/// ```
/// use helpwrap_core::naming::type_name;
///
/// assert_eq!(type_name("compose"), "Compose");
/// assert_eq!(type_name("docker-buildx"), "DockerBuildx");
/// ```
pub fn type_name(name: &str) -> String {
    words(name)
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Folds a command name into a snake_case method/module name.
pub fn method_name(name: &str) -> String {
    words(name).collect::<Vec<_>>().join("_")
}

/// Parameter names of a command's generated method, in signature order.
///
/// Inline args come first, then options. An option whose name is already
/// taken by an inline arg gets a `_flag` suffix.
///
/// # Examples
///
/// ```
/// use helpwrap_core::naming::signature_params;
/// use helpwrap_core::*;
///
/// let mut node = CommandNode::new("Fetch the logs of a container");
/// node.inline_args.insert("CONTAINER", InlineArg::new("CONTAINER", InlineType::Scalar));
/// node.options.insert(
///     "--container",
///     OptionSpec::new("--container", "", TypeSpec::new(OptionType::String, Encoding::Scalar)),
/// );
/// assert_eq!(signature_params(&node), ["container", "container_flag"]);
/// ```
pub fn signature_params(node: &CommandNode) -> Vec<String> {
    let mut params: Vec<String> = node
        .inline_args
        .values()
        .map(|arg| arg.param_name.clone())
        .collect();
    let inline_count = params.len();

    for option in node.options.values() {
        let taken = params[..inline_count].contains(&option.param_name);
        if taken {
            params.push(format!("{}_flag", option.param_name));
        } else {
            params.push(option.param_name.clone());
        }
    }
    params
}
