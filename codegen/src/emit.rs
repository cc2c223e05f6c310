//! Rust source emission.
//!
//! Every method body is assembled from a fixed set of statements, one per
//! encoding, so the output is byte-for-byte stable for a given document.

use helpwrap_core::{CommandNode, Encoding, InlineType, OptionType, SchemaDocument, naming};

use crate::GenerateOptions;
use crate::ident;

const GENERATED_NOTE: &str = "generated by helpwrap. Do not edit.";

/// One method parameter and the statement that renders it.
struct Param {
    ident: String,
    ty: String,
    doc: String,
    render: Render,
}

enum Render {
    /// `cmd.positional(x)` or `cmd.positionals(x)`.
    Positional(&'static str),
    /// `if let Some(value) = x { cmd.<method>("--flag", value); }`
    Flag { method: &'static str, flag: String },
}

fn value_type(semantic: OptionType) -> &'static str {
    match semantic {
        OptionType::Int => "i64",
        OptionType::Float => "f64",
        OptionType::Bool => "bool",
        OptionType::String => "&str",
        OptionType::StringList | OptionType::MultiValue => "&[&str]",
        OptionType::FilterList => "&[(&str, &str)]",
        OptionType::MapEncoded => "&std::collections::BTreeMap<String, String>",
    }
}

fn encoding_method(encoding: Encoding) -> &'static str {
    match encoding {
        Encoding::Scalar => "scalar",
        Encoding::Presence => "presence",
        Encoding::JoinedList => "joined",
        Encoding::RepeatedList => "repeated",
        Encoding::JsonValue => "json",
    }
}

/// Inline args first, in usage order, then options in help order.
fn params(node: &CommandNode) -> Vec<Param> {
    let names = naming::signature_params(node);
    let (inline_names, option_names) = names.split_at(node.inline_args.len());
    let mut params = Vec::with_capacity(names.len());

    for (arg, name) in node.inline_args.values().zip(inline_names) {
        let (ty, call) = match arg.kind.semantic {
            InlineType::StringList => ("&[&str]", "positionals"),
            InlineType::Scalar | InlineType::Skip => ("&str", "positional"),
        };
        params.push(Param {
            ident: ident::escape(name),
            ty: ty.to_string(),
            doc: arg.description.clone(),
            render: Render::Positional(call),
        });
    }

    for (option, name) in node.options.values().zip(option_names) {
        params.push(Param {
            ident: ident::escape(name),
            ty: format!("Option<{}>", value_type(option.kind.semantic)),
            doc: option.description.clone(),
            render: Render::Flag {
                method: encoding_method(option.kind.encoding),
                flag: option.cli_name.clone(),
            },
        });
    }

    params
}

fn emit_docs(out: &mut String, description: &str, params: &[Param]) {
    let description = description.trim();
    for line in description.lines() {
        out.push_str(&doc_line(line));
    }
    if params.is_empty() {
        return;
    }
    if !description.is_empty() {
        out.push_str("    ///\n");
    }
    for param in params {
        let doc = param.doc.trim();
        if doc.is_empty() {
            out.push_str(&format!("    /// * `{}`\n", param.ident));
        } else {
            out.push_str(&format!("    /// * `{}` - {doc}\n", param.ident));
        }
    }
}

fn doc_line(line: &str) -> String {
    let line = line.trim_end();
    if line.is_empty() {
        "    ///\n".to_string()
    } else {
        format!("    /// {line}\n")
    }
}

/// Emits one method. `group_type` is set when the command returns a group.
fn emit_method(out: &mut String, command: &str, node: &CommandNode, group_type: Option<&str>) {
    let params = params(node);
    emit_docs(out, &node.description, &params);

    let method = ident::method(command);
    let returns = match group_type {
        Some(ty) => format!("{ty}<'r, R>"),
        None => "R::Handle".to_string(),
    };
    if params.is_empty() {
        out.push_str(&format!("    pub fn {method}(&self) -> {returns} {{\n"));
    } else {
        out.push_str(&format!("    pub fn {method}(\n        &self,\n"));
        for param in &params {
            out.push_str(&format!("        {}: {},\n", param.ident, param.ty));
        }
        out.push_str(&format!("    ) -> {returns} {{\n"));
    }

    out.push_str("        let mut cmd = self.cmd.clone();\n");
    out.push_str(&format!("        cmd.push({command:?});\n"));
    for param in &params {
        match &param.render {
            Render::Positional(call) => {
                out.push_str(&format!("        cmd.{call}({});\n", param.ident));
            }
            Render::Flag { method, flag } => {
                out.push_str(&format!("        if let Some(value) = {} {{\n", param.ident));
                out.push_str(&format!("            cmd.{method}({flag:?}, value);\n"));
                out.push_str("        }\n");
            }
        }
    }
    match group_type {
        Some(ty) => out.push_str(&format!("        {ty}::new(self.runner, cmd)\n")),
        None => out.push_str("        self.runner.run(&cmd.render())\n"),
    }
    out.push_str("    }\n");
}

/// Module name of a group (`compose` → `compose`).
pub(crate) fn module_name(group: &str) -> String {
    ident::escape(&naming::method_name(group))
}

/// File name of a group module: the module ident without `r#`.
pub(crate) fn module_file(group: &str) -> String {
    let module = module_name(group);
    format!("{}.rs", module.trim_start_matches("r#"))
}

/// Struct name of a group (`compose` → `DockerCompose`).
pub(crate) fn group_type(options: &GenerateOptions, group: &str) -> String {
    format!("{}{}", options.root_type, naming::type_name(group))
}

fn emit_struct(out: &mut String, doc: &str, ty: &str) {
    out.push_str(&format!("/// {doc}\n"));
    out.push_str(&format!("pub struct {ty}<'r, R: Runner> {{\n"));
    out.push_str("    runner: &'r R,\n");
    out.push_str("    cmd: CommandLine,\n");
    out.push_str("}\n\n");
}

/// Emits the root module (`mod.rs`).
pub(crate) fn emit_root(document: &SchemaDocument, options: &GenerateOptions) -> String {
    let mut out = String::new();
    let program = &options.program;
    let root = &options.root_type;

    out.push_str(&format!("//! Typed wrappers for `{program}`, {GENERATED_NOTE}\n\n"));
    out.push_str("#![allow(clippy::too_many_arguments)]\n\n");

    let groups: Vec<&str> = document
        .methods
        .iter()
        .filter(|(_, node)| node.is_group())
        .map(|(name, _)| name)
        .collect();
    if !groups.is_empty() {
        for name in &groups {
            out.push_str(&format!("pub mod {};\n", module_name(name)));
        }
        out.push('\n');
        for name in &groups {
            out.push_str(&format!(
                "pub use {}::{};\n",
                module_name(name),
                group_type(options, name)
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "use {}::{{CommandLine, Runner}};\n\n",
        options.runtime_path
    ));
    emit_struct(&mut out, &format!("Typed entry point for `{program}`."), root);

    out.push_str(&format!("impl<'r, R: Runner> {root}<'r, R> {{\n"));
    out.push_str("    pub fn new(runner: &'r R) -> Self {\n");
    out.push_str("        Self {\n");
    out.push_str("            runner,\n");
    out.push_str(&format!("            cmd: CommandLine::new({program:?}),\n"));
    out.push_str("        }\n");
    out.push_str("    }\n");
    for (name, node) in document.methods.iter() {
        out.push('\n');
        let group = node.is_group().then(|| group_type(options, name));
        emit_method(&mut out, name, node, group.as_deref());
    }
    out.push_str("}\n");
    out
}

/// Emits the module for one top-level group.
pub(crate) fn emit_group(group: &str, node: &CommandNode, options: &GenerateOptions) -> String {
    let mut out = String::new();
    let program = &options.program;
    let ty = group_type(options, group);

    out.push_str(&format!(
        "//! Subcommands of `{program} {group}`, {GENERATED_NOTE}\n\n"
    ));
    out.push_str("#![allow(clippy::too_many_arguments)]\n\n");
    out.push_str(&format!(
        "use {}::{{CommandLine, Runner}};\n\n",
        options.runtime_path
    ));
    emit_struct(&mut out, &format!("Subcommands of `{program} {group}`."), &ty);

    out.push_str(&format!("impl<'r, R: Runner> {ty}<'r, R> {{\n"));
    out.push_str("    pub fn new(runner: &'r R, cmd: CommandLine) -> Self {\n");
    out.push_str("        Self { runner, cmd }\n");
    out.push_str("    }\n");
    for (name, child) in node.subcommands() {
        out.push('\n');
        emit_method(&mut out, name, child, None);
    }
    out.push_str("}\n");
    out
}
