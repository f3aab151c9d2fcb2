//! Help text generation.

use crate::registry::{Assignment, OptionKind, OptionSpec, PositionalSpec, Registry};

/// Render the help text for `registry`.
///
/// Options and positionals are listed in declaration order, with the built-in
/// help option last. The output is deterministic and never empty.
pub fn render(registry: &Registry) -> String {
    let mut out = String::new();
    if registry.summary().trim().is_empty() {
        out.push_str(registry.program());
        out.push('\n');
    } else {
        out.push_str(&format!(
            "{} - {}\n",
            registry.program(),
            registry.summary().trim()
        ));
    }

    out.push_str(&format!("\nUsage: {}\n", usage(registry)));

    if !registry.positionals().is_empty() {
        out.push_str("\nArguments:\n");
        let rows: Vec<(String, String)> = registry
            .positionals()
            .iter()
            .map(|spec| (spec.display_name(), positional_help(spec)))
            .collect();
        push_rows(&mut out, rows);
    }

    let assignment = registry.settings().assignment;
    out.push_str("\nOptions:\n");
    let rows: Vec<(String, String)> = registry
        .options()
        .iter()
        .chain(std::iter::once(registry.help_option()))
        .map(|spec| (option_left(spec, assignment), option_help(spec)))
        .collect();
    push_rows(&mut out, rows);

    if assignment == Assignment::EqualsOnly {
        out.push_str("\nOption values must be attached with '=', e.g. -x=VALUE.\n");
    }

    out
}

fn push_rows(out: &mut String, rows: Vec<(String, String)>) {
    let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {}\n", left));
        } else {
            out.push_str(&format!("  {:width$}  {}\n", left, help, width = width));
        }
    }
}

fn usage(registry: &Registry) -> String {
    let assignment = registry.settings().assignment;
    let mut parts = vec![registry.program().to_string()];

    for spec in registry.options().iter().filter(|s| s.is_required()) {
        let name = match spec.short_name() {
            Some(short) => format!("-{short}"),
            None => spec.display_name(),
        };
        parts.push(format!("{name}{}", value_suffix(spec, assignment)));
    }
    // The help option is always there, so there is always something optional.
    parts.push("[OPTIONS]".to_string());

    for spec in registry.positionals() {
        parts.push(spec.display_name());
    }

    parts.join(" ")
}

fn value_suffix(spec: &OptionSpec, assignment: Assignment) -> String {
    let sep = match assignment {
        Assignment::SpaceOrEquals => " ",
        Assignment::EqualsOnly => "=",
    };
    match spec.kind() {
        OptionKind::Boolean => String::new(),
        OptionKind::Scalar(ty) => format!("{sep}<{}>", ty.placeholder()),
        OptionKind::Vector(ty) => format!("{sep}<{}>...", ty.placeholder()),
    }
}

fn option_left(spec: &OptionSpec, assignment: Assignment) -> String {
    let mut names: Vec<String> = Vec::new();
    if let Some(short) = spec.short_name() {
        names.push(format!("-{short}"));
    }
    if let Some(long) = spec.long_name() {
        names.push(format!("--{long}"));
    }
    let mut out = names.join(", ");
    out.push_str(&value_suffix(spec, assignment));
    out
}

fn option_help(spec: &OptionSpec) -> String {
    let mut out = spec.help_text().trim().to_string();
    if spec.is_required() {
        push_note(&mut out, "(required)");
    }
    if let Some(default) = spec.default() {
        push_note(&mut out, &format!("[default: {default}]"));
    }
    out
}

fn positional_help(spec: &PositionalSpec) -> String {
    let mut out = spec.help_text().trim().to_string();
    push_note(&mut out, &format!("<{}>", spec.value_type().placeholder()));
    if let Some(default) = spec.default() {
        push_note(&mut out, &format!("[default: {default}]"));
    }
    out
}

fn push_note(out: &mut String, note: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(note);
}
