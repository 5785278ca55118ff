//! Conversion of the Teχ markup found in field data to Markdown.

use once_cell::sync::Lazy;
use regex::Regex;

/// Each pattern is applied once over the whole text, in this order.
static COMMANDS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\\textbf\{([^}]*)\}", "**$1**"),
        (r"\\textit\{([^}]*)\}", "*$1*"),
        (r"\\emph\{([^}]*)\}", "*$1*"),
        (r"\\textsuperscript\{([^}]*)\}", "<sup>$1</sup>"),
        (r"\{([^{}]*)\}", "$1"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("markup pattern is valid"), replacement))
    .collect()
});

static STRAY_COMMAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[a-zA-Z]+\s*").expect("command pattern is valid"));

/// Convert common Teχ markup to Markdown or plain text:
///
/// * `\textbf{…}` becomes `**…**`, `\textit{…}` and `\emph{…}` become `*…*`
/// * `\textsuperscript{…}` becomes `<sup>…</sup>`
/// * innermost groups lose their braces, e.g. `{FooBar}` becomes `FooBar`
/// * “~” becomes a plain space and “--” an en-dash
/// * every other control sequence is dropped
pub fn clean_latex(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut result = text.to_string();
    for (pattern, replacement) in COMMANDS.iter() {
        result = pattern.replace_all(&result, *replacement).into_owned();
    }
    result = result.replace('~', " ").replace("--", "–");
    result = STRAY_COMMAND.replace_all(&result, "").into_owned();
    result.trim().to_string()
}

/// Highlight every occurrence of `name` in an author list.
pub fn bold_author(authors: &str, name: &str) -> String {
    if name.is_empty() {
        return authors.to_string();
    }
    authors.replace(name, &format!("**{}**", name))
}
