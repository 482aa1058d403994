use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.,!?-]").expect("character filter is valid"));
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern is valid"));

const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Turns a raw HTML page into a single line of plain text suitable for a prompt.
pub fn clean_text(raw: &str) -> String {
    let document = Html::parse_document(raw);

    let mut text = String::with_capacity(raw.len() / 2);
    for node in document.tree.root().descendants() {
        let Some(chunk) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| SKIPPED_ELEMENTS.contains(&element.name()))
        });
        if !hidden {
            text.push_str(chunk);
            text.push(' ');
        }
    }

    let text = DISALLOWED.replace_all(&text, "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Renders the first number found as "N.N years", e.g. "3+ yrs" -> "3.0 years".
/// Strings without a number come back unchanged.
pub fn format_experience(experience: &str) -> String {
    match NUMBER
        .find(experience)
        .and_then(|m| m.as_str().parse::<f64>().ok())
    {
        Some(years) => format!("{:.1} years", years),
        None => experience.to_string(),
    }
}
