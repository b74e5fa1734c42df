// Body rendering: collapsed and expanded HTML for a listing. The output is
// trusted markup; this module is the sole sanitizer boundary.
use crate::normalizer::normalize_shortcodes;
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;

static MONEY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d*[$€£]\d*").expect("valid regex"));

/// Formats one message line: link-ifies URLs, emphasizes prices, then
/// rewrites any remaining shortcodes.
pub fn render_line(line: &str) -> String {
    let mut formatted = String::with_capacity(line.len());
    for word in line.split(' ') {
        if word.contains("http") {
            let _ = write!(formatted, "<a href=\"{}\">{}</a> ", word, word);
        } else if MONEY_TOKEN.is_match(word) {
            let _ = write!(formatted, "<span class=\"text-bold\">{}</span> ", word);
        } else {
            formatted.push_str(word);
            formatted.push(' ');
        }
    }
    normalize_shortcodes(&formatted)
}

/// Single-block rendering: empty lines become explicit breaks.
pub fn render_collapsed(message: &str) -> String {
    let mut html = String::new();
    for line in message.split('\n') {
        if line.is_empty() {
            html.push_str("<br/>");
        } else {
            html.push_str(&render_line(line));
        }
    }
    html
}

/// Paragraph-per-line rendering: empty lines are dropped entirely.
pub fn render_expanded(message: &str) -> String {
    let mut html = String::new();
    for line in message.split('\n') {
        if line.is_empty() {
            continue;
        }
        let _ = write!(html, "<p>{}</p>", render_line(line));
    }
    html
}
