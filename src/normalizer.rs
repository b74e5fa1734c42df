use regex::Regex;
use std::sync::LazyLock;

static WTB: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<:WTB:\d*>").expect("valid regex"));
static BUYING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<:Buying:\d*>").expect("valid regex"));
static WTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<:WTS:\d*>").expect("valid regex"));
static SELLING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<:Selling:\d*>").expect("valid regex"));
static WTT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<:WTT:\d*>").expect("valid regex"));
static TRADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<:Trading:\d*>").expect("valid regex"));

/// Rewrites emoji shortcodes word by word into their display labels.
/// Everything else passes through untouched.
pub fn normalize_shortcodes(text: &str) -> String {
    text.split(' ')
        .map(rewrite_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn rewrite_token(word: &str) -> &str {
    if WTB.is_match(word) {
        "WTB"
    } else if BUYING.is_match(word) {
        "Buying"
    } else if WTS.is_match(word) {
        "WTS"
    } else if SELLING.is_match(word) {
        "Selling"
    } else if WTT.is_match(word) {
        "WTT"
    } else if TRADING.is_match(word) {
        "Trading"
    } else {
        word
    }
}
