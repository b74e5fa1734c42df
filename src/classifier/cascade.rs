use crate::model::{Intent, MatchType};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;

static SELL_EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<:WTS:\d*>|<:Selling:\d*>").expect("valid regex"));
static BUY_EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<:WTB:\d*>|<:Buying:\d*>").expect("valid regex"));
static TRADE_EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<:WTT:\d*>|<:Trading:\d*>").expect("valid regex"));

static CURRENCY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[$€£]").expect("valid regex"));

/// Classifier configuration: the manual override table plus the keyword
/// lists, loaded as data so curation never touches this module.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub overrides: HashMap<String, Intent>,
    pub sell_keywords: Vec<String>,
    pub buy_keywords: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            sell_keywords: to_strings(&["sell", "selling", "wts", "shipped"]),
            // "trade" deliberately lives in the buy list; the keyword tier
            // predates trade-aware tagging and conflates the two.
            buy_keywords: to_strings(&["buy", "buying", "wtb", "looking", "trade"]),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[derive(Debug, Clone, Copy)]
pub struct Classification {
    pub intent: Intent,
    pub match_type: MatchType,
}

pub struct IntentClassifier {
    overrides: HashMap<String, Intent>,
    sell_keywords: Option<Regex>,
    buy_keywords: Option<Regex>,
}

impl IntentClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            sell_keywords: keyword_regex(&config.sell_keywords),
            buy_keywords: keyword_regex(&config.buy_keywords),
            overrides: config.overrides,
        }
    }

    /// Runs the cascade in strict priority order; the first tier that
    /// produces a decision wins and later tiers are never consulted.
    /// Total: every message ends up with exactly one intent.
    pub fn classify(&self, id: &str, message: &str) -> Classification {
        if let Some(&intent) = self.overrides.get(id) {
            return Classification {
                intent,
                match_type: MatchType::Override,
            };
        }

        if let Some(intent) = self.emoji_intent(message) {
            return Classification {
                intent,
                match_type: MatchType::Emoji,
            };
        }

        if keyword_match(&self.sell_keywords, message) {
            return Classification {
                intent: Intent::Sell,
                match_type: MatchType::Regex,
            };
        }
        if keyword_match(&self.buy_keywords, message) {
            return Classification {
                intent: Intent::Buy,
                match_type: MatchType::Regex,
            };
        }

        if CURRENCY.is_match(message) {
            return Classification {
                intent: Intent::Sell,
                match_type: MatchType::MoneyRegex,
            };
        }

        Classification {
            intent: Intent::Unknown,
            match_type: MatchType::None,
        }
    }

    // Exactly one shortcode family must be present; a message tagged with
    // two families is ambiguous and falls through to the next tier.
    fn emoji_intent(&self, message: &str) -> Option<Intent> {
        let sell = SELL_EMOJI.is_match(message);
        let buy = BUY_EMOJI.is_match(message);
        let trade = TRADE_EMOJI.is_match(message);

        match (sell, buy, trade) {
            (true, false, false) => Some(Intent::Sell),
            (false, true, false) => Some(Intent::Buy),
            (false, false, true) => Some(Intent::Trade),
            _ => None,
        }
    }
}

fn keyword_regex(keywords: &[String]) -> Option<Regex> {
    if keywords.is_empty() {
        return None;
    }
    let pattern = keywords
        .iter()
        .map(|keyword| regex::escape(keyword))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&pattern).case_insensitive(true).build().ok()
}

fn keyword_match(pattern: &Option<Regex>, message: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(message))
}
