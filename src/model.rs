// Core structs: RawRecord, Listing
use crate::classifier::IntentClassifier;
use crate::normalizer::normalize_shortcodes;
use crate::renderer;
use crate::utils::parse_datetime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{LazyLock, OnceLock};
use thiserror::Error;

// First occurrence of a period, a literal two-character "\n" sequence or a
// comma terminates the title.
static TITLE_TERMINATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.|\\n|,").expect("valid regex"));

static IMAGE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.jpg$|\.gif$|\.png$").expect("valid regex"));

/// One message as it appears in the scraped JSON snapshot. Absent fields
/// deserialize to empty values so a sparse record never fails the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub message_id: String,
    pub user: String,
    pub message: String,
    pub created: String,
    pub avatar_url: String,
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Sell,
    Buy,
    Trade,
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Intent::Sell => "sell",
            Intent::Buy => "buy",
            Intent::Trade => "trade",
            Intent::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// Which cascade tier produced the classification. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    Override,
    Emoji,
    Regex,
    MoneyRegex,
    None,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchType::Override => "override",
            MatchType::Emoji => "emoji",
            MatchType::Regex => "regex",
            MatchType::MoneyRegex => "money-regex",
            MatchType::None => "none",
        };
        write!(f, "{}", label)
    }
}

/// A classified marketplace message. Immutable after construction; derived
/// fields are computed at most once and cached for the listing's lifetime.
#[derive(Debug)]
pub struct Listing {
    record: RawRecord,
    intent: Intent,
    match_type: MatchType,
    external_link: String,
    title: OnceLock<String>,
    collapsed_body: OnceLock<String>,
    expanded_body: OnceLock<String>,
    image_urls: OnceLock<Vec<String>>,
    posted_date: OnceLock<String>,
}

impl Listing {
    pub fn new(record: RawRecord, classifier: &IntentClassifier, link_base: &str) -> Self {
        let classification = classifier.classify(&record.message_id, &record.message);
        let external_link = format!("{}{}", link_base, record.message_id);

        Self {
            record,
            intent: classification.intent,
            match_type: classification.match_type,
            external_link,
            title: OnceLock::new(),
            collapsed_body: OnceLock::new(),
            expanded_body: OnceLock::new(),
            image_urls: OnceLock::new(),
            posted_date: OnceLock::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.record.message_id
    }

    pub fn author(&self) -> &str {
        &self.record.user
    }

    pub fn avatar_url(&self) -> &str {
        &self.record.avatar_url
    }

    pub fn raw_text(&self) -> &str {
        &self.record.message
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn is_sell(&self) -> bool {
        self.intent == Intent::Sell
    }

    pub fn is_buy(&self) -> bool {
        self.intent == Intent::Buy
    }

    pub fn is_trade(&self) -> bool {
        self.intent == Intent::Trade
    }

    pub fn is_unknown(&self) -> bool {
        self.intent == Intent::Unknown
    }

    pub fn external_link(&self) -> &str {
        &self.external_link
    }

    pub fn title(&self) -> &str {
        self.title.get_or_init(|| build_title(&self.record.message))
    }

    pub fn collapsed_body(&self) -> &str {
        self.collapsed_body
            .get_or_init(|| renderer::render_collapsed(&self.record.message))
    }

    pub fn expanded_body(&self) -> &str {
        self.expanded_body
            .get_or_init(|| renderer::render_expanded(&self.record.message))
    }

    /// Attachments first, then inline image links in message order.
    pub fn image_urls(&self) -> &[String] {
        self.image_urls.get_or_init(|| {
            let mut urls = self.record.attachments.clone();
            for word in self.record.message.split('\n').flat_map(|line| line.split(' ')) {
                if IMAGE_SUFFIX.is_match(word) {
                    urls.push(word.to_string());
                }
            }
            urls
        })
    }

    /// Display date. An unparseable timestamp falls back to the raw string.
    pub fn posted_date(&self) -> &str {
        self.posted_date.get_or_init(|| match parse_datetime(&self.record.created) {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => self.record.created.clone(),
        })
    }
}

fn build_title(message: &str) -> String {
    let mut title = TITLE_TERMINATOR
        .split(message)
        .next()
        .unwrap_or_default()
        .to_string();
    if title.chars().count() > 200 {
        title = title.chars().take(197).collect::<String>() + "...";
    }
    normalize_shortcodes(&title)
}

pub fn build_listings(
    records: Vec<RawRecord>,
    classifier: &IntentClassifier,
    link_base: &str,
) -> Vec<Listing> {
    records
        .into_iter()
        .map(|record| Listing::new(record, classifier, link_base))
        .collect()
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    InvalidResponse(reqwest::StatusCode),
    #[error("invalid snapshot payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ClassifierConfig, IntentClassifier};

    fn classifier() -> IntentClassifier {
        IntentClassifier::new(ClassifierConfig::default())
    }

    fn listing(message: &str) -> Listing {
        let record = RawRecord {
            message_id: "42".to_string(),
            message: message.to_string(),
            ..RawRecord::default()
        };
        Listing::new(record, &classifier(), "discord://channel/")
    }

    #[test]
    fn title_stops_at_first_terminator() {
        assert_eq!(listing("GBC shell. brand new").title(), "GBC shell");
        assert_eq!(listing("GBC shell, brand new").title(), "GBC shell");
        assert_eq!(listing(r"GBC shell\nbrand new").title(), "GBC shell");
    }

    #[test]
    fn title_without_terminator_is_whole_message() {
        assert_eq!(listing("GBC shell brand new").title(), "GBC shell brand new");
    }

    #[test]
    fn long_title_truncates_to_197_chars_plus_ellipsis() {
        let message = "x".repeat(250);
        let title = listing(&message).title().to_string();
        assert_eq!(title.len(), 200);
        assert_eq!(title, "x".repeat(197) + "...");
    }

    #[test]
    fn title_is_shortcode_normalized() {
        assert_eq!(listing("<:WTS:77> GBA SP").title(), "WTS GBA SP");
    }

    #[test]
    fn image_urls_keep_attachments_first() {
        let record = RawRecord {
            message_id: "1".to_string(),
            message: "backlit shell https://img.example/shell.jpg\nand https://img.example/ips.png"
                .to_string(),
            attachments: vec!["https://cdn.example/a.png".to_string()],
            ..RawRecord::default()
        };
        let listing = Listing::new(record, &classifier(), "");
        assert_eq!(
            listing.image_urls(),
            &[
                "https://cdn.example/a.png".to_string(),
                "https://img.example/shell.jpg".to_string(),
                "https://img.example/ips.png".to_string(),
            ]
        );
    }

    #[test]
    fn image_suffix_is_case_sensitive_and_anchored() {
        let record = RawRecord {
            message: "photo.JPG hosted.jpg.html real.gif".to_string(),
            ..RawRecord::default()
        };
        let listing = Listing::new(record, &classifier(), "");
        assert_eq!(listing.image_urls(), &["real.gif".to_string()]);
    }

    #[test]
    fn posted_date_falls_back_to_raw_string() {
        let record = RawRecord {
            created: "around easter, probably".to_string(),
            ..RawRecord::default()
        };
        let listing = Listing::new(record, &classifier(), "");
        assert_eq!(listing.posted_date(), "around easter, probably");
    }

    #[test]
    fn posted_date_formats_parseable_timestamps() {
        let record = RawRecord {
            created: "2021-04-03T10:15:00Z".to_string(),
            ..RawRecord::default()
        };
        let listing = Listing::new(record, &classifier(), "");
        assert_eq!(listing.posted_date(), "2021-04-03");
    }

    #[test]
    fn external_link_appends_record_id() {
        assert_eq!(listing("hi").external_link(), "discord://channel/42");
    }

    #[test]
    fn derived_fields_are_memoized() {
        let listing = listing("WTS something $5");
        assert!(std::ptr::eq(listing.title(), listing.title()));
        assert!(std::ptr::eq(listing.collapsed_body(), listing.collapsed_body()));
        assert!(std::ptr::eq(listing.expanded_body(), listing.expanded_body()));
    }

    #[test]
    fn sparse_json_record_deserializes_with_defaults() {
        let record: RawRecord = serde_json::from_str(r#"{"message_id":"7"}"#).unwrap();
        assert_eq!(record.message_id, "7");
        assert!(record.message.is_empty());
        assert!(record.attachments.is_empty());
    }
}
