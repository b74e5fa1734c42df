// End-to-end checks across classifier, model, renderer and filter.

use crate::classifier::{ClassifierConfig, IntentClassifier};
use crate::fetcher::parse_records;
use crate::filter::{self, IntentSelection};
use crate::model::{build_listings, Intent, MatchType, RawRecord};
use std::collections::HashMap;

fn default_classifier() -> IntentClassifier {
    IntentClassifier::new(ClassifierConfig::default())
}

#[test]
fn wts_listing_flows_through_the_whole_pipeline() {
    let payload = r#"[{
        "message_id": "1",
        "user": "ash",
        "message": "WTS [EU] Pikachu plush $20",
        "created": "2021-04-03T10:15:00Z",
        "avatar_url": "https://cdn/a.png",
        "attachments": []
    }]"#;

    let records = parse_records(payload).unwrap();
    let listings = build_listings(records, &default_classifier(), "discord://channel/");
    let listing = &listings[0];

    // Plain "WTS" is not a shortcode, so the keyword tier fires.
    assert_eq!(listing.intent(), Intent::Sell);
    assert_eq!(listing.match_type(), MatchType::Regex);
    assert!(listing.is_sell());

    // No terminator punctuation: the title is the whole message.
    assert_eq!(listing.title(), "WTS [EU] Pikachu plush $20");

    assert!(listing
        .collapsed_body()
        .contains("<span class=\"text-bold\">$20</span>"));
    assert_eq!(listing.external_link(), "discord://channel/1");
    assert_eq!(listing.posted_date(), "2021-04-03");
}

#[test]
fn overridden_listing_ignores_what_the_text_screams() {
    let config = ClassifierConfig {
        overrides: HashMap::from([("busted".to_string(), Intent::Buy)]),
        ..ClassifierConfig::default()
    };
    let classifier = IntentClassifier::new(config);

    let records = vec![RawRecord {
        message_id: "busted".to_string(),
        message: "selling everything, selling it all $$$".to_string(),
        ..RawRecord::default()
    }];
    let listings = build_listings(records, &classifier, "");

    assert_eq!(listings[0].intent(), Intent::Buy);
    assert_eq!(listings[0].match_type(), MatchType::Override);
    assert_eq!(
        filter::filter(&listings, "", IntentSelection::Buy).len(),
        1
    );
}

#[test]
fn snapshot_with_one_bad_record_still_builds_a_board() {
    let payload = r#"[
        {"message_id": "1", "message": "<:Selling:3> boxed SP, mint"},
        "not a record",
        {"message_id": "3", "message": "does anyone have spare screws"}
    ]"#;

    let records = parse_records(payload).unwrap();
    let listings = build_listings(records, &default_classifier(), "");

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].intent(), Intent::Sell);
    assert_eq!(listings[0].match_type(), MatchType::Emoji);
    assert_eq!(listings[0].title(), "Selling boxed SP");
    assert_eq!(listings[1].intent(), Intent::Unknown);
    assert_eq!(listings[1].match_type(), MatchType::None);
}

#[test]
fn expanded_and_collapsed_bodies_disagree_on_empty_lines() {
    let records = vec![RawRecord {
        message_id: "1".to_string(),
        message: "WTB pokemon crystal\n\nhttps://imgur.com/wishlist.png".to_string(),
        ..RawRecord::default()
    }];
    let listings = build_listings(records, &default_classifier(), "");
    let listing = &listings[0];

    assert!(listing.collapsed_body().contains("<br/>"));
    assert!(!listing.expanded_body().contains("<br/>"));
    assert!(listing.expanded_body().starts_with("<p>"));
    assert!(listing
        .collapsed_body()
        .contains("<a href=\"https://imgur.com/wishlist.png\">"));
    assert_eq!(listing.image_urls(), &["https://imgur.com/wishlist.png".to_string()]);
}

#[test]
fn board_counts_track_the_active_filter() {
    let records = vec![
        RawRecord {
            message_id: "1".to_string(),
            message: "selling a yellowed DMG $30".to_string(),
            ..RawRecord::default()
        },
        RawRecord {
            message_id: "2".to_string(),
            message: "wtb a backlight kit".to_string(),
            ..RawRecord::default()
        },
    ];
    let listings = build_listings(records, &default_classifier(), "");

    let selection = IntentSelection::Sell;
    let query = "";
    let active = filter::is_filter_active(query, selection);
    let shown = filter::filter(&listings, query, selection);

    assert!(active);
    assert_eq!(
        filter::count_string(shown.len(), listings.len(), active),
        "showing 1 of 2"
    );
}
