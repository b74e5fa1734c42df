mod classifier;
mod config;
mod fetcher;
mod filter;
mod model;
mod normalizer;
mod renderer;
mod storage;
#[cfg(test)]
mod tests;
mod utils;

use classifier::IntentClassifier;
use config::load_config;
use fetcher::{parse_records, RecordSource, SnapshotFetcher};
use filter::IntentSelection;
use model::{build_listings, Listing};
use storage::SnapshotStore;
use std::env;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from file (defaults apply when it is absent)
    let config = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let classifier = IntentClassifier::new(config.classifier.clone());

    let storage = match SnapshotStore::new(&config.cache_db_path) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize storage: {:?}", e);
            return;
        }
    };

    // Synchronous cached read first; stale listings beat an empty board.
    let mut listings = cached_listings(&storage, &classifier, &config.link_base_url);
    info!("Loaded {} cached listings", listings.len());

    let fetcher = match SnapshotFetcher::new(config.data_url.clone()) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to initialize fetcher: {:?}", e);
            return;
        }
    };

    info!("Fetching snapshot from {}...", config.data_url);
    match fetcher.refresh().await {
        Ok(records) if !records.is_empty() => {
            match serde_json::to_string(&records) {
                Ok(payload) => {
                    if let Err(e) = storage.save_snapshot(&payload) {
                        warn!("Cache write failed: {:?}", e);
                    }
                }
                Err(e) => warn!("Snapshot serialization failed: {}", e),
            }
            listings = build_listings(records, &classifier, &config.link_base_url);
            info!("Refreshed {} listings", listings.len());
        }
        Ok(_) => info!("Snapshot was empty, keeping cached listings"),
        Err(e) => warn!("Refresh failed, keeping cached listings: {:?}", e),
    }

    let (query, selection) = parse_args(env::args().skip(1));
    let active = filter::is_filter_active(&query, selection);
    let shown = filter::filter(&listings, &query, selection);

    let count = filter::count_string(shown.len(), listings.len(), active);
    if !count.is_empty() {
        info!("{}", count);
    }

    for listing in shown {
        print_listing(listing);
    }
}

/// Reads the persisted snapshot. Any failure along the way degrades to an
/// empty board rather than aborting startup.
fn cached_listings(
    storage: &SnapshotStore,
    classifier: &IntentClassifier,
    link_base: &str,
) -> Vec<Listing> {
    match storage.load_snapshot() {
        Ok(Some(payload)) => match parse_records(&payload) {
            Ok(records) => build_listings(records, classifier, link_base),
            Err(e) => {
                warn!("Cached snapshot unreadable: {}", e);
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("Cache read failed: {:?}", e);
            Vec::new()
        }
    }
}

/// `market-board [--type all|sell|buy|trade] [query words...]`
fn parse_args(mut args: impl Iterator<Item = String>) -> (String, IntentSelection) {
    let mut query_words: Vec<String> = Vec::new();
    let mut selection = IntentSelection::All;

    while let Some(arg) = args.next() {
        if arg == "--type" {
            match args.next().as_deref().and_then(IntentSelection::parse) {
                Some(parsed) => selection = parsed,
                None => warn!("Unknown --type value, showing every intent"),
            }
        } else {
            query_words.push(arg);
        }
    }

    (query_words.join(" "), selection)
}

fn print_listing(listing: &Listing) {
    println!(
        "[{}/{}] {} by {} (posted {}) {}",
        listing.intent(),
        listing.match_type(),
        listing.title(),
        listing.author(),
        listing.posted_date(),
        listing.external_link()
    );
}
