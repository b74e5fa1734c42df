use crate::model::Listing;
use regex::{Regex, RegexBuilder};

/// Exclusive intent selector driving the type filter. `All` is the
/// "show everything" default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntentSelection {
    #[default]
    All,
    Sell,
    Buy,
    Trade,
}

impl IntentSelection {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(IntentSelection::All),
            "sell" => Some(IntentSelection::Sell),
            "buy" => Some(IntentSelection::Buy),
            "trade" => Some(IntentSelection::Trade),
            _ => None,
        }
    }
}

/// The filter is active once any narrowing criterion is in effect: a trimmed
/// query of at least three characters, or a non-default selection.
pub fn is_filter_active(query: &str, selection: IntentSelection) -> bool {
    query.trim().chars().count() >= 3 || selection != IntentSelection::All
}

/// Narrows `listings` to the matching stable subsequence. While active, a
/// listing must satisfy both the search and the type predicate; while
/// inactive only the type predicate applies and the too-short query is
/// ignored. Note the interaction: a non-All selection activates the filter
/// even under a short query, and the short query then still participates in
/// the search predicate.
pub fn filter<'a>(
    listings: &'a [Listing],
    query: &str,
    selection: IntentSelection,
) -> Vec<&'a Listing> {
    let active = is_filter_active(query, selection);
    let pattern = compile_query(query.trim());

    listings
        .iter()
        .filter(|listing| {
            if active {
                search_match(listing, &pattern) && type_match(listing, selection)
            } else {
                type_match(listing, selection)
            }
        })
        .collect()
}

/// "showing N of M" while the filter is active, nothing otherwise.
pub fn count_string(shown: usize, total: usize, active: bool) -> String {
    if active {
        format!("showing {} of {}", shown, total)
    } else {
        String::new()
    }
}

// A query that does not compile stays None and matches nothing; the filter
// pass itself never fails.
fn compile_query(trimmed: &str) -> Option<Regex> {
    RegexBuilder::new(trimmed).case_insensitive(true).build().ok()
}

fn search_match(listing: &Listing, pattern: &Option<Regex>) -> bool {
    pattern
        .as_ref()
        .is_some_and(|re| re.is_match(listing.raw_text()))
}

fn type_match(listing: &Listing, selection: IntentSelection) -> bool {
    match selection {
        IntentSelection::All => true,
        IntentSelection::Sell => listing.is_sell(),
        IntentSelection::Buy => listing.is_buy(),
        IntentSelection::Trade => listing.is_trade(),
    }
}
