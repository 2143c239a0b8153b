// src/domain/merge.rs

use crate::domain::listing::Listing;

/// Cards shown on the home page.
pub const HOME_LISTING_LIMIT: usize = 9;

/// Store rows requested for the home page.
pub const HOME_STORE_FETCH_LIMIT: usize = 10;

/// Store listings first (already newest-first), then external listings in
/// API order. No deduplication happens here: the same address can show up
/// once from each source.
pub fn merge(store: Vec<Listing>, external: Vec<Listing>) -> Vec<Listing> {
    let mut merged = store;
    merged.extend(external);
    merged
}

/// The home page only shows the first few merged listings.
pub fn for_home(mut merged: Vec<Listing>) -> Vec<Listing> {
    merged.truncate(HOME_LISTING_LIMIT);
    merged
}
