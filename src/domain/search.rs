// src/domain/search.rs

use crate::domain::listing::Listing;

/// Listings whose city, state or street contains `query`, ignoring case.
/// A blank query returns everything in the original order.
pub fn filter_listings(listings: &[Listing], query: &str) -> Vec<Listing> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return listings.to_vec();
    }

    listings
        .iter()
        .filter(|l| {
            [&l.city, &l.state, &l.street]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
