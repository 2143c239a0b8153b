// src/aggregate.rs

//! Fetches the two listing sources side by side and joins them.
//!
//! A failing source is logged and contributes nothing; the other source's
//! listings still make it to the page.

use crate::db::connection::Database;
use crate::db::properties;
use crate::domain::listing::Listing;
use crate::domain::merge::{for_home, merge, HOME_STORE_FETCH_LIMIT};
use crate::domain::normalize::{normalize_external_all, normalize_store_all};
use crate::sources::ExternalSource;
use std::fmt::Display;
use std::thread;
use tracing::{error, warn};

#[derive(Debug, Default)]
pub struct Gathered {
    pub listings: Vec<Listing>,
    pub store_failed: bool,
    pub external_failed: bool,
}

impl Gathered {
    pub fn all_failed(&self) -> bool {
        self.store_failed && self.external_failed
    }
}

/// Run both fetches concurrently: the external one on a scoped thread, the
/// store query on the calling thread (so it keeps its cached connection).
/// `join` turns whatever came back into the display list; a failed side
/// reaches it as an empty batch.
pub fn gather<S, X, A, B, ES, EX, J>(store: S, external: X, join: J) -> Gathered
where
    S: FnOnce() -> Result<Vec<A>, ES>,
    X: FnOnce() -> Result<Vec<B>, EX> + Send,
    B: Send,
    ES: Display,
    EX: Display + Send,
    J: FnOnce(Vec<A>, Vec<B>) -> Vec<Listing>,
{
    let (store_result, external_result) = thread::scope(|scope| {
        let external_handle = scope.spawn(external);
        let store_result = store();
        let external_result = external_handle.join();
        (store_result, external_result)
    });

    let mut gathered = Gathered::default();

    let store_batch = match store_result {
        Ok(batch) => batch,
        Err(e) => {
            error!("store fetch error: {e}");
            gathered.store_failed = true;
            Vec::new()
        }
    };

    let external_batch = match external_result {
        Ok(Ok(batch)) => batch,
        Ok(Err(e)) => {
            warn!("external listings fetch error: {e}");
            gathered.external_failed = true;
            Vec::new()
        }
        Err(_) => {
            error!("external listings fetch panicked");
            gathered.external_failed = true;
            Vec::new()
        }
    };

    gathered.listings = join(store_batch, external_batch);
    gathered
}

/// Listings for the home page: newest store listings, then the scraped
/// dataset, cut to the home page limit. Fallback pictures follow the
/// position in the merged list.
pub fn home_listings(db: &Database, external: &dyn ExternalSource) -> Gathered {
    gather(
        || properties::list_recent(db, HOME_STORE_FETCH_LIMIT),
        || external.fetch_raw(),
        |rows, raw| {
            let store = normalize_store_all(&rows);
            let external = normalize_external_all(&raw, store.len());
            for_home(merge(store, external))
        },
    )
}
