use super::seed_listing;
use crate::db::Database;
use crate::domain::normalize::FALLBACK_PICTURES;
use crate::router::handle;
use crate::tests::utils::{body_string, get, insert_test_user, test_state, StubSource};
use serde_json::json;

#[test]
fn external_failure_still_shows_store_listings() {
    let state = test_state(StubSource::failing("Apify responded with status 500"));
    let agent = insert_test_user(&state.db, "agent@example.com", "agent");
    for city in ["Austin", "Dallas", "Houston"] {
        seed_listing(&state.db, agent, "1 Main St", city, "TX");
    }

    let resp = handle(get("/", None), &state).expect("home renders");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert_eq!(body.matches("listing-card").count(), 3);
    assert!(!body.contains("Failed to load listings"));
}

#[test]
fn both_sources_failing_shows_failure_message() {
    let mut state = test_state(StubSource::failing("timeout"));
    state.db = Database::new("/nonexistent-dir/for/listings/test.sqlite3");

    let body = body_string(handle(get("/", None), &state).unwrap());
    assert!(body.contains("Failed to load listings. Please try again later."));
    assert_eq!(body.matches("listing-card").count(), 0);
}

#[test]
fn home_is_capped_and_store_comes_first() {
    let external: Vec<_> = (0..12)
        .map(|i| json!({ "id": format!("ext-{i}"), "city": "Miami", "state": "FL" }))
        .collect();
    let state = test_state(StubSource::ok(external));
    let agent = insert_test_user(&state.db, "agent@example.com", "agent");
    let id = seed_listing(&state.db, agent, "9 Oak Ave", "Austin", "TX");

    let body = body_string(handle(get("/", None), &state).unwrap());
    assert_eq!(body.matches("listing-card").count(), 9);

    let store_pos = body.find(&format!("/details?id={id}")).expect("store card present");
    let external_pos = body.find("data-id=\"ext-0\"").expect("external card present");
    assert!(store_pos < external_pos);
    assert!(!body.contains("data-id=\"ext-8\""));
}

#[test]
fn external_fallback_picture_follows_the_store_cards() {
    let state = test_state(StubSource::ok(vec![json!({ "id": "ext-a", "city": "Miami" })]));
    let agent = insert_test_user(&state.db, "agent@example.com", "agent");
    for city in ["Austin", "Dallas", "Houston"] {
        seed_listing(&state.db, agent, "1 Main St", city, "TX");
    }

    let body = body_string(handle(get("/", None), &state).unwrap());
    let card = body.find("data-id=\"ext-a\"").expect("external card present");
    let src = card + body[card..].find("src=\"").expect("card image") + 5;

    // Query strings are escaped in the markup; the photo path is enough.
    let photo = |url: &str| url.split('?').next().unwrap_or_default().to_string();
    assert!(body[src..].starts_with(&photo(FALLBACK_PICTURES[3])));
    assert!(!body[src..].starts_with(&photo(FALLBACK_PICTURES[0])));
}

#[test]
fn empty_sources_show_empty_message() {
    let state = test_state(StubSource::ok(Vec::new()));
    let body = body_string(handle(get("/", None), &state).unwrap());
    assert!(body.contains("No properties found at the moment."));
}

#[test]
fn navbar_shows_login_links_when_signed_out() {
    let state = test_state(StubSource::ok(Vec::new()));
    let body = body_string(handle(get("/", None), &state).unwrap());
    assert!(body.contains("href=\"/login\""));
    assert!(body.contains("href=\"/signup\""));
    assert!(!body.contains("Sign Out"));
}
