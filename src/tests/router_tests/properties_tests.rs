use super::seed_listing;
use crate::db::Database;
use crate::router::handle;
use crate::tests::utils::{body_string, get, insert_test_user, test_state, StubSource};

#[test]
fn properties_page_filters_by_query() {
    let state = test_state(StubSource::failing("unused"));
    let agent = insert_test_user(&state.db, "agent@example.com", "agent");
    seed_listing(&state.db, agent, "1 Congress Ave", "Austin", "TX");
    seed_listing(&state.db, agent, "2 Elm St", "Dallas", "TX");
    seed_listing(&state.db, agent, "3 Pine Rd", "Denver", "CO");

    let body = body_string(handle(get("/properties?q=austin", None), &state).unwrap());
    assert_eq!(body.matches("listing-card").count(), 1);
    assert!(body.contains("Congress Ave"));
    assert!(!body.contains("Dallas"));

    let body = body_string(handle(get("/properties?q=tx", None), &state).unwrap());
    assert_eq!(body.matches("listing-card").count(), 2);

    let body = body_string(handle(get("/properties", None), &state).unwrap());
    assert_eq!(body.matches("listing-card").count(), 3);
}

#[test]
fn search_partial_is_just_the_grid() {
    let state = test_state(StubSource::failing("unused"));
    let agent = insert_test_user(&state.db, "agent@example.com", "agent");
    seed_listing(&state.db, agent, "1 Congress Ave", "Austin", "TX");

    let body = body_string(handle(get("/properties/search?q=AUS", None), &state).unwrap());
    assert!(body.contains("id=\"property-grid\""));
    assert!(body.contains("Congress Ave"));
    assert!(!body.contains("<html"));

    let body = body_string(handle(get("/properties/search?q=zzz", None), &state).unwrap());
    assert!(body.contains("No properties found"));
}

#[test]
fn details_handles_missing_and_unknown_ids() {
    let state = test_state(StubSource::failing("unused"));

    let body = body_string(handle(get("/details", None), &state).unwrap());
    assert!(body.contains("No property selected"));

    let body = body_string(handle(get("/details?id=999", None), &state).unwrap());
    assert!(body.contains("Property not found"));

    let body = body_string(handle(get("/details?id=abc", None), &state).unwrap());
    assert!(body.contains("Property not found"));
}

#[test]
fn details_renders_a_stored_listing() {
    let state = test_state(StubSource::failing("unused"));
    let agent = insert_test_user(&state.db, "agent@example.com", "agent");
    let id = seed_listing(&state.db, agent, "1 Congress Ave", "Austin", "TX");

    let resp = handle(get(&format!("/details?id={id}"), None), &state).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("HOUSE in Austin"));
    assert!(body.contains("$450,000"));
    assert!(body.contains("Amenities &amp; Features"));
}

#[test]
fn details_lookup_failure_renders_an_inline_error() {
    let mut state = test_state(StubSource::failing("unused"));
    state.db = Database::new("/nonexistent-dir/for/listings/test.sqlite3");

    let resp = handle(get("/details?id=1", None), &state).expect("details still renders");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Error loading property details."));
    assert!(!body.contains("Property not found"));
}

#[test]
fn stylesheet_is_served() {
    let state = test_state(StubSource::failing("unused"));
    let resp = handle(get("/static/main.css", None), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains(".listing-card"));
}

#[test]
fn unknown_route_is_not_found() {
    let state = test_state(StubSource::failing("unused"));
    assert!(matches!(
        handle(get("/nope", None), &state),
        Err(crate::errors::ServerError::NotFound)
    ));
}
