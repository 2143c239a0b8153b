use super::seed_listing;
use crate::db::properties;
use crate::errors::ServerError;
use crate::router::handle;
use crate::state::AppState;
use crate::tests::utils::{
    body_string, get, header, insert_test_user, multipart_body, post_multipart, test_state,
    StubSource, TEST_PASSWORD,
};

fn sign_in(state: &AppState, email: &str) -> String {
    let signed_in = state.auth().sign_in(email, TEST_PASSWORD).unwrap();
    format!("session={}", signed_in.session_token)
}

const LISTING_FIELDS: [(&str, &str); 10] = [
    ("street", "12 Lake Shore Dr"),
    ("city", "Chicago"),
    ("state", "IL"),
    ("price", "725000"),
    ("bedrooms", "4"),
    ("bathrooms", "2.5"),
    ("sqft", "2400"),
    ("offer_type", "sale"),
    ("type", "condo"),
    ("description", "Lake views"),
];

#[test]
fn agent_page_requires_sign_in() {
    let state = test_state(StubSource::ok(Vec::new()));
    let resp = handle(get("/agent", None), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/login");
}

#[test]
fn buyers_are_sent_home() {
    let state = test_state(StubSource::ok(Vec::new()));
    insert_test_user(&state.db, "buyer@example.com", "buyer");
    let cookie = sign_in(&state, "buyer@example.com");

    let resp = handle(get("/agent", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/");

    let body = multipart_body(&LISTING_FIELDS, Some(("image", "a.png", &b"png"[..])));
    let resp = handle(post_multipart("/agent/listings", body, Some(&cookie)), &state).unwrap();
    assert_eq!(header(&resp, "Location"), "/");
}

#[test]
fn dashboard_lists_only_own_listings() {
    let state = test_state(StubSource::ok(Vec::new()));
    let me = insert_test_user(&state.db, "me@example.com", "agent");
    let other = insert_test_user(&state.db, "other@example.com", "agent");
    seed_listing(&state.db, me, "1 Mine St", "Austin", "TX");
    seed_listing(&state.db, other, "2 Theirs St", "Austin", "TX");

    let cookie = sign_in(&state, "me@example.com");
    let body = body_string(handle(get("/agent", Some(&cookie)), &state).unwrap());

    assert!(body.contains("Create Property Listing"));
    assert!(body.contains("1 Mine St"));
    assert!(!body.contains("2 Theirs St"));
}

#[test]
fn new_listing_without_image_is_rejected() {
    let state = test_state(StubSource::ok(Vec::new()));
    let me = insert_test_user(&state.db, "me@example.com", "agent");
    let cookie = sign_in(&state, "me@example.com");

    let body = multipart_body(&LISTING_FIELDS, None);
    let resp = handle(post_multipart("/agent/listings", body, Some(&cookie)), &state).unwrap();

    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("Please select an image file for your new listing."));
    assert!(properties::list_by_agent(&state.db, me).unwrap().is_empty());
}

#[test]
fn rejected_form_keeps_what_was_typed() {
    let state = test_state(StubSource::ok(Vec::new()));
    let me = insert_test_user(&state.db, "me@example.com", "agent");
    let cookie = sign_in(&state, "me@example.com");

    let without_price: Vec<(&str, &str)> =
        LISTING_FIELDS.iter().copied().filter(|(name, _)| *name != "price").collect();
    let body = multipart_body(&without_price, Some(("image", "a.png", &b"png"[..])));
    let resp = handle(post_multipart("/agent/listings", body, Some(&cookie)), &state).unwrap();

    assert_eq!(resp.status(), 400);
    let page = body_string(resp);
    assert!(page.contains("Price is required."));
    assert!(page.contains("value=\"12 Lake Shore Dr\""));
    assert!(page.contains("value=\"Chicago\""));
    assert!(page.contains("Lake views"));
    assert!(properties::list_by_agent(&state.db, me).unwrap().is_empty());

    let mut bad_beds = LISTING_FIELDS;
    bad_beds[4] = ("bedrooms", "lots");
    let body = multipart_body(&bad_beds, Some(("image", "a.png", &b"png"[..])));
    let resp = handle(post_multipart("/agent/listings", body, Some(&cookie)), &state).unwrap();

    assert_eq!(resp.status(), 400);
    let page = body_string(resp);
    assert!(page.contains("Bedrooms must be a non-negative number."));
    assert!(page.contains("value=\"12 Lake Shore Dr\""));
}

#[test]
fn publishing_stores_the_listing_and_its_image() {
    let state = test_state(StubSource::ok(Vec::new()));
    let me = insert_test_user(&state.db, "me@example.com", "agent");
    let cookie = sign_in(&state, "me@example.com");

    let body = multipart_body(&LISTING_FIELDS, Some(("image", "front.PNG", &b"PNG-bytes"[..])));
    let resp = handle(post_multipart("/agent/listings", body, Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Listing published successfully!"));

    let rows = properties::list_by_agent(&state.db, me).unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.city.as_deref(), Some("Chicago"));
    assert_eq!(row.bathrooms, Some(2.5));
    assert_eq!(row.property_type.as_deref(), Some("CONDO"));

    let image_url = row.image_url.clone().unwrap();
    assert!(image_url.starts_with(&format!("/uploads/{me}/")));
    assert!(image_url.ends_with(".png"));

    let resp = handle(get(&image_url, None), &state).unwrap();
    assert_eq!(header(&resp, "Content-Type"), "image/png");
    assert_eq!(body_string(resp), "PNG-bytes");
}

#[test]
fn invalid_image_type_is_rejected() {
    let state = test_state(StubSource::ok(Vec::new()));
    insert_test_user(&state.db, "me@example.com", "agent");
    let cookie = sign_in(&state, "me@example.com");

    let body = multipart_body(&LISTING_FIELDS, Some(("image", "run.sh", &b"#!/bin/sh"[..])));
    let resp = handle(post_multipart("/agent/listings", body, Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("Please upload a JPG, PNG, GIF, WEBP or AVIF image."));
}

#[test]
fn owner_can_edit_without_replacing_the_image() {
    let state = test_state(StubSource::ok(Vec::new()));
    let me = insert_test_user(&state.db, "me@example.com", "agent");
    let id = seed_listing(&state.db, me, "1 Mine St", "Austin", "TX");
    let cookie = sign_in(&state, "me@example.com");

    let body = body_string(handle(get(&format!("/agent?edit={id}"), Some(&cookie)), &state).unwrap());
    assert!(body.contains("Edit Property Listing"));
    assert!(body.contains(&format!("name=\"editing_id\" value=\"{id}\"")));
    assert!(body.contains("value=\"1 Mine St\""));

    let editing_id = id.to_string();
    let mut fields = LISTING_FIELDS.to_vec();
    fields.push(("editing_id", editing_id.as_str()));
    let body = multipart_body(&fields, None);
    let resp = handle(post_multipart("/agent/listings", body, Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Listing updated successfully!"));

    let row = properties::get(&state.db, id).unwrap().unwrap();
    assert_eq!(row.city.as_deref(), Some("Chicago"));
    assert_eq!(row.image_url.as_deref(), Some("/uploads/seed.jpg"));
}

#[test]
fn editing_someone_elses_listing_is_forbidden() {
    let state = test_state(StubSource::ok(Vec::new()));
    let owner = insert_test_user(&state.db, "owner@example.com", "agent");
    insert_test_user(&state.db, "intruder@example.com", "agent");
    let id = seed_listing(&state.db, owner, "1 Owner St", "Austin", "TX");
    let cookie = sign_in(&state, "intruder@example.com");

    assert!(matches!(
        handle(get(&format!("/agent?edit={id}"), Some(&cookie)), &state),
        Err(ServerError::Forbidden(_))
    ));

    let editing_id = id.to_string();
    let mut fields = LISTING_FIELDS.to_vec();
    fields.push(("editing_id", editing_id.as_str()));
    let body = multipart_body(&fields, Some(("image", "x.png", &b"png"[..])));
    assert!(matches!(
        handle(post_multipart("/agent/listings", body, Some(&cookie)), &state),
        Err(ServerError::Forbidden(_))
    ));

    let row = properties::get(&state.db, id).unwrap().unwrap();
    assert_eq!(row.city.as_deref(), Some("Austin"));
}

#[test]
fn editing_a_missing_listing_is_not_found() {
    let state = test_state(StubSource::ok(Vec::new()));
    insert_test_user(&state.db, "me@example.com", "agent");
    let cookie = sign_in(&state, "me@example.com");

    assert!(matches!(
        handle(get("/agent?edit=4242", Some(&cookie)), &state),
        Err(ServerError::NotFound)
    ));
}
