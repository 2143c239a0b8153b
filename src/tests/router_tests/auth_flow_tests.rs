use crate::auth::AuthEvent;
use crate::router::handle;
use crate::tests::utils::{
    body_string, get, header, insert_test_user, post_form, session_cookie_of, test_state,
    StubSource, TEST_PASSWORD,
};
use std::sync::{Arc, Mutex};

#[test]
fn login_page_loads_successfully() {
    let state = test_state(StubSource::ok(Vec::new()));

    let resp = handle(get("/login", None), &state).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Sign In"));
    assert!(body.contains("action=\"/login\""));
}

#[test]
fn agent_sign_up_sets_cookie_and_goes_to_dashboard() {
    let state = test_state(StubSource::ok(Vec::new()));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    state
        .auth_events
        .subscribe(move |e| sink.lock().unwrap().push(e.clone()));

    let resp = handle(
        post_form(
            "/signup",
            "fname=Ada&lname=Lovelace&email=ada%40example.com&password=secret123&role=agent",
            None,
        ),
        &state,
    )
    .unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/agent");
    let cookie = session_cookie_of(&resp);
    assert!(cookie.starts_with("session="));
    assert!(header(&resp, "Set-Cookie").contains("HttpOnly"));

    let body = body_string(handle(get("/", Some(&cookie)), &state).unwrap());
    assert!(body.contains("AL"));
    assert!(body.contains("ada@example.com"));
    assert!(body.contains("Sign Out"));
    assert!(!body.contains("id=\"login\""));

    assert!(matches!(
        seen.lock().unwrap().as_slice(),
        [AuthEvent::SignedUp { role, .. }] if role == "agent"
    ));
}

#[test]
fn buyer_sign_up_goes_home() {
    let state = test_state(StubSource::ok(Vec::new()));
    let resp = handle(
        post_form(
            "/signup",
            "fname=Bo&lname=Buyer&email=bo%40example.com&password=secret123",
            None,
        ),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/");
}

#[test]
fn sign_up_errors_rerender_the_form() {
    let state = test_state(StubSource::ok(Vec::new()));
    let resp = handle(
        post_form(
            "/signup",
            "fname=Ada&lname=L&email=short%40example.com&password=abc&role=agent",
            None,
        ),
        &state,
    )
    .unwrap();

    assert_eq!(resp.status(), 400);
    let body = body_string(resp);
    assert!(body.contains("Password should be at least 6 characters"));
    assert!(body.contains("value=\"short@example.com\""));
    assert!(!body.contains("abc\""));
}

#[test]
fn login_with_wrong_password_shows_message() {
    let state = test_state(StubSource::ok(Vec::new()));
    insert_test_user(&state.db, "c@example.com", "buyer");

    let resp = handle(
        post_form("/login", "email=c%40example.com&password=wrong-one", None),
        &state,
    )
    .unwrap();

    assert_eq!(resp.status(), 401);
    assert!(header(&resp, "Set-Cookie").is_empty());
    assert!(body_string(resp).contains("Invalid login credentials"));
}

#[test]
fn login_redirects_by_role() {
    let state = test_state(StubSource::ok(Vec::new()));
    insert_test_user(&state.db, "buyer@example.com", "buyer");
    insert_test_user(&state.db, "agent@example.com", "agent");

    let form = format!("email=buyer%40example.com&password={TEST_PASSWORD}");
    let resp = handle(post_form("/login", &form, None), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/");

    let form = format!("email=AGENT%40example.com&password={TEST_PASSWORD}");
    let resp = handle(post_form("/login", &form, None), &state).unwrap();
    assert_eq!(header(&resp, "Location"), "/agent");
    assert!(session_cookie_of(&resp).starts_with("session="));
}

#[test]
fn logout_revokes_the_session() {
    let state = test_state(StubSource::ok(Vec::new()));
    insert_test_user(&state.db, "agent@example.com", "agent");

    let form = format!("email=agent%40example.com&password={TEST_PASSWORD}");
    let login = handle(post_form("/login", &form, None), &state).unwrap();
    let cookie = session_cookie_of(&login);

    assert_eq!(handle(get("/agent", Some(&cookie)), &state).unwrap().status(), 200);

    let resp = handle(post_form("/logout", "", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/");
    assert!(header(&resp, "Set-Cookie").contains("Max-Age=0"));

    let resp = handle(get("/agent", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/login");
}
