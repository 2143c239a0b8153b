use crate::aggregate::home_listings;
use crate::auth::sessions::{clear_session_cookie, session_cookie, token_from_cookie_header};
use crate::auth::token::generate_token;
use crate::auth::{CurrentUser, SignUpForm};
use crate::db::properties::{self, PropertyFields};
use crate::domain::listing::Listing;
use crate::domain::normalize::{normalize_external_all, normalize_store_all};
use crate::domain::search::filter_listings;
use crate::errors::ServerError;
use crate::forms::{parse_query, read_form, read_multipart, MultipartForm};
use crate::responses::{
    bytes_response, html_response, html_response_with_status, json_error, json_response,
    redirect_response, ResultResp,
};
use crate::state::AppState;
use crate::storage::{content_type_for, image_extension};
use crate::templates::pages::{
    agent_page, details_page, home_page, login_page, properties_page, property_results,
    signup_page, DetailsState, ListingFormVm,
};
use astra::Request;
use tracing::{info, warn};

const STYLESHEET: &str = include_str!("../static/main.css");
/// Matches `storage::PUBLIC_PREFIX` plus the separator.
const UPLOADS_ROUTE: &str = "/uploads/";

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => {
            let user = current_user(&req, state);
            let gathered = home_listings(&state.db, state.external.as_ref());
            html_response(home_page(user.as_ref(), &gathered))
        }

        ("GET", "/properties") => {
            let user = current_user(&req, state);
            let query = parse_query(&req).remove("q").unwrap_or_default();
            let listings = search_store(state, &query)?;
            html_response(properties_page(user.as_ref(), &query, &listings))
        }

        // htmx partial for the search box
        ("GET", "/properties/search") => {
            let query = parse_query(&req).remove("q").unwrap_or_default();
            let listings = search_store(state, &query)?;
            html_response(property_results(&listings))
        }

        ("GET", "/details") => {
            let user = current_user(&req, state);
            let id = parse_query(&req).remove("id").unwrap_or_default();
            let details = if id.trim().is_empty() {
                DetailsState::Missing
            } else {
                match id.trim().parse::<i64>() {
                    Ok(id) => match properties::get(&state.db, id) {
                        Ok(row) => row.map_or(DetailsState::NotFound, DetailsState::Found),
                        Err(e) => {
                            warn!(listing_id = id, "details lookup failed: {e}");
                            DetailsState::Error
                        }
                    },
                    Err(_) => DetailsState::NotFound,
                }
            };
            html_response(details_page(user.as_ref(), &details))
        }

        ("GET", "/login") => html_response(login_page(None, "")),
        ("POST", "/login") => post_login(&mut req, state),

        ("GET", "/signup") => html_response(signup_page(None, &SignUpForm::default())),
        ("POST", "/signup") => post_signup(&mut req, state),

        ("POST", "/logout") => {
            if let Some(token) = session_token(&req) {
                state.auth().sign_out(&token)?;
            }
            redirect_response("/", Some(&clear_session_cookie()))
        }

        ("GET", "/agent") => {
            let user = match agent_gate(&req, state) {
                Ok(user) => user,
                Err(location) => return redirect_response(location, None),
            };

            let form = match parse_query(&req).get("edit").map(|s| s.trim()) {
                Some(raw) if !raw.is_empty() => {
                    let id = raw
                        .parse::<i64>()
                        .map_err(|_| ServerError::BadRequest("invalid listing id".into()))?;
                    ListingFormVm::editing(&owned_listing(state, &user, id)?)
                }
                _ => ListingFormVm::default(),
            };
            render_agent(state, &user, &form, 200)
        }

        ("POST", "/agent/listings") => {
            let user = match agent_gate(&req, state) {
                Ok(user) => user,
                Err(location) => return redirect_response(location, None),
            };
            let form = read_multipart(&mut req)?;
            save_listing(state, &user, &form)
        }

        ("GET", "/api/listings") => {
            let normalized = parse_query(&req)
                .get("normalized")
                .is_some_and(|v| v == "1" || v == "true");

            match state.external.fetch_raw() {
                Ok(raw) if normalized => json_response(200, &normalize_external_all(&raw, 0)),
                Ok(raw) => json_response(200, &raw),
                Err(e) => {
                    warn!("listings proxy failed: {e}");
                    json_error(500, &e.to_string())
                }
            }
        }

        ("GET", "/static/main.css") => {
            bytes_response("text/css; charset=utf-8", STYLESHEET.as_bytes().to_vec())
        }

        ("GET", p) if p.starts_with(UPLOADS_ROUTE) => {
            let key = &p[UPLOADS_ROUTE.len()..];
            let bytes = state.storage.read(key)?;
            bytes_response(content_type_for(key).as_ref(), bytes)
        }

        _ => Err(ServerError::NotFound),
    }
}

fn session_token(req: &Request) -> Option<String> {
    req.headers()
        .get("Cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie_header)
        .map(str::to_string)
}

/// Resolve the session cookie. Lookup failures are logged and treated as
/// signed out so public pages still render.
fn current_user(req: &Request, state: &AppState) -> Option<CurrentUser> {
    let token = session_token(req)?;
    match state.auth().current_user(Some(&token)) {
        Ok(user) => user,
        Err(e) => {
            warn!("session lookup failed: {e}");
            None
        }
    }
}

/// Signed-in agents pass; everyone else gets the location to redirect to.
fn agent_gate(req: &Request, state: &AppState) -> Result<CurrentUser, &'static str> {
    match current_user(req, state) {
        None => Err("/login"),
        Some(user) if !user.is_agent() => Err("/"),
        Some(user) => Ok(user),
    }
}

fn search_store(state: &AppState, query: &str) -> Result<Vec<Listing>, ServerError> {
    let rows = properties::list_all(&state.db)?;
    Ok(filter_listings(&normalize_store_all(&rows), query))
}

fn owned_listing(
    state: &AppState,
    user: &CurrentUser,
    id: i64,
) -> Result<properties::PropertyRow, ServerError> {
    let row = properties::get(&state.db, id)?.ok_or(ServerError::NotFound)?;
    if row.agent_id != user.user_id {
        warn!(user_id = user.user_id, listing_id = id, "edit of foreign listing refused");
        return Err(ServerError::Forbidden(
            "You can only edit your own listings.".into(),
        ));
    }
    Ok(row)
}

fn render_agent(state: &AppState, user: &CurrentUser, form: &ListingFormVm, status: u16) -> ResultResp {
    let listings = properties::list_by_agent(&state.db, user.user_id)?;
    html_response_with_status(status, agent_page(user, &listings, form))
}

fn post_login(req: &mut Request, state: &AppState) -> ResultResp {
    let form = read_form(req)?;
    let email = form.get("email").cloned().unwrap_or_default();
    let password = form.get("password").cloned().unwrap_or_default();

    match state.auth().sign_in(&email, &password) {
        Ok(signed_in) => {
            let cookie = session_cookie(&signed_in.session_token, state.config.session_ttl_secs);
            let next = if signed_in.profile.is_agent() { "/agent" } else { "/" };
            redirect_response(next, Some(&cookie))
        }
        Err(ServerError::Unauthorized(msg)) => {
            html_response_with_status(401, login_page(Some(&msg), &email))
        }
        Err(ServerError::BadRequest(_)) => html_response_with_status(
            400,
            login_page(Some("Please enter a valid email address."), &email),
        ),
        Err(e) => Err(e),
    }
}

fn post_signup(req: &mut Request, state: &AppState) -> ResultResp {
    let form = read_form(req)?;
    let field = |k: &str| form.get(k).cloned().unwrap_or_default();
    let signup = SignUpForm {
        first_name: field("fname"),
        last_name: field("lname"),
        email: field("email"),
        password: field("password"),
        role: field("role"),
    };

    match state.auth().sign_up(&signup) {
        Ok(signed_up) => {
            let cookie = session_cookie(&signed_up.session_token, state.config.session_ttl_secs);
            let next = if signed_up.profile.is_agent() { "/agent" } else { "/" };
            redirect_response(next, Some(&cookie))
        }
        Err(ServerError::BadRequest(msg)) => {
            let echo = SignUpForm {
                password: String::new(),
                ..signup
            };
            html_response_with_status(400, signup_page(Some(&msg), &echo))
        }
        Err(e) => Err(e),
    }
}

/// Optional non-negative number from a form field. Blank is `None`.
fn parse_number(form: &MultipartForm, name: &str, label: &str) -> Result<Option<f64>, String> {
    let raw = form.text(name);
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.replace(',', "").parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err(format!("{label} must be a non-negative number.")),
    }
}

/// Read the listing form. On a validation failure the fields read so far
/// come back with the message so the form can be shown again.
fn listing_fields(form: &MultipartForm) -> Result<PropertyFields, (PropertyFields, String)> {
    let mut first_error = None;
    let mut number = |name: &str, label: &str| {
        parse_number(form, name, label).unwrap_or_else(|msg| {
            first_error.get_or_insert(msg);
            None
        })
    };
    let price = number("price", "Price");
    let bedrooms = number("bedrooms", "Bedrooms");
    let bathrooms = number("bathrooms", "Bathrooms");
    let sqft = number("sqft", "Square feet");

    let fields = PropertyFields {
        street: form.text("street").to_string(),
        city: form.text("city").to_string(),
        state: form.text("state").to_string(),
        price,
        bedrooms,
        bathrooms,
        sqft,
        offer_type: match form.text("offer_type") {
            "" => "sale".to_string(),
            other => other.to_lowercase(),
        },
        property_type: form.text("type").to_uppercase(),
        description: form.text("description").to_string(),
    };

    if let Some(msg) = first_error {
        return Err((fields, msg));
    }
    if fields.street.is_empty() || fields.city.is_empty() || fields.state.is_empty() {
        return Err((fields, "Street, city and state are required.".into()));
    }
    if fields.price.is_none() {
        return Err((fields, "Price is required.".into()));
    }
    Ok(fields)
}

/// Create or update a listing from the agent form.
fn save_listing(state: &AppState, user: &CurrentUser, form: &MultipartForm) -> ResultResp {
    let editing_id = match form.text("editing_id") {
        "" => None,
        raw => Some(
            raw.parse::<i64>()
                .map_err(|_| ServerError::BadRequest("invalid listing id".into()))?,
        ),
    };

    // Ownership first, so a foreign id never reaches storage.
    if let Some(id) = editing_id {
        owned_listing(state, user, id)?;
    }

    let (fields, rejected) = match listing_fields(form) {
        Ok(fields) => (fields, None),
        Err((fields, msg)) => (fields, Some(msg)),
    };
    let invalid = |msg: &str| {
        let vm = ListingFormVm {
            editing_id,
            fields: fields.clone(),
            ..ListingFormVm::default()
        }
        .with_notice(msg, true);
        render_agent(state, user, &vm, 400)
    };
    if let Some(msg) = rejected {
        return invalid(&msg);
    }

    let image_url = match form.file("image") {
        Some(file) => {
            let Some(ext) = image_extension(&file.file_name) else {
                return invalid("Please upload a JPG, PNG, GIF, WEBP or AVIF image.");
            };
            let key = format!(
                "{}/{}.{}",
                user.user_id,
                generate_token(&mut rand::thread_rng(), 12),
                ext
            );
            state.storage.upload(&key, &file.bytes)?;
            Some(state.storage.public_url(&key))
        }
        None if editing_id.is_none() => {
            return invalid("Please select an image file for your new listing.");
        }
        None => None,
    };

    let notice = match (editing_id, image_url) {
        (Some(id), image_url) => {
            properties::update(&state.db, id, &fields, image_url.as_deref())?;
            info!(user_id = user.user_id, listing_id = id, "listing updated");
            "Listing updated successfully!"
        }
        (None, Some(image_url)) => {
            let id = properties::insert(&state.db, user.user_id, &fields, &image_url)?;
            info!(user_id = user.user_id, listing_id = id, "listing published");
            "Listing published successfully!"
        }
        (None, None) => return Err(ServerError::InternalError),
    };

    render_agent(state, user, &ListingFormVm::default().with_notice(notice, false), 200)
}
