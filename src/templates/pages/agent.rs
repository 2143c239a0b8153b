use crate::auth::CurrentUser;
use crate::db::properties::{PropertyFields, PropertyRow};
use crate::domain::listing::{format_count, group_thousands};
use crate::templates::{desktop_layout, message};
use maud::{html, Markup};

/// State of the create/edit form for one request.
#[derive(Debug, Clone, Default)]
pub struct ListingFormVm {
    /// Set when the form edits an existing listing.
    pub editing_id: Option<i64>,
    pub fields: PropertyFields,
    pub notice: Option<String>,
    pub notice_is_error: bool,
}

impl ListingFormVm {
    pub fn editing(row: &PropertyRow) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            editing_id: Some(row.id),
            fields: PropertyFields {
                street: text(&row.street),
                city: text(&row.city),
                state: text(&row.state),
                price: row.price,
                bedrooms: row.bedrooms,
                bathrooms: row.bathrooms,
                sqft: row.sqft,
                offer_type: text(&row.offer_type),
                property_type: text(&row.property_type),
                description: text(&row.description),
            },
            notice: None,
            notice_is_error: false,
        }
    }

    pub fn with_notice(mut self, text: impl Into<String>, is_error: bool) -> Self {
        self.notice = Some(text.into());
        self.notice_is_error = is_error;
        self
    }

    fn title(&self) -> &'static str {
        if self.editing_id.is_some() {
            "Edit Property Listing"
        } else {
            "Create Property Listing"
        }
    }

    fn submit_label(&self) -> &'static str {
        if self.editing_id.is_some() {
            "Save Changes"
        } else {
            "Publish Listing"
        }
    }
}

fn number_value(v: Option<f64>) -> String {
    v.map(format_count).unwrap_or_default()
}

pub fn agent_page(user: &CurrentUser, listings: &[PropertyRow], form: &ListingFormVm) -> Markup {
    let greeting = user
        .profile
        .as_ref()
        .map(|p| p.first_name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Agent".to_string());

    desktop_layout(
        "Agent dashboard",
        Some(user),
        html! {
            main class="container" {
                h1 { "Welcome, " (greeting) }
                p class="lead" { "Manage your portfolio and publish new listings." }

                (listing_form(form))

                h2 { "Your listings" }
                div id="agent-listings" class="grid" {
                    @if listings.is_empty() {
                        div class="notice empty" {
                            h3 { "No active listings yet" }
                            p class="muted" { "Start growing your portfolio by uploading your first property." }
                        }
                    } @else {
                        @for row in listings {
                            (agent_listing_card(row))
                        }
                    }
                }
            }
        },
    )
}

fn agent_listing_card(row: &PropertyRow) -> Markup {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    html! {
        article class="card listing-card" data-id=(row.id) {
            div class="card-media" {
                @if let Some(src) = &row.image_url {
                    img src=(src) alt=(text(&row.street)) loading="lazy";
                }
                div class="badges" {
                    span class="badge badge-brand" { (text(&row.offer_type)) }
                    span class="badge badge-dark" { (text(&row.property_type)) }
                }
            }
            div class="card-body" {
                h4 { (text(&row.street)) }
                p class="muted" { (text(&row.city)) ", " (text(&row.state)) }
                p class="muted clamp" { (text(&row.description)) }
                p class="muted" {
                    (number_value(row.bedrooms)) " Beds | "
                    (number_value(row.bathrooms)) " Baths | "
                    (number_value(row.sqft)) " sqft"
                }
                div class="card-footer" {
                    span class="price" { "$" (group_thousands(row.price.unwrap_or_default())) }
                    a href=(format!("/agent?edit={}", row.id)) class="btn btn-ghost" { "Edit" }
                }
            }
        }
    }
}

fn listing_form(form: &ListingFormVm) -> Markup {
    let f = &form.fields;
    let is_rent = f.offer_type.eq_ignore_ascii_case("rent");

    html! {
        section id="upload-form-card" class="card" {
            h2 { (form.title()) }

            @if let Some(notice) = &form.notice {
                (message(notice, form.notice_is_error))
            }

            form id="upload-form" method="post" action="/agent/listings" enctype="multipart/form-data" class="stack" {
                @if let Some(id) = form.editing_id {
                    input type="hidden" name="editing_id" value=(id);
                }
                div class="row" {
                    div {
                        label for="property-street" { "Street" }
                        input type="text" id="property-street" name="street" value=(f.street) required;
                    }
                    div {
                        label for="property-city" { "City" }
                        input type="text" id="property-city" name="city" value=(f.city) required;
                    }
                    div {
                        label for="property-state" { "State" }
                        input type="text" id="property-state" name="state" value=(f.state) required;
                    }
                }
                div class="row" {
                    div {
                        label for="property-price" { "Price" }
                        input type="number" step="any" min="0" id="property-price" name="price" value=(number_value(f.price)) required;
                    }
                    div {
                        label for="property-beds" { "Bedrooms" }
                        input type="number" min="0" id="property-beds" name="bedrooms" value=(number_value(f.bedrooms));
                    }
                    div {
                        label for="property-baths" { "Bathrooms" }
                        input type="number" step="0.5" min="0" id="property-baths" name="bathrooms" value=(number_value(f.bathrooms));
                    }
                    div {
                        label for="property-sqft" { "Square feet" }
                        input type="number" min="0" id="property-sqft" name="sqft" value=(number_value(f.sqft));
                    }
                }
                div class="row" {
                    div {
                        label for="property-offer-type" { "Offer type" }
                        select id="property-offer-type" name="offer_type" {
                            option value="sale" selected[!is_rent] { "For Sale" }
                            option value="rent" selected[is_rent] { "For Rent" }
                        }
                    }
                    div {
                        label for="property-type" { "Property type" }
                        input type="text" id="property-type" name="type" value=(f.property_type) placeholder="HOUSE, CONDO, VILLA…";
                    }
                }
                label for="property-description" { "Description" }
                textarea id="property-description" name="description" rows="4" { (f.description) }

                label for="property-image" {
                    @if form.editing_id.is_some() { "Replace image (optional)" } @else { "Image" }
                }
                input type="file" id="property-image" name="image" accept="image/*";

                div class="row" {
                    button type="submit" id="submit-listing-btn" class="btn" { (form.submit_label()) }
                    @if form.editing_id.is_some() {
                        a href="/agent" class="btn btn-ghost" { "Cancel" }
                    }
                }
            }
        }
    }
}
