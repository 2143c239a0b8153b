use crate::domain::listing::{format_count, Listing};
use maud::{html, Markup};

/// Shown if a cover image fails to load in the browser.
const BROKEN_IMAGE_FALLBACK: &str =
    "https://images.unsplash.com/photo-1512918766674-ed62b9aed97a?q=80&w=1200&auto=format&fit=crop";

pub fn listing_card(listing: &Listing) -> Markup {
    let address = listing.address();
    let link = listing.link();

    html! {
        article class="card listing-card" data-id=(listing.id) {
            div class="card-media" {
                img src=(listing.cover_picture()) alt=(address) loading="lazy"
                    onerror=(format!("this.onerror=null; this.src='{BROKEN_IMAGE_FALLBACK}';"));
                div class="badges" {
                    span class="badge badge-brand" { (listing.offer_type.label()) }
                    span class="badge badge-dark" { (listing.type_label()) }
                }
            }
            div class="card-body" {
                p class="muted address" { (address) }
                h4 { (listing.city_label()) ", " (listing.state_label()) }
                @if !listing.description.is_empty() {
                    p class="muted clamp" { (listing.description) }
                }
                div class="facts" {
                    span { strong { (format_count(listing.bedrooms)) } " Beds" }
                    span { strong { (format_count(listing.bathrooms)) } " Baths" }
                    span { strong { (listing.area_label()) } " sqft" }
                }
                div class="card-footer" {
                    span class="price" { (listing.price_label()) }
                    @if listing.is_store() {
                        a href=(link) class="btn" { "View" }
                    } @else {
                        a href=(link) class="btn" target="_blank" rel="noopener" { "View" }
                    }
                }
            }
        }
    }
}

/// Grid of cards, or `empty_message` when there is nothing to show.
pub fn listing_grid(id: &str, listings: &[Listing], empty_message: &str) -> Markup {
    html! {
        div id=(id) class="grid" {
            @if listings.is_empty() {
                (super::message(empty_message, false))
            } @else {
                @for listing in listings {
                    (listing_card(listing))
                }
            }
        }
    }
}
