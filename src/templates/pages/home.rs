// templates/pages/home.rs

use crate::aggregate::Gathered;
use crate::auth::CurrentUser;
use crate::templates::{desktop_layout, listing_grid, message};
use maud::{html, Markup};

pub fn home_page(user: Option<&CurrentUser>, gathered: &Gathered) -> Markup {
    desktop_layout(
        "Home",
        user,
        html! {
            section class="hero" {
                h1 { "Find a place worth coming home to" }
                p class="lead" { "Hand-picked homes from our agents and the wider market." }
                a href="/properties" class="btn" { "Browse properties" }
            }

            main class="container" {
                h2 { "Featured listings" }
                @if gathered.all_failed() {
                    div id="listings" class="grid" {
                        (message("Failed to load listings. Please try again later.", true))
                    }
                } @else {
                    (listing_grid("listings", &gathered.listings, "No properties found at the moment."))
                }
            }
        },
    )
}
