use crate::auth::CurrentUser;
use crate::domain::listing::Listing;
use crate::templates::{desktop_layout, listing_grid};
use maud::{html, Markup};

const GRID_ID: &str = "property-grid";

pub fn properties_page(user: Option<&CurrentUser>, query: &str, listings: &[Listing]) -> Markup {
    desktop_layout(
        "Properties",
        user,
        html! {
            main class="container" {
                h1 { "Properties" }
                div class="search" {
                    input
                        type="search"
                        name="q"
                        id="search-input"
                        value=(query)
                        placeholder="Search by city, state or street"
                        autocomplete="off"
                        hx-get="/properties/search"
                        hx-trigger="keyup changed delay:200ms, search"
                        hx-target=(format!("#{GRID_ID}"))
                        hx-swap="outerHTML";
                }
                (property_results(listings))
            }
        },
    )
}

/// The grid alone; swapped in on each keystroke.
pub fn property_results(listings: &[Listing]) -> Markup {
    listing_grid(GRID_ID, listings, "No properties found")
}
