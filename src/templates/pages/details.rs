use crate::auth::CurrentUser;
use crate::db::properties::PropertyRow;
use crate::domain::listing::{format_count, group_thousands};
use crate::templates::{desktop_layout, message};
use maud::{html, Markup};

const HERO_FALLBACK: &str =
    "https://images.unsplash.com/photo-1613490493576-7fde63acd811?auto=format&fit=crop&q=80&w=2000";

const AMENITIES: [&str; 6] = [
    "Infinity Pool",
    "4-Car Garage",
    "Smart Security",
    "Climate Control",
    "Home Gym",
    "Private Dock",
];

pub enum DetailsState {
    /// No `id` in the query string.
    Missing,
    NotFound,
    Found(PropertyRow),
    /// The lookup itself failed.
    Error,
}

/// Display values for a single stored listing, with the page's fallbacks applied.
struct DetailsVm {
    title: String,
    status: String,
    property_type: String,
    address: String,
    price: String,
    beds: String,
    baths: String,
    sqft: String,
    paragraphs: Vec<String>,
    image_url: String,
}

fn text_or(value: &Option<String>, fallback: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

impl DetailsVm {
    fn from_row(row: &PropertyRow) -> Self {
        let property_type = text_or(&row.property_type, "Property").replace('_', " ");
        let city = text_or(&row.city, "");
        let title = format!("{property_type} in {city}").trim().to_string();

        let address = [&row.street, &row.city, &row.state]
            .into_iter()
            .filter_map(|s| s.as_deref().map(str::trim).filter(|s| !s.is_empty()))
            .collect::<Vec<_>>()
            .join(", ");

        let description = text_or(&row.description, "No description available for this property.");

        Self {
            title,
            status: text_or(&row.offer_type, "For Sale"),
            property_type,
            address,
            price: format!("${}", group_thousands(row.price.unwrap_or_default())),
            beds: positive(row.bedrooms).map_or("-".into(), format_count),
            baths: positive(row.bathrooms).map_or("-".into(), format_count),
            sqft: positive(row.sqft).map_or("-".into(), group_thousands),
            paragraphs: description
                .lines()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect(),
            image_url: text_or(&row.image_url, HERO_FALLBACK),
        }
    }
}

pub fn details_page(user: Option<&CurrentUser>, state: &DetailsState) -> Markup {
    let body = match state {
        DetailsState::Missing => message("No property selected", true),
        DetailsState::NotFound => message("Property not found", false),
        DetailsState::Found(row) => property_details(&DetailsVm::from_row(row)),
        DetailsState::Error => message("Error loading property details.", true),
    };

    desktop_layout(
        "Property details",
        user,
        html! {
            main id="dynamic-content" class="container" { (body) }
        },
    )
}

fn property_details(vm: &DetailsVm) -> Markup {
    html! {
        nav class="breadcrumbs" {
            a href="/" { "Home" } " / "
            a href="/properties" { "Properties" } " / "
            span { (vm.title) }
        }

        div class="details-header" {
            div {
                div class="badges" {
                    span class="badge badge-brand" { (vm.status) }
                    span class="badge" { (vm.property_type) }
                }
                h1 { (vm.title) }
                p class="muted" { (vm.address) }
            }
            div class="asking" {
                p class="muted" { "Asking Price" }
                p class="price big" { (vm.price) }
            }
        }

        div class="hero-image" {
            img src=(vm.image_url) alt=(vm.title)
                onerror=(format!("this.onerror=null; this.src='{HERO_FALLBACK}';"));
        }

        div class="facts big" {
            div { p class="muted" { "Bedrooms" } p class="strong" { (vm.beds) } }
            div { p class="muted" { "Bathrooms" } p class="strong" { (vm.baths) } }
            div { p class="muted" { "Square Area" } p class="strong" { (vm.sqft) " sq ft" } }
        }

        section class="card" {
            h2 { "About this Property" }
            @for paragraph in &vm.paragraphs {
                p { (paragraph) }
            }
        }

        section class="card" {
            h2 { "Amenities & Features" }
            ul class="amenities" {
                @for amenity in AMENITIES {
                    li { (amenity) }
                }
            }
        }
    }
}
