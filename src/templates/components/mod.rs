use maud::{html, Markup};

pub mod card;
pub mod error;
pub mod navbar;

pub use card::listing_grid;
pub use error::html_error_response;
pub use navbar::navbar;

/// Inline full-width notice. `is_error` switches to the alert style.
pub fn message(text: &str, is_error: bool) -> Markup {
    html! {
        div class="notice" {
            @if is_error {
                p class="notice-error" role="alert" { (text) }
            } @else {
                p class="notice-muted" { (text) }
            }
        }
    }
}
