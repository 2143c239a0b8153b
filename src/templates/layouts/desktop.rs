use crate::auth::CurrentUser;
use crate::templates::components::navbar;
use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, user: Option<&CurrentUser>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Estates" }
                link rel="stylesheet" href="/static/main.css";
                script src="https://unpkg.com/htmx.org@1.9.12" defer {};
            }
            body {
                (navbar(user))
                (content)
                footer class="footer" {
                    p { "© Estates. Listings are provided as-is." }
                }
            }
        }
    }
}
