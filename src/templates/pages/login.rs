use crate::templates::{desktop_layout, message};
use maud::{html, Markup};

pub fn login_page(error: Option<&str>, email: &str) -> Markup {
    desktop_layout(
        "Sign in",
        None,
        html! {
            main class="container narrow" {
                h1 { "Welcome back" }
                p class="lead" { "Sign in to manage your listings and saved homes." }

                @if let Some(err) = error {
                    (message(err, true))
                }

                form method="post" action="/login" class="stack" {
                    label for="email" { "Email" }
                    input type="email" id="email" name="email" value=(email) required;
                    label for="password" { "Password" }
                    input type="password" id="password" name="password" required;
                    button type="submit" class="btn" { "Sign In" }
                }
                p class="muted" { "No account yet? " a href="/signup" { "Create one" } }
            }
        },
    )
}
