use crate::auth::SignUpForm;
use crate::db::profiles::{ROLE_AGENT, ROLE_BUYER};
use crate::templates::{desktop_layout, message};
use maud::{html, Markup};

/// `form` holds what was submitted so a failed attempt keeps its values.
/// The password is never echoed back.
pub fn signup_page(error: Option<&str>, form: &SignUpForm) -> Markup {
    let is_agent = form.role == ROLE_AGENT;

    desktop_layout(
        "Sign up",
        None,
        html! {
            main class="container narrow" {
                h1 { "Create your account" }

                @if let Some(err) = error {
                    (message(err, true))
                }

                form method="post" action="/signup" class="stack" {
                    div class="row" {
                        div {
                            label for="fname" { "First name" }
                            input type="text" id="fname" name="fname" value=(form.first_name) required;
                        }
                        div {
                            label for="lname" { "Last name" }
                            input type="text" id="lname" name="lname" value=(form.last_name) required;
                        }
                    }
                    label for="email" { "Email" }
                    input type="email" id="email" name="email" value=(form.email) required;
                    label for="password" { "Password" }
                    input type="password" id="password" name="password" minlength="6" required;

                    fieldset class="roles" {
                        legend { "I am a" }
                        label {
                            input type="radio" name="role" value=(ROLE_BUYER) checked[!is_agent];
                            " Buyer"
                        }
                        label {
                            input type="radio" name="role" value=(ROLE_AGENT) checked[is_agent];
                            " Agent"
                        }
                    }
                    button type="submit" class="btn" { "Sign Up" }
                }
                p class="muted" { "Already registered? " a href="/login" { "Sign in" } }
            }
        },
    )
}
