use crate::auth::CurrentUser;
use maud::{html, Markup};

pub fn navbar(user: Option<&CurrentUser>) -> Markup {
    html! {
        header id="navbar" class="navbar" {
            div class="nav-inner" {
                a href="/" class="brand" { "Estates" }
                nav {
                    ul {
                        li { a href="/" { "Home" } }
                        li { a href="/properties" { "Properties" } }
                        @if user.is_some_and(CurrentUser::is_agent) {
                            li { a href="/agent" { "Dashboard" } }
                        }
                    }
                }

                @match user {
                    Some(u) => (profile_menu(u)),
                    None => div class="auth-links" {
                        a id="login" href="/login" { "Login" }
                        a id="signup" href="/signup" class="btn" { "Sign up" }
                    },
                }
            }
        }
    }
}

fn profile_menu(user: &CurrentUser) -> Markup {
    html! {
        details id="profile" class="profile" {
            @match &user.profile {
                Some(profile) => {
                    summary id="profile-content" class="avatar" { (profile.initials()) }
                    div id="profile-info" class="dropdown" {
                        p class="muted" { (profile.email) }
                        p class="strong" { (profile.full_name()) }
                        p class="role" { (profile.role) }
                        form method="post" action="/logout" {
                            button type="submit" class="btn" { "Sign Out" }
                        }
                    }
                },
                None => {
                    summary id="profile-content" class="avatar" { "U" }
                    div id="profile-info" class="dropdown" {
                        form method="post" action="/logout" {
                            button type="submit" class="btn" { "Sign Out" }
                        }
                    }
                }
            }
        }
    }
}
