pub mod events;
pub mod password;
pub mod service;
pub mod sessions;
pub mod token;

pub use events::{AuthEvent, AuthEvents};
pub use service::{AuthService, CurrentUser, SignUpForm};
