pub mod agent;
pub mod details;
pub mod home;
pub mod login;
pub mod properties;
pub mod signup;

pub use agent::{agent_page, ListingFormVm};
pub use details::{details_page, DetailsState};
pub use home::home_page;
pub use login::login_page;
pub use properties::{properties_page, property_results};
pub use signup::signup_page;
