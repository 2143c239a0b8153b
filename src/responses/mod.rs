pub mod html;
pub mod json;

pub use crate::errors::ResultResp;

pub use html::{bytes_response, html_response, html_response_with_status, redirect_response};
pub use json::{json_error, json_response};
