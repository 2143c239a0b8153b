use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use maud::{html, DOCTYPE};
use tracing::error;

/// Convert a ServerError into a proper HTML response page
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();
    let message = match err {
        ServerError::NotFound => "Not Found".to_string(),
        ServerError::BadRequest(msg)
        | ServerError::Unauthorized(msg)
        | ServerError::Forbidden(msg) => msg,
        // Internal details stay in the log.
        ServerError::DbError(msg) | ServerError::Storage(msg) => {
            error!("request failed: {msg}");
            "Something went wrong. Please try again later.".to_string()
        }
        ServerError::InternalError => "Internal Server Error".to_string(),
    };
    render_error(status, &message)
}

/// Build a basic HTML error page
fn render_error(status: u16, message: &str) -> Response {
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Error " (status) }
                link rel="stylesheet" href="/static/main.css";
            }
            body class="error-page" {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to home" } }
            }
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
