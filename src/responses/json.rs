use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;
use serde_json::json;

/// JSON body with the CORS headers the listings endpoint promises.
pub fn json_response<T: Serialize>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

/// `{"error": "..."}` with the given status.
pub fn json_error(status: u16, message: &str) -> ResultResp {
    json_response(status, &json!({ "error": message }))
}
