// src/forms.rs

//! Query strings, urlencoded bodies and multipart uploads.

use crate::errors::ServerError;
use astra::Request;
use bytes::Bytes;
use futures::executor::block_on;
use futures::stream;
use std::collections::HashMap;
use std::io::Read;
use url::form_urlencoded;

/// Largest request body accepted, image uploads included.
pub const MAX_BODY_BYTES: u64 = 10 * 1024 * 1024;

pub fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn read_body(req: &mut Request) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("failed to read body: {e}")))?;

    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("Request body too large".into()));
    }
    Ok(buf)
}

/// `application/x-www-form-urlencoded` body as a map.
pub fn read_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let body = read_body(req)?;
    Ok(form_urlencoded::parse(&body).into_owned().collect())
}

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).map(|s| s.trim()).unwrap_or_default()
    }

    /// A file input counts only if the browser actually sent a file.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files
            .get(name)
            .filter(|f| !f.file_name.is_empty() && !f.bytes.is_empty())
    }
}

/// Parse a `multipart/form-data` body. Parts with a file name are kept as
/// files, the rest as text fields.
pub fn read_multipart(req: &mut Request) -> Result<MultipartForm, ServerError> {
    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let boundary = multer::parse_boundary(&content_type)
        .map_err(|e| ServerError::BadRequest(format!("invalid multipart request: {e}")))?;

    let body = Bytes::from(read_body(req)?);
    let body_stream = stream::once(async move { Ok::<Bytes, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(body_stream, boundary);

    block_on(async {
        let mut form = MultipartForm::default();
        let bad = |e: multer::Error| ServerError::BadRequest(format!("invalid multipart body: {e}"));

        while let Some(field) = multipart.next_field().await.map_err(bad)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await.map_err(bad)?;
                    form.files.insert(name, UploadedFile { file_name, bytes });
                }
                None => {
                    let text = field.text().await.map_err(bad)?;
                    form.fields.insert(name, text);
                }
            }
        }
        Ok::<_, ServerError>(form)
    })
}
