use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum SourceError {
    Config(String),
    Network(String),
    Status(u16),
    JsonParse(String),
    UnexpectedShape(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Config(msg) => write!(f, "{msg}"),
            SourceError::Network(msg) => write!(f, "Network error: {msg}"),
            SourceError::Status(code) => write!(f, "Apify responded with status {code}"),
            SourceError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            SourceError::UnexpectedShape(msg) => write!(f, "Unexpected data shape: {msg}"),
        }
    }
}

impl Error for SourceError {}
