use serde::Serialize;
use std::collections::BTreeMap;

pub const CONTENT_LENGTH: &str = "Content-Length";

pub type Headers = BTreeMap<String, String>;

/// The `(status, headers, body)` triple handed to an HTTP-serving collaborator.
///
/// Only `Content-Length` is ever set. `body` always holds exactly one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<String>,
}

impl WireResponse {
    /// Wraps a rendered body; `Content-Length` is its length in bytes.
    ///
    /// The count is in UTF-8 bytes as HTTP requires, not in characters, so a
    /// body like `"café"` reports 5 rather than 4.
    pub fn new(status: u16, body: String) -> Self {
        let mut headers = Headers::new();
        headers.insert(CONTENT_LENGTH.to_string(), body.len().to_string());
        Self {
            status,
            headers,
            body: vec![body],
        }
    }

    pub fn content_length(&self) -> Option<usize> {
        self.headers.get(CONTENT_LENGTH)?.parse().ok()
    }

    pub fn body_text(&self) -> String {
        self.body.concat()
    }

    pub fn into_parts(self) -> (u16, Headers, Vec<String>) {
        (self.status, self.headers, self.body)
    }
}

impl From<WireResponse> for (u16, Headers, Vec<String>) {
    fn from(response: WireResponse) -> Self {
        response.into_parts()
    }
}
