//! Readers turning service description documents into [`ServiceRecord`]s.
//!
//! Two kinds of documents are supported:
//! - JSON records produced by the service harvesting pipeline ([`read_json`]).
//! - [OpenSearch description documents](https://github.com/dewitt/opensearch) ([`read_opensearch`]).
//!
//! Readers only check the syntax of a document. Whether a record is a recognized service
//! description is decided when it is mapped to triples.

mod digest;
mod error;
mod json;
mod opensearch;
mod record;

pub use digest::content_digest;
pub use error::ParseError;
pub use json::read_json;
pub use opensearch::{read_opensearch, OpenSearchDescription, UrlTemplate, OPENSEARCH_NAMESPACE};
pub use record::*;

use std::fs;
use std::path::Path;

/// The kinds of documents that can be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Json,
    OpenSearch,
}

impl DocumentKind {
    /// Guesses the kind of a document from its file name extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if extension.eq_ignore_ascii_case("xml") {
            Some(Self::OpenSearch)
        } else {
            None
        }
    }
}

/// Reads the document at `path`.
///
/// OpenSearch description documents do not carry the URL they were harvested from; the
/// `file://` URL of the document is used instead.
pub fn read_path(path: &Path) -> Result<ServiceRecord, ParseError> {
    let kind =
        DocumentKind::from_path(path).ok_or_else(|| ParseError::UnknownKind(path.to_owned()))?;
    let content = fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_owned(),
        source,
    })?;
    match kind {
        DocumentKind::Json => read_json(&content),
        DocumentKind::OpenSearch => {
            let absolute = std::path::absolute(path).map_err(|source| ParseError::Io {
                path: path.to_owned(),
                source,
            })?;
            read_opensearch(&content, &format!("file://{}", absolute.display()))
        }
    }
}
