use std::io;
use std::path::PathBuf;

/// An error raised while reading a document.
///
/// A parse error means the document could not be read at all. It is not raised for documents
/// that are well-formed but lack the fields of a service description.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The document could not be read from the file system.
    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file name does not tell which kind of document it is.
    #[error("Cannot tell the document kind of {}", .0.display())]
    UnknownKind(PathBuf),
    /// The JSON record is malformed or does not fit the record schema.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The XML document is malformed.
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    /// An XML attribute is malformed.
    #[error(transparent)]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),
}
