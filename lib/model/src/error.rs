use oxiri::IriParseError;

/// An error raised while building an [`OntologyNamespaces`](crate::OntologyNamespaces) table.
#[derive(Debug, thiserror::Error)]
pub enum NamespaceError {
    /// The IRI bound to a prefix is not a valid absolute IRI.
    #[error("Invalid IRI for prefix {prefix}: {error}")]
    InvalidIri {
        /// The prefix the IRI was bound to.
        prefix: String,
        /// The parsing error.
        #[source]
        error: IriParseError,
    },
    /// The same prefix has been bound twice.
    #[error("The prefix {0} is bound more than once")]
    DuplicatePrefix(String),
    /// The prefix chosen as base namespace is not part of the table.
    #[error("The base prefix {0} is not bound")]
    UnboundBasePrefix(String),
}
