use svcrdf_model::IriParseError;

/// Why a record is not recognized as a service description.
///
/// A miss is an expected outcome of mapping, not a failure: most harvested documents are not
/// service descriptions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationMiss {
    #[error("the document does not declare a protocol")]
    MissingProtocol,
    #[error("the protocol '{0}' is not a known service fingerprint")]
    UnknownProtocol(String),
    #[error("the required field '{0}' is missing")]
    MissingField(String),
}

/// A value could not be turned into a legal IRI, even after escaping.
#[derive(Debug, thiserror::Error)]
#[error("'{value}' cannot be used as an IRI: {error}")]
pub struct EscapingError {
    /// The escaped value.
    pub value: String,
    #[source]
    pub error: IriParseError,
}

/// An error raised while mapping a recognized document.
///
/// The error only concerns the document being mapped; no triple of the document is kept.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MappingError {
    #[error(transparent)]
    Escaping(#[from] EscapingError),
}

/// An error raised while building a [`FingerprintRegistry`](crate::FingerprintRegistry).
#[derive(Debug, thiserror::Error)]
pub enum FingerprintError {
    /// The fingerprint table is not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The object type of a fingerprint is not a valid IRI.
    #[error("Invalid object type for protocol {protocol}: {error}")]
    InvalidObjectType {
        protocol: String,
        #[source]
        error: IriParseError,
    },
    /// The ontology class name does not form a valid IRI in the base namespace.
    #[error("Invalid ontology class '{class}' for protocol {protocol}: {error}")]
    InvalidClass {
        protocol: String,
        class: String,
        #[source]
        error: IriParseError,
    },
    /// The same protocol appears twice in the table.
    #[error("The protocol {0} has more than one fingerprint")]
    DuplicateProtocol(String),
}
