use spargebra::SparqlSyntaxError;
use std::io;
use std::path::PathBuf;
use svcrdf_model::IriParseError;

/// An error raised while serializing a [`GraphStore`](crate::store::GraphStore) or sending it to a
/// SPARQL endpoint.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An error raised while writing the serialization.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A namespace bound to the store is not a valid IRI.
    #[error("Invalid IRI for the namespace prefix '{prefix}': {error}")]
    InvalidPrefix {
        prefix: String,
        #[source]
        error: IriParseError,
    },
    /// The URL of the SPARQL endpoint is not a valid IRI.
    #[error("Invalid SPARQL endpoint URL '{url}': {error}")]
    InvalidEndpoint {
        url: String,
        #[source]
        error: IriParseError,
    },
    /// The generated update is not valid SPARQL.
    #[error(transparent)]
    InvalidUpdate(#[from] SparqlSyntaxError),
    /// The SPARQL endpoint could not be reached.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The SPARQL endpoint answered with an error status.
    #[error("The SPARQL endpoint rejected the update with status {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// An error that prevents a batch from starting.
///
/// Errors concerning a single document never abort a batch. They are reported in its
/// [`DocumentReport`](crate::batch::DocumentReport).
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("{} is neither a file nor a directory", .0.display())]
    InvalidPath(PathBuf),
    #[error("Could not list the documents of {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// The name of an RDF format is not known.
#[derive(Debug, thiserror::Error)]
#[error("The file format '{0}' is unknown")]
pub struct UnknownFormatError(pub String);
