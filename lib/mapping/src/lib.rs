//! The document-to-triple mapping engine.
//!
//! A [`TripleMapper`] classifies a [`ServiceRecord`](svcrdf_documents::ServiceRecord) against the
//! [`FingerprintRegistry`], mints identifiers for the document, its endpoints and their parameters
//! following an [`IdentifierStrategy`], and emits the triples describing them into a fresh
//! [`TripleSet`].

mod document;
mod error;
mod escape;
mod fingerprint;
mod identifier;
mod mapper;
mod triple_set;

pub use document::{Endpoint, Parameter, ServiceDocument};
pub use error::*;
pub use escape::{escape_iri, escaped_named_node};
pub use fingerprint::{Fingerprint, FingerprintRegistry};
pub use identifier::{EndpointIdPolicy, IdentifierMinter, IdentifierStrategy, ParameterIdPolicy};
pub use mapper::{MappedDocument, MapperConfig, MappingOutcome, TripleMapper};
pub use triple_set::{Resource, TripleSet};
