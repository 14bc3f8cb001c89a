mod error;
mod namespaces;
pub mod vocab;

pub use error::*;
pub use namespaces::*;

// Re-export some oxrdf types.
pub use oxiri::Iri;
pub use oxrdf::{
    Graph, GraphNameRef, IriParseError, Literal, LiteralRef, NamedNode, NamedNodeRef, Subject,
    SubjectRef, Term, TermRef, Triple, TripleRef,
};
