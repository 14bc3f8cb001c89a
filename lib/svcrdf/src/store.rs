//! An in-memory set of triples with namespace bindings.
//!
//! The entry point of the module is the [`GraphStore`] struct.

use crate::error::StoreError;
use crate::sparql::{insert_update, SparqlEndpoint};
use oxrdfio::{RdfFormat, RdfSerializer};
use std::io::{self, Write};
use svcrdf_mapping::{Resource, TripleSet};
use svcrdf_model::{
    Iri, NamedNode, NamedNodeRef, OntologyNamespaces, SubjectRef, TermRef, TripleRef,
};

/// Accumulates the triples of mapped documents.
///
/// Triples are only ever added. Namespace prefixes are used to abbreviate IRIs in the
/// serializations that support it.
///
/// Usage example:
/// ```
/// use svcrdf::io::RdfFormat;
/// use svcrdf::model::vocab::dcterms;
/// use svcrdf::model::{Literal, NamedNodeRef};
/// use svcrdf::store::GraphStore;
///
/// let mut store = GraphStore::new();
/// store.bind_namespace("dc", dcterms::NAMESPACE)?;
/// store.add_triple(
///     NamedNodeRef::new("http://example.com/wms")?,
///     dcterms::TITLE,
///     &Literal::new_simple_literal("Example WMS"),
/// );
///
/// assert_eq!(
///     store.serialize(RdfFormat::NTriples)?,
///     "<http://example.com/wms> <http://purl.org/dc/terms/title> \"Example WMS\" .\n"
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    triples: TripleSet,
    prefixes: Vec<(String, Iri<String>)>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `prefix` to the namespace `iri`, replacing any previous binding of `prefix`.
    pub fn bind_namespace(&mut self, prefix: &str, iri: &str) -> Result<(), StoreError> {
        let iri = Iri::parse(iri.to_owned()).map_err(|error| StoreError::InvalidPrefix {
            prefix: prefix.to_owned(),
            error,
        })?;
        if let Some(binding) = self.prefixes.iter_mut().find(|(p, _)| p == prefix) {
            binding.1 = iri;
        } else {
            self.prefixes.push((prefix.to_owned(), iri));
        }
        Ok(())
    }

    /// Binds every prefix of `namespaces`.
    pub fn bind_namespaces(&mut self, namespaces: &OntologyNamespaces) -> Result<(), StoreError> {
        for (prefix, iri) in namespaces.iter() {
            self.bind_namespace(prefix, iri)?;
        }
        Ok(())
    }

    /// The bound prefixes, in binding order.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| (prefix.as_str(), iri.as_str()))
    }

    /// Adds a triple. Returns `false` if it was already present.
    pub fn add_triple<'a>(
        &mut self,
        subject: impl Into<SubjectRef<'a>>,
        predicate: impl Into<NamedNodeRef<'a>>,
        object: impl Into<TermRef<'a>>,
    ) -> bool {
        self.triples
            .insert(TripleRef::new(subject, predicate, object))
    }

    /// Returns a handle adding triples about `subject`.
    pub fn resource(&mut self, subject: NamedNode) -> Resource<'_> {
        self.triples.resource(subject)
    }

    /// Adds the triples of a mapped document.
    pub fn extend(&mut self, triples: TripleSet) {
        self.triples.extend(triples);
    }

    pub fn contains<'a>(&self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.triples.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn triples(&self) -> &TripleSet {
        &self.triples
    }

    /// Serializes the triples into a string.
    ///
    /// Formats supporting datasets put the triples in the default graph.
    pub fn serialize(&self, format: RdfFormat) -> Result<String, StoreError> {
        let buffer = self.serialize_to_writer(format, Vec::new())?;
        String::from_utf8(buffer)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error).into())
    }

    /// Serializes the triples into `writer` and returns it.
    pub fn serialize_to_writer<W: Write>(
        &self,
        format: RdfFormat,
        writer: W,
    ) -> Result<W, StoreError> {
        let mut serializer = RdfSerializer::from_format(format);
        for (prefix, iri) in &self.prefixes {
            serializer = serializer
                .with_prefix(prefix, iri.as_str())
                .map_err(|error| StoreError::InvalidPrefix {
                    prefix: prefix.clone(),
                    error,
                })?;
        }
        let mut serializer = serializer.for_writer(writer);
        for triple in self.triples.iter() {
            serializer.serialize_triple(triple)?;
        }
        Ok(serializer.finish()?)
    }

    /// Inserts all the triples into the store behind `endpoint`.
    pub async fn update(&self, endpoint: &SparqlEndpoint) -> Result<(), StoreError> {
        endpoint.update(&insert_update(&self.triples, None)?).await
    }

    /// Replaces the description of `document` in the store behind `endpoint`.
    ///
    /// The triples having `document` as subject are deleted before all the triples are inserted,
    /// so that sending the same document twice does not duplicate its attributes. The endpoint and
    /// parameter resources are kept: they must have been mapped with
    /// [`MapperConfig::reproducible`](svcrdf_mapping::MapperConfig::reproducible) identifiers so
    /// that the new triples land on the same resources.
    pub async fn replace(
        &self,
        endpoint: &SparqlEndpoint,
        document: NamedNodeRef<'_>,
    ) -> Result<(), StoreError> {
        endpoint
            .update(&insert_update(&self.triples, Some(document))?)
            .await
    }
}
