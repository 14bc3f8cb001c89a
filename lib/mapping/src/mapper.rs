use crate::{
    escaped_named_node, ClassificationMiss, EndpointIdPolicy, Fingerprint, FingerprintRegistry,
    IdentifierStrategy, MappingError, ParameterIdPolicy, ServiceDocument, TripleSet,
};
use std::sync::Arc;
use svcrdf_documents::{ServiceRecord, Subtype};
use svcrdf_model::vocab::{dcterms, media, rdf, rdfs, service_parameter, wso, xsd};
use svcrdf_model::{Literal, NamedNode, OntologyNamespaces};

/// The identifier policies used by a [`TripleMapper`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapperConfig {
    pub endpoint_ids: EndpointIdPolicy,
    pub parameter_ids: ParameterIdPolicy,
}

impl MapperConfig {
    /// Whether mapping the same record twice yields the same triples.
    pub fn is_reproducible(&self) -> bool {
        self.endpoint_ids == EndpointIdPolicy::UrlKeyed
            && self.parameter_ids == ParameterIdPolicy::Positional
    }

    /// The URL-keyed and positional policies.
    ///
    /// A store only holding reproducible mappings can be updated by replacing the triples of a
    /// document: the endpoint and parameter resources of a re-ingested document keep their
    /// identifiers, so no resource is duplicated.
    #[must_use]
    pub fn reproducible() -> Self {
        Self {
            endpoint_ids: EndpointIdPolicy::UrlKeyed,
            parameter_ids: ParameterIdPolicy::Positional,
        }
    }
}

/// The result of mapping one record.
#[derive(Debug)]
pub enum MappingOutcome {
    /// The record is a service description.
    Mapped(MappedDocument),
    /// The record is not a recognized service description. No triple was emitted.
    Unrecognized(ClassificationMiss),
}

/// The triples of a mapped document.
#[derive(Debug)]
pub struct MappedDocument {
    /// The identifier of the document resource.
    pub identifier: NamedNode,
    pub triples: TripleSet,
    pub endpoints: usize,
    pub parameters: usize,
}

/// Maps service records to triples.
///
/// The namespaces and the fingerprint table are fixed at construction. A mapper can be shared
/// between threads; each call to [`map`](Self::map) writes into its own [`TripleSet`].
#[derive(Clone, Debug)]
pub struct TripleMapper {
    namespaces: Arc<OntologyNamespaces>,
    registry: Arc<FingerprintRegistry>,
    identifiers: IdentifierStrategy,
}

impl Default for TripleMapper {
    fn default() -> Self {
        Self::new(
            Arc::new(OntologyNamespaces::builtin().clone()),
            Arc::new(FingerprintRegistry::builtin().clone()),
            MapperConfig::default(),
        )
    }
}

impl TripleMapper {
    pub fn new(
        namespaces: Arc<OntologyNamespaces>,
        registry: Arc<FingerprintRegistry>,
        config: MapperConfig,
    ) -> Self {
        Self {
            namespaces,
            registry,
            identifiers: IdentifierStrategy::new(config.endpoint_ids, config.parameter_ids),
        }
    }

    pub fn namespaces(&self) -> &OntologyNamespaces {
        &self.namespaces
    }

    pub fn registry(&self) -> &FingerprintRegistry {
        &self.registry
    }

    /// Maps `record` to triples.
    ///
    /// Records that are not classified by the fingerprint table, or that lack the structure of a
    /// service description, are [`MappingOutcome::Unrecognized`]. Every identifier and URL is
    /// escaped before the first triple is written, so an [`EscapingError`](crate::EscapingError)
    /// leaves no triple behind.
    pub fn map(&self, record: &ServiceRecord) -> Result<MappingOutcome, MappingError> {
        let Some(protocol) = record.protocol() else {
            return Ok(MappingOutcome::Unrecognized(
                ClassificationMiss::MissingProtocol,
            ));
        };
        let Some(fingerprint) = self.registry.classify(protocol) else {
            return Ok(MappingOutcome::Unrecognized(
                ClassificationMiss::UnknownProtocol(protocol.to_owned()),
            ));
        };
        let document = match ServiceDocument::from_record(record) {
            Ok(document) => document,
            Err(miss) => return Ok(MappingOutcome::Unrecognized(miss)),
        };

        let resolved = self.resolve(&document)?;
        let mapped = resolved.emit(fingerprint, &document);
        tracing::debug!(
            document = %mapped.identifier,
            triples = mapped.triples.len(),
            endpoints = mapped.endpoints,
            parameters = mapped.parameters,
            "Mapped service description"
        );
        Ok(MappingOutcome::Mapped(mapped))
    }

    fn resolve(&self, document: &ServiceDocument<'_>) -> Result<ResolvedDocument, MappingError> {
        let base = self.namespaces.base();
        let identifier = self.identifiers.document_id(base, document.digest)?;
        let base_url = escaped_named_node(document.source_url)?;
        let mut minter = self.identifiers.minter(base, document.digest);
        let mut endpoints = Vec::with_capacity(document.endpoints.len());
        for (i, endpoint) in document.endpoints.iter().enumerate() {
            let media_types = endpoint
                .mime_types
                .iter()
                .map(|mime| escaped_named_node(&format!("{}{mime}", media::NAMESPACE)))
                .collect::<Result<Vec<_>, _>>()?;
            // Parameters of non-service documents are not mapped.
            let parameters = if document.subtype == Subtype::Service {
                (0..endpoint.parameters.len())
                    .map(|j| minter.parameter_id(i, j))
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                Vec::new()
            };
            endpoints.push(ResolvedEndpoint {
                identifier: minter.endpoint_id(endpoint.url)?,
                base_url: escaped_named_node(endpoint.url)?,
                media_types,
                parameters,
            });
        }
        Ok(ResolvedDocument {
            identifier,
            base_url,
            endpoints,
        })
    }
}

/// The identifiers and escaped URLs of a document, computed before any triple is emitted.
struct ResolvedDocument {
    identifier: NamedNode,
    base_url: NamedNode,
    endpoints: Vec<ResolvedEndpoint>,
}

struct ResolvedEndpoint {
    identifier: NamedNode,
    base_url: NamedNode,
    media_types: Vec<NamedNode>,
    parameters: Vec<NamedNode>,
}

impl ResolvedDocument {
    fn emit(self, fingerprint: &Fingerprint, document: &ServiceDocument<'_>) -> MappedDocument {
        let mut triples = TripleSet::new();
        let mut parameter_count = 0;

        let mut resource = triples.resource(self.identifier.clone());
        resource
            .add(rdf::TYPE, fingerprint.object_type().into_owned())
            .add(rdf::TYPE, fingerprint.class_iri().into_owned())
            .add(wso::BASE_URL, any_uri(&self.base_url));
        for title in &document.titles {
            resource.add(dcterms::TITLE, Literal::new_simple_literal(*title));
        }
        for abstract_ in &document.abstracts {
            resource.add(dcterms::ABSTRACT, Literal::new_simple_literal(*abstract_));
        }
        if let Some(version) = document.version {
            resource.add(dcterms::HAS_VERSION, Literal::new_simple_literal(version));
        }

        let relationship = match document.subtype {
            Subtype::Service => wso::HAS_SERVICE,
            Subtype::Other(_) => wso::CHILD_OF,
        };
        for (resolved, endpoint) in self.endpoints.iter().zip(&document.endpoints) {
            let mut resource = triples.resource(resolved.identifier.clone());
            resource
                .add(wso::BASE_URL, any_uri(&resolved.base_url))
                .add(relationship, self.identifier.clone());
            if let Some(protocol) = endpoint.protocol {
                resource.add(wso::PROTOCOL, Literal::new_simple_literal(protocol));
            }
            for media_type in &resolved.media_types {
                resource.add(dcterms::FORMAT, media_type.clone());
            }
            if let Some(name) = endpoint.name {
                resource.add(rdfs::LABEL, Literal::new_simple_literal(name));
            }
            for parameter in &resolved.parameters {
                resource.add(wso::HAS_PARAMETERS, parameter.clone());
            }

            for (identifier, parameter) in resolved.parameters.iter().zip(&endpoint.parameters) {
                let mut resource = triples.resource(identifier.clone());
                resource.add(rdf::TYPE, wso::PARAMETER.into_owned());
                if let Some(name) = parameter.name {
                    resource.add(
                        service_parameter::SERVICE_PARAMETER_NAME,
                        Literal::new_simple_literal(name),
                    );
                }
                if let Some(formats) = parameter.formats {
                    resource.add(wso::PARAMETER_FORMAT, Literal::new_simple_literal(formats));
                }
                if let Some(kind) = parameter.kind {
                    resource.add(wso::PARAMETER_TYPE, Literal::new_simple_literal(kind));
                }
                parameter_count += 1;
            }
        }

        MappedDocument {
            identifier: self.identifier,
            triples,
            endpoints: self.endpoints.len(),
            parameters: parameter_count,
        }
    }
}

fn any_uri(url: &NamedNode) -> Literal {
    Literal::new_typed_literal(url.as_str(), xsd::ANY_URI)
}
