//! Identifiers of the resources emitted for a document.
//!
//! - Documents are identified by their content digest inside the base namespace. Mapping the same
//!   content twice always yields the same identifier.
//! - Endpoints are identified by their URL ([`EndpointIdPolicy::UrlKeyed`]) or by a fresh
//!   `urn:uuid:` IRI ([`EndpointIdPolicy::Synthetic`]).
//! - Parameters are identified by a fresh `urn:uuid:` IRI ([`ParameterIdPolicy::Synthetic`]) or by
//!   their position in the document ([`ParameterIdPolicy::Positional`]).
//!
//! URL-keyed endpoints let two documents describing the same endpoint share one resource, and
//! re-ingesting a document does not create new endpoint resources. Synthetic endpoints never merge,
//! but every ingestion of a document creates new endpoint resources.

use crate::{escaped_named_node, EscapingError};
use rustc_hash::{FxHashMap, FxHashSet};
use svcrdf_model::NamedNode;
use uuid::Uuid;

/// How endpoint identifiers are minted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EndpointIdPolicy {
    /// The escaped endpoint URL. The n-th repetition of a URL within a document gets the suffix
    /// `#n` (or `-n` if the URL already has a fragment).
    #[default]
    UrlKeyed,
    /// A random `urn:uuid:` IRI.
    Synthetic,
}

/// How parameter identifiers are minted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParameterIdPolicy {
    /// A random `urn:uuid:` IRI.
    #[default]
    Synthetic,
    /// `<base><digest>/endpoint/<i>/parameter/<j>`, stable across runs.
    Positional,
}

/// The identifier policies of a deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IdentifierStrategy {
    pub endpoints: EndpointIdPolicy,
    pub parameters: ParameterIdPolicy,
}

impl IdentifierStrategy {
    pub fn new(endpoints: EndpointIdPolicy, parameters: ParameterIdPolicy) -> Self {
        Self {
            endpoints,
            parameters,
        }
    }

    /// The identifier of a document: the base namespace followed by the escaped digest.
    pub fn document_id(&self, base: &str, digest: &str) -> Result<NamedNode, EscapingError> {
        escaped_named_node(&format!("{base}{digest}"))
    }

    /// Starts minting the identifiers of one document.
    pub fn minter<'a>(&self, base: &'a str, digest: &'a str) -> IdentifierMinter<'a> {
        IdentifierMinter {
            strategy: *self,
            base,
            digest,
            occurrences: FxHashMap::default(),
            minted: FxHashSet::default(),
        }
    }
}

/// Mints the endpoint and parameter identifiers of a single document.
///
/// The minter remembers the identifiers it handed out, so that two endpoints of the document never
/// share an identifier.
#[derive(Debug)]
pub struct IdentifierMinter<'a> {
    strategy: IdentifierStrategy,
    base: &'a str,
    digest: &'a str,
    occurrences: FxHashMap<String, usize>,
    minted: FxHashSet<NamedNode>,
}

impl IdentifierMinter<'_> {
    /// Mints the identifier of an endpoint reachable at `url`.
    pub fn endpoint_id(&mut self, url: &str) -> Result<NamedNode, EscapingError> {
        match self.strategy.endpoints {
            EndpointIdPolicy::Synthetic => Ok(synthetic_id()),
            EndpointIdPolicy::UrlKeyed => {
                let occurrence = self.occurrences.entry(url.to_owned()).or_insert(0);
                loop {
                    *occurrence += 1;
                    let candidate = if *occurrence == 1 {
                        escaped_named_node(url)?
                    } else {
                        escaped_named_node(&with_counter_suffix(url, *occurrence))?
                    };
                    if self.minted.insert(candidate.clone()) {
                        return Ok(candidate);
                    }
                }
            }
        }
    }

    /// Mints the identifier of the `parameter`-th parameter of the `endpoint`-th endpoint.
    pub fn parameter_id(
        &mut self,
        endpoint: usize,
        parameter: usize,
    ) -> Result<NamedNode, EscapingError> {
        match self.strategy.parameters {
            ParameterIdPolicy::Synthetic => Ok(synthetic_id()),
            ParameterIdPolicy::Positional => escaped_named_node(&format!(
                "{}{}/endpoint/{endpoint}/parameter/{parameter}",
                self.base, self.digest
            )),
        }
    }
}

fn with_counter_suffix(url: &str, counter: usize) -> String {
    if url.contains('#') {
        format!("{url}-{counter}")
    } else {
        format!("{url}#{counter}")
    }
}

fn synthetic_id() -> NamedNode {
    NamedNode::new_unchecked(Uuid::new_v4().urn().to_string())
}
