use crate::vocab::{dcterms, media, profile, service, service_parameter, wso};
use crate::NamespaceError;
use oxiri::Iri;
use std::sync::LazyLock;

static BUILTIN: LazyLock<OntologyNamespaces> = LazyLock::new(|| OntologyNamespaces {
    base: 0,
    prefixes: [
        ("wso", wso::NAMESPACE),
        ("Profile", profile::NAMESPACE),
        ("Service", service::NAMESPACE),
        ("ServiceParameter", service_parameter::NAMESPACE),
        ("dc", dcterms::NAMESPACE),
        ("media", media::NAMESPACE),
        ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
        ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
        ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ]
    .into_iter()
    .map(|(prefix, iri)| (prefix.to_owned(), Iri::parse_unchecked(iri.to_owned())))
    .collect(),
});

/// The prefix → namespace table of the ontologies used in the generated graphs.
///
/// The table is built once and never mutated afterwards. One of the namespaces is the *base*
/// namespace: the identifiers of mapped documents are minted inside of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OntologyNamespaces {
    prefixes: Vec<(String, Iri<String>)>,
    base: usize,
}

impl OntologyNamespaces {
    /// Returns the built-in table (`wso`, `Profile`, `Service`, `ServiceParameter`, `dc`, `media`,
    /// `rdf`, `rdfs` and `xsd`). The base namespace is `wso`.
    pub fn builtin() -> &'static OntologyNamespaces {
        &BUILTIN
    }

    /// Builds a table from `(prefix, iri)` pairs. `base_prefix` selects the base namespace.
    pub fn new<'a>(
        base_prefix: &str,
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, NamespaceError> {
        let mut prefixes: Vec<(String, Iri<String>)> = Vec::new();
        for (prefix, iri) in entries {
            if prefixes.iter().any(|(p, _)| p == prefix) {
                return Err(NamespaceError::DuplicatePrefix(prefix.to_owned()));
            }
            let iri = Iri::parse(iri.to_owned()).map_err(|error| NamespaceError::InvalidIri {
                prefix: prefix.to_owned(),
                error,
            })?;
            prefixes.push((prefix.to_owned(), iri));
        }
        let base = prefixes
            .iter()
            .position(|(p, _)| p == base_prefix)
            .ok_or_else(|| NamespaceError::UnboundBasePrefix(base_prefix.to_owned()))?;
        Ok(Self { prefixes, base })
    }

    /// The namespace resource identifiers are minted in.
    pub fn base(&self) -> &str {
        self.prefixes[self.base].1.as_str()
    }

    /// Returns the namespace bound to `prefix`.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, iri)| iri.as_str())
    }

    /// Iterates over the `(prefix, namespace)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| (prefix.as_str(), iri.as_str()))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl Default for OntologyNamespaces {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
