use crate::FingerprintError;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::io::Read;
use std::sync::LazyLock;
use svcrdf_model::vocab::{service, wso};
use svcrdf_model::{NamedNode, NamedNodeRef};

static BUILTIN: LazyLock<FingerprintRegistry> = LazyLock::new(|| {
    let entries = [
        ("OpenSearch", "OpenSearch"),
        ("OGC:WMS", "WMS"),
        ("OGC:WFS", "WFS"),
        ("OGC:WCS", "WCS"),
        ("OGC:WPS", "WPS"),
        ("OGC:SOS", "SOS"),
        ("OGC:CSW", "CSW"),
        ("OAI-PMH", "OAI-PMH"),
        ("OPeNDAP", "OPeNDAP"),
        ("UNIDATA:THREDDS", "THREDDS"),
    ];
    FingerprintRegistry {
        entries: entries
            .into_iter()
            .map(|(protocol, class)| {
                let fingerprint = Fingerprint {
                    protocol: protocol.to_owned(),
                    object_type: service::SERVICE.into_owned(),
                    class_iri: NamedNode::new_unchecked(format!("{}{class}", wso::NAMESPACE)),
                    class: class.to_owned(),
                };
                (protocol.to_owned(), fingerprint)
            })
            .collect(),
    }
});

/// Classifies documents declaring `protocol` as instances of an ontology class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fingerprint {
    protocol: String,
    object_type: NamedNode,
    class: String,
    class_iri: NamedNode,
}

impl Fingerprint {
    /// Creates a fingerprint. The class IRI is `class` resolved against the web service ontology.
    pub fn new(protocol: &str, object_type: &str, class: &str) -> Result<Self, FingerprintError> {
        let object_type =
            NamedNode::new(object_type).map_err(|error| FingerprintError::InvalidObjectType {
                protocol: protocol.to_owned(),
                error,
            })?;
        let class_iri = NamedNode::new(format!("{}{class}", wso::NAMESPACE)).map_err(|error| {
            FingerprintError::InvalidClass {
                protocol: protocol.to_owned(),
                class: class.to_owned(),
                error,
            }
        })?;
        Ok(Self {
            protocol: protocol.to_owned(),
            object_type,
            class: class.to_owned(),
            class_iri,
        })
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// The generic type of the classified documents.
    pub fn object_type(&self) -> NamedNodeRef<'_> {
        self.object_type.as_ref()
    }

    /// The name of the ontology class, e.g. `OpenSearch`.
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn class_iri(&self) -> NamedNodeRef<'_> {
        self.class_iri.as_ref()
    }
}

#[derive(Deserialize)]
struct FingerprintEntry {
    protocol: String,
    object_type: String,
    class: String,
}

/// The table of known fingerprints, looked up by exact protocol match.
///
/// The table is loaded once and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FingerprintRegistry {
    entries: FxHashMap<String, Fingerprint>,
}

impl FingerprintRegistry {
    /// The built-in table of web service protocols. Every entry has the generic type
    /// `Service:Service`.
    pub fn builtin() -> &'static FingerprintRegistry {
        &BUILTIN
    }

    /// Builds a registry from fingerprints. Each protocol may only appear once.
    pub fn from_fingerprints(
        fingerprints: impl IntoIterator<Item = Fingerprint>,
    ) -> Result<Self, FingerprintError> {
        let mut entries = FxHashMap::default();
        for fingerprint in fingerprints {
            let protocol = fingerprint.protocol.clone();
            if entries.insert(protocol.clone(), fingerprint).is_some() {
                return Err(FingerprintError::DuplicateProtocol(protocol));
            }
        }
        Ok(Self { entries })
    }

    /// Reads a registry from a JSON array of `{"protocol", "object_type", "class"}` objects.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, FingerprintError> {
        let entries: Vec<FingerprintEntry> = serde_json::from_reader(reader)?;
        let fingerprints = entries
            .iter()
            .map(|entry| Fingerprint::new(&entry.protocol, &entry.object_type, &entry.class))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_fingerprints(fingerprints)
    }

    /// Returns the fingerprint of `protocol`, if any.
    ///
    /// Matching is exact: `OGC:WMS` does not match `ogc:wms` or `OGC:WMS 1.3.0`.
    pub fn classify(&self, protocol: &str) -> Option<&Fingerprint> {
        self.entries.get(protocol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fingerprint> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_classifies_opensearch() {
        let fingerprint = FingerprintRegistry::builtin()
            .classify("OpenSearch")
            .unwrap();
        assert_eq!(fingerprint.object_type(), service::SERVICE);
        assert_eq!(fingerprint.class(), "OpenSearch");
        assert_eq!(
            fingerprint.class_iri().as_str(),
            "http://purl.org/nsidc/bcube/web-services#OpenSearch"
        );
    }

    #[test]
    fn builtin_entries_are_valid() {
        for fingerprint in FingerprintRegistry::builtin().iter() {
            let checked = Fingerprint::new(
                fingerprint.protocol(),
                fingerprint.object_type().as_str(),
                fingerprint.class(),
            )
            .unwrap();
            assert_eq!(&checked, fingerprint);
        }
    }

    #[test]
    fn classification_is_exact() {
        let registry = FingerprintRegistry::builtin();
        assert!(registry.classify("OGC:WMS").is_some());
        assert!(registry.classify("ogc:wms").is_none());
        assert!(registry.classify("OGC:WMS ").is_none());
        assert!(registry.classify("").is_none());
    }

    #[test]
    fn reads_json_tables() {
        let registry = FingerprintRegistry::from_json_reader(
            br#"[{"protocol": "OpenSearch-ish", "object_type": "http://example.org/ObjType", "class": "OpenSearch"}]"#
                .as_slice(),
        )
        .unwrap();
        assert_eq!(registry.len(), 1);
        let fingerprint = registry.classify("OpenSearch-ish").unwrap();
        assert_eq!(fingerprint.object_type().as_str(), "http://example.org/ObjType");
    }

    #[test]
    fn rejects_duplicate_protocols() {
        let fingerprint = Fingerprint::new("P", "http://example.org/T", "C").unwrap();
        assert!(matches!(
            FingerprintRegistry::from_fingerprints([fingerprint.clone(), fingerprint]),
            Err(FingerprintError::DuplicateProtocol(p)) if p == "P"
        ));
    }

    #[test]
    fn rejects_relative_object_types() {
        assert!(matches!(
            Fingerprint::new("P", "ObjType", "C"),
            Err(FingerprintError::InvalidObjectType { .. })
        ));
    }
}
