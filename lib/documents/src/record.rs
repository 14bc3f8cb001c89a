use serde::Deserialize;

/// A harvested service description, as produced by the harvesting pipeline.
///
/// Every field is optional: a record that misses a field required for mapping is still a valid
/// record, it is simply not recognized as a service description. Several field names have been
/// used over time (`source_url` and `url`, `digest`, `sha` and `solr_identifier`, ...). The
/// accessors resolve them in a fixed order.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ServiceRecord {
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub solr_identifier: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub identity: Option<Identity>,
    #[serde(default)]
    pub service_description: Option<ServiceDescription>,
    #[serde(default)]
    pub service: Option<ServiceBlock>,
}

/// What the harvester identified the document as.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Identity {
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ServiceDescription {
    #[serde(default)]
    pub service: Option<ServiceBlock>,
}

/// The description of the service itself.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ServiceBlock {
    #[serde(default)]
    pub title: Option<TextValues>,
    #[serde(default, rename = "abstract")]
    pub abstract_: Option<TextValues>,
    #[serde(default)]
    pub endpoints: Option<Vec<EndpointRecord>>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct EndpointRecord {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default, rename = "mimeType")]
    pub mime_types: Option<TextValues>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parameters: Option<Vec<ParameterRecord>>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ParameterRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub formats: Option<String>,
}

/// A text field that is either a single string or a list of strings.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TextValues {
    One(String),
    Many(Vec<Option<String>>),
}

impl TextValues {
    /// Iterates over the present values (see [`present`]).
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let (one, many): (Option<&str>, &[Option<String>]) = match self {
            TextValues::One(value) => (Some(value.as_str()), &[]),
            TextValues::Many(values) => (None, values.as_slice()),
        };
        one.into_iter()
            .map(Some)
            .chain(many.iter().map(Option::as_deref))
            .filter_map(present)
    }
}

impl From<&str> for TextValues {
    fn from(value: &str) -> Self {
        TextValues::One(value.to_owned())
    }
}

impl From<Vec<String>> for TextValues {
    fn from(values: Vec<String>) -> Self {
        TextValues::Many(values.into_iter().map(Some).collect())
    }
}

/// Returns the value if it is present.
///
/// Harvested fields use three spellings for "no value": a missing field, an empty string, and
/// the string `"null"`.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != "null")
}

/// The shape of the relation between a document and its endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Subtype {
    /// The document describes a service; endpoints are operations of the service.
    #[default]
    Service,
    /// Any other kind of document (catalogs, datasets, ...).
    Other(String),
}

impl From<&str> for Subtype {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("service") {
            Subtype::Service
        } else {
            Subtype::Other(value.to_owned())
        }
    }
}

impl ServiceRecord {
    /// The URL the document was harvested from.
    pub fn source_url(&self) -> Option<&str> {
        present(self.source_url.as_deref()).or_else(|| present(self.url.as_deref()))
    }

    /// The content digest of the document.
    pub fn digest(&self) -> Option<&str> {
        present(self.digest.as_deref())
            .or_else(|| present(self.sha.as_deref()))
            .or_else(|| present(self.solr_identifier.as_deref()))
    }

    /// The declared protocol, `identity.protocol` taking precedence over `protocol`.
    pub fn protocol(&self) -> Option<&str> {
        present(self.identity.as_ref().and_then(|i| i.protocol.as_deref()))
            .or_else(|| present(self.protocol.as_deref()))
    }

    pub fn version(&self) -> Option<&str> {
        present(self.identity.as_ref().and_then(|i| i.version.as_deref()))
    }

    /// The subtype of the document. Records that do not declare one are services.
    pub fn subtype(&self) -> Subtype {
        present(self.identity.as_ref().and_then(|i| i.subtype.as_deref()))
            .or_else(|| present(self.subtype.as_deref()))
            .map(Subtype::from)
            .unwrap_or_default()
    }

    /// The service block, `service_description.service` taking precedence over `service`.
    pub fn service(&self) -> Option<&ServiceBlock> {
        self.service_description
            .as_ref()
            .and_then(|d| d.service.as_ref())
            .or(self.service.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_skips_empty_and_null() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some("")), None);
        assert_eq!(present(Some("null")), None);
        assert_eq!(present(Some("NULL")), Some("NULL"));
        assert_eq!(present(Some("q")), Some("q"));
    }

    #[test]
    fn text_values_accept_scalars_and_lists() {
        let one: TextValues = serde_json::from_str(r#""A title""#).unwrap();
        assert_eq!(one.values().collect::<Vec<_>>(), ["A title"]);

        let many: TextValues = serde_json::from_str(r#"["A", null, "", "null", "B"]"#).unwrap();
        assert_eq!(many.values().collect::<Vec<_>>(), ["A", "B"]);
    }

    #[test]
    fn subtype_defaults_to_service() {
        let record = ServiceRecord::default();
        assert_eq!(record.subtype(), Subtype::Service);

        let record = ServiceRecord {
            subtype: Some("catalog".to_owned()),
            ..ServiceRecord::default()
        };
        assert_eq!(record.subtype(), Subtype::Other("catalog".to_owned()));
    }

    #[test]
    fn identity_protocol_takes_precedence() {
        let record = ServiceRecord {
            protocol: Some("OGC:WMS".to_owned()),
            identity: Some(Identity {
                protocol: Some("OpenSearch".to_owned()),
                ..Identity::default()
            }),
            ..ServiceRecord::default()
        };
        assert_eq!(record.protocol(), Some("OpenSearch"));
    }

    #[test]
    fn digest_falls_back_to_legacy_names() {
        let record = ServiceRecord {
            solr_identifier: Some("abc".to_owned()),
            ..ServiceRecord::default()
        };
        assert_eq!(record.digest(), Some("abc"));
    }
}
