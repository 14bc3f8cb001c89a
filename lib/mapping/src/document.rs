use crate::ClassificationMiss;
use svcrdf_documents::{present, ServiceRecord, Subtype, TextValues};

/// A record that has the structure of a service description.
///
/// Built from a [`ServiceRecord`] by [`ServiceDocument::from_record`]. Absent values (see
/// [`present`]) are already filtered out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceDocument<'a> {
    pub source_url: &'a str,
    pub digest: &'a str,
    pub version: Option<&'a str>,
    pub titles: Vec<&'a str>,
    pub abstracts: Vec<&'a str>,
    pub subtype: Subtype,
    pub endpoints: Vec<Endpoint<'a>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub url: &'a str,
    pub protocol: Option<&'a str>,
    pub mime_types: Vec<&'a str>,
    pub name: Option<&'a str>,
    pub parameters: Vec<Parameter<'a>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter<'a> {
    pub name: Option<&'a str>,
    pub kind: Option<&'a str>,
    pub formats: Option<&'a str>,
}

impl<'a> ServiceDocument<'a> {
    /// Checks that `record` has the minimal structure of a service description.
    ///
    /// A record needs a source URL, a digest, a service block with at least one title or abstract,
    /// and a URL on every endpoint. Endpoints and parameters may be missing entirely.
    pub fn from_record(record: &'a ServiceRecord) -> Result<Self, ClassificationMiss> {
        let source_url = record.source_url().ok_or_else(|| missing("source_url"))?;
        let digest = record.digest().ok_or_else(|| missing("digest"))?;
        let service = record
            .service()
            .ok_or_else(|| missing("service_description.service"))?;
        let titles = text_values(service.title.as_ref());
        let abstracts = text_values(service.abstract_.as_ref());
        if titles.is_empty() && abstracts.is_empty() {
            return Err(missing("service_description.service.title"));
        }
        let endpoints = service
            .endpoints
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, endpoint)| -> Result<Endpoint<'a>, ClassificationMiss> {
                let url = present(endpoint.url.as_deref()).ok_or_else(|| {
                    missing(&format!("service_description.service.endpoints[{i}].url"))
                })?;
                Ok(Endpoint {
                    url,
                    protocol: present(endpoint.protocol.as_deref()),
                    mime_types: text_values(endpoint.mime_types.as_ref()),
                    name: present(endpoint.name.as_deref()),
                    parameters: endpoint
                        .parameters
                        .iter()
                        .flatten()
                        .map(|parameter| Parameter {
                            name: present(parameter.name.as_deref()),
                            kind: present(parameter.kind.as_deref()),
                            formats: present(parameter.formats.as_deref()),
                        })
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            source_url,
            digest,
            version: record.version(),
            titles,
            abstracts,
            subtype: record.subtype(),
            endpoints,
        })
    }
}

fn text_values(values: Option<&TextValues>) -> Vec<&str> {
    values.map(|v| v.values().collect()).unwrap_or_default()
}

fn missing(field: &str) -> ClassificationMiss {
    ClassificationMiss::MissingField(field.to_owned())
}
