use crate::{
    content_digest, EndpointRecord, Identity, ParameterRecord, ParseError, ServiceBlock,
    ServiceRecord, TextValues,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// The namespace of OpenSearch 1.1 description documents.
pub const OPENSEARCH_NAMESPACE: &str = "http://a9.com/-/spec/opensearch/1.1/";

const ROOT_ELEMENT: &str = "OpenSearchDescription";

/// The parts of an OpenSearch description document that describe the service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenSearchDescription {
    root: Option<String>,
    namespaces: Vec<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub description: Option<String>,
    pub urls: Vec<UrlTemplate>,
}

/// A `<Url>` element: one way of querying the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlTemplate {
    /// The URL template, placeholders (`{searchTerms}`) included.
    pub template: String,
    /// The media type of the responses.
    pub mime_type: Option<String>,
    /// The role of the responses (`results`, `self`, ...).
    pub rel: Option<String>,
}

#[derive(Clone, Copy)]
enum TextField {
    ShortName,
    LongName,
    Description,
}

impl TextField {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"ShortName" => Some(Self::ShortName),
            b"LongName" => Some(Self::LongName),
            b"Description" => Some(Self::Description),
            _ => None,
        }
    }
}

impl OpenSearchDescription {
    /// Parses a description document.
    ///
    /// Only XML syntax errors fail. A well-formed document with another root element is returned
    /// as is and reports `false` from [`is_valid`](Self::is_valid).
    pub fn parse(content: &[u8]) -> Result<Self, ParseError> {
        let mut reader = Reader::from_reader(content);
        reader.config_mut().trim_text(true);

        let mut description = Self::default();
        let mut buf = Vec::new();
        let mut depth = 0_usize;
        let mut field = None;
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(element) => {
                    depth += 1;
                    if depth == 1 {
                        description.read_root(&element)?;
                    } else if depth == 2 && description.has_opensearch_root() {
                        field = TextField::from_local_name(element.local_name().as_ref());
                        if element.local_name().as_ref() == b"Url" {
                            description.read_url(&element)?;
                        }
                    }
                }
                Event::Empty(element) => {
                    if depth == 0 {
                        description.read_root(&element)?;
                    } else if depth == 1
                        && description.has_opensearch_root()
                        && element.local_name().as_ref() == b"Url"
                    {
                        description.read_url(&element)?;
                    }
                }
                Event::Text(text) => {
                    if let Some(field) = field {
                        description.append_text(field, &text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let Some(field) = field {
                        let text = data.decode().map_err(quick_xml::Error::from)?;
                        description.append_text(field, &text);
                    }
                }
                Event::End(_) => {
                    if depth == 2 {
                        field = None;
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(description)
    }

    /// Whether the document is an OpenSearch description with at least one URL template.
    pub fn is_valid(&self) -> bool {
        self.has_opensearch_root() && !self.urls.is_empty()
    }

    /// The template of the first `<Url>` element.
    pub fn endpoint(&self) -> Option<&str> {
        self.urls.first().map(|url| url.template.as_str())
    }

    /// The OpenSearch version declared through the root element namespace.
    pub fn version(&self) -> Option<&str> {
        self.namespaces
            .iter()
            .any(|ns| ns == OPENSEARCH_NAMESPACE)
            .then_some("1.1")
    }

    /// Turns the description into a [`ServiceRecord`].
    ///
    /// Documents whose root element is not `OpenSearchDescription` get no protocol.
    pub fn into_record(self, source_url: &str, digest: String) -> ServiceRecord {
        let protocol = self.has_opensearch_root().then(|| "OpenSearch".to_owned());
        let version = self.version().map(str::to_owned);
        let titles = [self.short_name, self.long_name]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        let endpoints = self
            .urls
            .into_iter()
            .map(|url| EndpointRecord {
                parameters: Some(template_parameters(&url.template)),
                url: Some(url.template),
                protocol: Some("HTTP".to_owned()),
                mime_types: url.mime_type.as_deref().map(TextValues::from),
                name: url.rel,
            })
            .collect();
        ServiceRecord {
            source_url: Some(source_url.to_owned()),
            digest: Some(digest),
            identity: Some(Identity {
                protocol,
                version,
                subtype: Some("service".to_owned()),
            }),
            service: Some(ServiceBlock {
                title: (!titles.is_empty()).then(|| TextValues::from(titles)),
                abstract_: self.description.as_deref().map(TextValues::from),
                endpoints: Some(endpoints),
            }),
            ..ServiceRecord::default()
        }
    }

    fn has_opensearch_root(&self) -> bool {
        self.root.as_deref() == Some(ROOT_ELEMENT)
    }

    fn read_root(&mut self, element: &BytesStart<'_>) -> Result<(), ParseError> {
        self.root = Some(String::from_utf8_lossy(element.local_name().as_ref()).into_owned());
        for attribute in element.attributes() {
            let attribute = attribute?;
            let key = attribute.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                self.namespaces.push(attribute.unescape_value()?.into_owned());
            }
        }
        Ok(())
    }

    fn read_url(&mut self, element: &BytesStart<'_>) -> Result<(), ParseError> {
        let mut template = None;
        let mut mime_type = None;
        let mut rel = None;
        for attribute in element.attributes() {
            let attribute = attribute?;
            let value = attribute.unescape_value()?.into_owned();
            match attribute.key.local_name().as_ref() {
                b"template" => template = Some(value),
                b"type" => mime_type = Some(value),
                b"rel" => rel = Some(value),
                _ => {}
            }
        }
        // A <Url> without template cannot be queried.
        if let Some(template) = template {
            self.urls.push(UrlTemplate {
                template,
                mime_type,
                rel,
            });
        }
        Ok(())
    }

    fn append_text(&mut self, field: TextField, text: &str) {
        let target = match field {
            TextField::ShortName => &mut self.short_name,
            TextField::LongName => &mut self.long_name,
            TextField::Description => &mut self.description,
        };
        target.get_or_insert_with(String::new).push_str(text);
    }
}

/// Reads an OpenSearch description document harvested from `source_url`.
pub fn read_opensearch(content: &[u8], source_url: &str) -> Result<ServiceRecord, ParseError> {
    let description = OpenSearchDescription::parse(content)?;
    Ok(description.into_record(source_url, content_digest(content)))
}

/// Extracts one parameter per placeholder of the query string of `template`.
///
/// `products={MODAPSParameters:products}` becomes a parameter named `products` of type
/// `MODAPSParameters:products`. The trailing `?` of optional placeholders is dropped.
fn template_parameters(template: &str) -> Vec<ParameterRecord> {
    let Some((_, query)) = template.split_once('?') else {
        return Vec::new();
    };
    let query = query.split_once('#').map_or(query, |(query, _)| query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter_map(|(name, value)| {
            let placeholder = value.strip_prefix('{')?.strip_suffix('}')?;
            Some(ParameterRecord {
                name: Some(name.to_owned()),
                kind: Some(placeholder.trim_end_matches('?').to_owned()),
                formats: None,
            })
        })
        .collect()
}
