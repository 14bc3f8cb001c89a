//! The fixed vocabulary used to describe web services, their endpoints and their parameters.
//!
//! The constants mirror the layout of [`oxrdf::vocab`]: one module per ontology, one
//! [`NamedNodeRef`](oxrdf::NamedNodeRef) per class or property.

pub use oxrdf::vocab::{rdf, rdfs, xsd};

/// The BCube web service ontology.
pub mod wso {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://purl.org/nsidc/bcube/web-services#";

    /// The URL a service or an endpoint is reachable at.
    pub const BASE_URL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/nsidc/bcube/web-services#BaseURL");
    /// The transport protocol of an endpoint.
    pub const PROTOCOL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/nsidc/bcube/web-services#Protocol");
    /// Links an endpoint to the service it belongs to.
    pub const HAS_SERVICE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/nsidc/bcube/web-services#hasService");
    /// Links an endpoint to a non-service parent resource.
    pub const CHILD_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/nsidc/bcube/web-services#childOf");
    /// Links an endpoint to one of its parameters.
    pub const HAS_PARAMETERS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/nsidc/bcube/web-services#hasParameters");
    pub const PARAMETER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/nsidc/bcube/web-services#Parameter");
    pub const PARAMETER_TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/nsidc/bcube/web-services#ParameterType");
    pub const PARAMETER_FORMAT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/nsidc/bcube/web-services#ParameterFormat");
}

/// The [DCMI Metadata Terms](https://www.dublincore.org/specifications/dublin-core/dcmi-terms/).
pub mod dcterms {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://purl.org/dc/terms/";

    pub const TITLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/title");
    pub const ABSTRACT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/abstract");
    pub const HAS_VERSION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/hasVersion");
    pub const FORMAT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/format");
}

/// The [OWL-S 1.2](http://www.daml.org/services/owl-s/1.2/) service ontology.
pub mod service {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.daml.org/services/owl-s/1.2/Service.owl#";

    pub const SERVICE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.daml.org/services/owl-s/1.2/Service.owl#Service");
}

/// The OWL-S 1.2 profile ontology.
pub mod profile {
    pub const NAMESPACE: &str = "http://www.daml.org/services/owl-s/1.2/Profile.owl#";
}

/// The OWL-S 1.2 service parameter ontology.
pub mod service_parameter {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.daml.org/services/owl-s/1.2/ServiceParameter.owl#";

    pub const SERVICE_PARAMETER_NAME: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://www.daml.org/services/owl-s/1.2/ServiceParameter.owl#serviceParameterName",
    );
}

/// The [IANA media types](https://www.iana.org/assignments/media-types/) registry.
///
/// A media type `text/html` is identified by `NAMESPACE` followed by `text/html`.
pub mod media {
    pub const NAMESPACE: &str = "http://www.iana.org/assignments/media-types/";
}
