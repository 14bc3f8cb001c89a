use std::error::Error;
use std::sync::Arc;
use svcrdf_documents::{read_json, read_opensearch, ServiceRecord};
use svcrdf_mapping::{
    ClassificationMiss, EndpointIdPolicy, Fingerprint, FingerprintRegistry, MappedDocument,
    MapperConfig, MappingOutcome, ParameterIdPolicy, TripleMapper,
};
use svcrdf_model::vocab::{dcterms, media, rdf, rdfs, service_parameter, wso};
use svcrdf_model::{
    Literal, LiteralRef, NamedNode, NamedNodeRef, OntologyNamespaces, SubjectRef, TermRef,
    TripleRef,
};

const SCENARIO: &str = r#"{
    "protocol": "OpenSearch-ish",
    "url": "http://example.org/search",
    "digest": "abc123",
    "identity": {"version": "1.0"},
    "service_description": {
        "service": {
            "title": ["T"],
            "abstract": ["A"],
            "endpoints": [{
                "url": "http://example.org/ep",
                "protocol": "HTTP",
                "mimeType": ["text/html"],
                "parameters": [{"name": "q", "type": "string", "formats": ""}]
            }]
        }
    }
}"#;

const NASA: &[u8] = include_bytes!("../../documents/tests/data/opensearch-nasa.xml");

fn scenario_mapper() -> TripleMapper {
    let registry = FingerprintRegistry::from_fingerprints([Fingerprint::new(
        "OpenSearch-ish",
        "http://example.org/ObjType",
        "OpenSearch",
    )
    .unwrap()])
    .unwrap();
    TripleMapper::new(
        Arc::new(OntologyNamespaces::builtin().clone()),
        Arc::new(registry),
        MapperConfig::default(),
    )
}

fn expect_mapped(mapper: &TripleMapper, record: &ServiceRecord) -> MappedDocument {
    match mapper.map(record).unwrap() {
        MappingOutcome::Mapped(mapped) => mapped,
        MappingOutcome::Unrecognized(miss) => panic!("unexpected miss: {miss}"),
    }
}

fn with_predicate<'a>(
    mapped: &'a MappedDocument,
    predicate: NamedNodeRef<'a>,
) -> Vec<TripleRef<'a>> {
    mapped
        .triples
        .iter()
        .filter(|t| t.predicate == predicate)
        .collect()
}

fn subjects_of(mapped: &MappedDocument, predicate: NamedNodeRef<'_>) -> Vec<NamedNode> {
    let mut subjects = with_predicate(mapped, predicate)
        .into_iter()
        .filter_map(|t| match t.subject {
            SubjectRef::NamedNode(subject) => Some(subject.into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>();
    subjects.sort_unstable();
    subjects.dedup();
    subjects
}

#[test]
fn end_to_end_scenario() -> Result<(), Box<dyn Error>> {
    let record = read_json(SCENARIO.as_bytes())?;
    let mapped = expect_mapped(&scenario_mapper(), &record);
    let document = mapped.identifier.as_ref();
    assert_eq!(
        document.as_str(),
        "http://purl.org/nsidc/bcube/web-services#abc123"
    );

    let types = mapped.triples.objects(document, rdf::TYPE);
    assert!(types.contains(&NamedNodeRef::new("http://example.org/ObjType")?.into()));
    assert!(types.contains(
        &NamedNodeRef::new("http://purl.org/nsidc/bcube/web-services#OpenSearch")?.into()
    ));
    assert_eq!(
        mapped.triples.objects(document, dcterms::TITLE),
        [TermRef::from(LiteralRef::new_simple_literal("T"))]
    );
    assert_eq!(
        mapped.triples.objects(document, dcterms::ABSTRACT),
        [TermRef::from(LiteralRef::new_simple_literal("A"))]
    );
    assert_eq!(
        mapped.triples.objects(document, dcterms::HAS_VERSION),
        [TermRef::from(LiteralRef::new_simple_literal("1.0"))]
    );
    assert_eq!(mapped.triples.objects(document, wso::BASE_URL).len(), 1);

    let endpoint = NamedNodeRef::new("http://example.org/ep")?;
    assert_eq!(
        mapped.triples.objects(endpoint, wso::PROTOCOL),
        [TermRef::from(LiteralRef::new_simple_literal("HTTP"))]
    );
    let html = NamedNode::new(format!("{}text/html", media::NAMESPACE))?;
    assert_eq!(
        mapped.triples.objects(endpoint, dcterms::FORMAT),
        [TermRef::from(html.as_ref())]
    );
    assert_eq!(
        mapped.triples.objects(endpoint, wso::HAS_SERVICE),
        [TermRef::from(document)]
    );

    let parameters = mapped.triples.objects(endpoint, wso::HAS_PARAMETERS);
    assert_eq!(parameters.len(), 1);
    let TermRef::NamedNode(parameter) = parameters[0] else {
        panic!("parameters are named nodes");
    };
    assert_eq!(
        mapped.triples.objects(parameter, rdf::TYPE),
        [TermRef::from(wso::PARAMETER)]
    );
    assert_eq!(
        mapped
            .triples
            .objects(parameter, service_parameter::SERVICE_PARAMETER_NAME),
        [TermRef::from(LiteralRef::new_simple_literal("q"))]
    );
    assert_eq!(
        mapped.triples.objects(parameter, wso::PARAMETER_TYPE),
        [TermRef::from(LiteralRef::new_simple_literal("string"))]
    );
    assert!(mapped
        .triples
        .objects(parameter, wso::PARAMETER_FORMAT)
        .is_empty());
    assert_eq!(mapped.endpoints, 1);
    assert_eq!(mapped.parameters, 1);
    Ok(())
}

#[test]
fn document_identity_is_idempotent() -> Result<(), Box<dyn Error>> {
    let mapper = scenario_mapper();
    let record = read_json(SCENARIO.as_bytes())?;
    let first = expect_mapped(&mapper, &record);
    let second = expect_mapped(&mapper, &record);
    assert_eq!(first.identifier, second.identifier);
    Ok(())
}

#[test]
fn unknown_protocols_emit_nothing() -> Result<(), Box<dyn Error>> {
    let mapper = TripleMapper::default();
    for protocol in ["OpenSearch-ish", "opensearch", "OGC:WMS 1.3.0", ""] {
        let mut record = read_json(SCENARIO.as_bytes())?;
        record.protocol = Some(protocol.to_owned());
        match mapper.map(&record)? {
            MappingOutcome::Unrecognized(miss) => {
                assert_eq!(miss, ClassificationMiss::UnknownProtocol(protocol.to_owned()));
            }
            MappingOutcome::Mapped(_) => panic!("{protocol} should not be recognized"),
        }
    }
    Ok(())
}

#[test]
fn structural_misses_emit_nothing() -> Result<(), Box<dyn Error>> {
    let record = read_json(
        br#"{"protocol": "OpenSearch-ish", "url": "http://example.org/s", "digest": "d",
            "service_description": {"service": {"title": "", "abstract": null}}}"#,
    )?;
    assert!(matches!(
        scenario_mapper().map(&record)?,
        MappingOutcome::Unrecognized(ClassificationMiss::MissingField(_))
    ));
    Ok(())
}

#[test]
fn absent_parameter_fields_are_skipped() -> Result<(), Box<dyn Error>> {
    let record = read_json(
        br#"{"protocol": "OpenSearch-ish", "url": "http://example.org/s", "digest": "d",
            "service": {"title": "T", "endpoints": [{"url": "http://example.org/ep", "parameters": [
                {"name": "", "type": "null", "formats": null},
                {"name": "bbox", "type": "geo:box", "formats": "text/plain"},
                {}
            ]}]}}"#,
    )?;
    let mapped = expect_mapped(&scenario_mapper(), &record);
    assert_eq!(mapped.parameters, 3);
    assert_eq!(with_predicate(&mapped, rdf::TYPE).len(), 2 + 3);
    for predicate in [
        service_parameter::SERVICE_PARAMETER_NAME,
        wso::PARAMETER_TYPE,
        wso::PARAMETER_FORMAT,
    ] {
        assert_eq!(with_predicate(&mapped, predicate).len(), 1, "{predicate}");
    }
    assert!(mapped.triples.contains(TripleRef::new(
        subjects_of(&mapped, wso::PARAMETER_FORMAT)[0].as_ref(),
        wso::PARAMETER_FORMAT,
        LiteralRef::new_simple_literal("text/plain"),
    )));
    assert!(mapped
        .triples
        .iter()
        .all(|t| !matches!(
            t.object,
            TermRef::Literal(l) if l.value().is_empty() || l.value() == "null"
        )));
    Ok(())
}

#[test]
fn braces_are_always_escaped() -> Result<(), Box<dyn Error>> {
    let record = read_opensearch(NASA, "http://example.org/osdd?id={id}")?;
    let mapped = expect_mapped(&TripleMapper::default(), &record);
    for triple in mapped.triples.iter() {
        let subject = triple.subject.to_string();
        assert!(!subject.contains(['{', '}']), "{subject}");
        if let TermRef::NamedNode(object) = triple.object {
            assert!(!object.as_str().contains(['{', '}']), "{object}");
        }
        if triple.predicate == wso::BASE_URL {
            let TermRef::Literal(url) = triple.object else {
                panic!("base URLs are literals");
            };
            assert!(!url.value().contains(['{', '}']), "{url}");
        }
    }
    assert!(mapped.triples.iter().any(|t| t
        .subject
        .to_string()
        .contains("%7BMODAPSParameters:products%7D")));
    Ok(())
}

#[test]
fn repeated_endpoint_urls_stay_distinct() -> Result<(), Box<dyn Error>> {
    let record = read_json(
        br#"{"protocol": "OpenSearch-ish", "url": "http://example.org/s", "digest": "d",
            "service": {"title": "T", "endpoints": [
                {"url": "http://example.org/ep", "protocol": "HTTP", "mimeType": "text/html", "name": "html"},
                {"url": "http://example.org/ep", "protocol": "FTP", "mimeType": "text/xml", "name": "xml"}
            ]}}"#,
    )?;
    for endpoint_ids in [EndpointIdPolicy::UrlKeyed, EndpointIdPolicy::Synthetic] {
        let mapper = TripleMapper::new(
            Arc::new(OntologyNamespaces::builtin().clone()),
            Arc::new(scenario_mapper().registry().clone()),
            MapperConfig {
                endpoint_ids,
                parameter_ids: ParameterIdPolicy::Synthetic,
            },
        );
        let mapped = expect_mapped(&mapper, &record);
        let endpoints = subjects_of(&mapped, wso::HAS_SERVICE);
        assert_eq!(endpoints.len(), 2, "{endpoint_ids:?}");
        for endpoint in &endpoints {
            assert_eq!(mapped.triples.objects(endpoint, wso::PROTOCOL).len(), 1);
            assert_eq!(mapped.triples.objects(endpoint, dcterms::FORMAT).len(), 1);
            assert_eq!(mapped.triples.objects(endpoint, rdfs::LABEL).len(), 1);
        }
    }
    Ok(())
}

#[test]
fn non_service_endpoints_are_children_without_parameters() -> Result<(), Box<dyn Error>> {
    let record = read_json(
        br#"{"protocol": "OpenSearch-ish", "url": "http://example.org/s", "digest": "d",
            "identity": {"subtype": "dataset"},
            "service": {"title": "T", "endpoints": [
                {"url": "http://example.org/a", "parameters": [{"name": "q"}]},
                {"url": "http://example.org/b"}
            ]}}"#,
    )?;
    let mapped = expect_mapped(&scenario_mapper(), &record);
    assert_eq!(subjects_of(&mapped, wso::CHILD_OF).len(), 2);
    assert!(with_predicate(&mapped, wso::HAS_SERVICE).is_empty());
    assert!(with_predicate(&mapped, wso::HAS_PARAMETERS).is_empty());
    assert!(with_predicate(&mapped, service_parameter::SERVICE_PARAMETER_NAME).is_empty());
    assert_eq!(mapped.parameters, 0);
    Ok(())
}

#[test]
fn service_endpoints_have_one_edge_per_parameter() -> Result<(), Box<dyn Error>> {
    let record = read_opensearch(NASA, "http://example.org/osdd")?;
    let mapped = expect_mapped(&TripleMapper::default(), &record);
    assert_eq!(mapped.endpoints, 2);
    assert_eq!(mapped.parameters, 7);
    assert_eq!(subjects_of(&mapped, wso::HAS_SERVICE).len(), 2);
    assert_eq!(with_predicate(&mapped, wso::HAS_PARAMETERS).len(), 7);
    assert!(mapped.triples.contains(TripleRef::new(
        mapped.identifier.as_ref(),
        dcterms::TITLE,
        LiteralRef::new_simple_literal("MODAPS"),
    )));
    Ok(())
}

#[test]
fn positional_parameter_ids_are_reproducible() -> Result<(), Box<dyn Error>> {
    let record = read_opensearch(NASA, "http://example.org/osdd")?;
    let mapper = TripleMapper::new(
        Arc::new(OntologyNamespaces::builtin().clone()),
        Arc::new(FingerprintRegistry::builtin().clone()),
        MapperConfig {
            endpoint_ids: EndpointIdPolicy::UrlKeyed,
            parameter_ids: ParameterIdPolicy::Positional,
        },
    );
    let first = expect_mapped(&mapper, &record);
    let second = expect_mapped(&mapper, &record);
    assert_eq!(first.triples.len(), second.triples.len());
    for triple in first.triples.iter() {
        assert!(second.triples.contains(triple), "{triple}");
    }
    let literal = Literal::new_simple_literal("bbox");
    assert_eq!(
        subjects_of(&first, service_parameter::SERVICE_PARAMETER_NAME)
            .iter()
            .filter(|p| first.triples.contains(TripleRef::new(
                p.as_ref(),
                service_parameter::SERVICE_PARAMETER_NAME,
                literal.as_ref()
            )))
            .map(|p| p.as_str().to_owned())
            .collect::<Vec<_>>(),
        [format!("{}/endpoint/0/parameter/4", first.identifier.as_str())]
    );
    Ok(())
}

#[test]
fn illegal_url_characters_are_escaped() -> Result<(), Box<dyn Error>> {
    for (url, expected) in [
        (
            "http://example.org/s?bbox[]={geo:box}",
            "http://example.org/s?bbox%5B%5D=%7Bgeo:box%7D",
        ),
        ("http://example.org/s?pct=50%", "http://example.org/s?pct=50%25"),
        ("http://example.org/s#a#b", "http://example.org/s#a%23b"),
        ("http://example.org/s?q=%ZZ", "http://example.org/s?q=%25ZZ"),
    ] {
        let record = read_json(
            format!(
                r#"{{"url": "http://example.org/wms", "digest": "d",
                    "identity": {{"protocol": "OGC:WMS"}},
                    "service": {{"title": "T", "endpoints": [{{"url": "{url}"}}]}}}}"#
            )
            .as_bytes(),
        )?;
        let mapped = expect_mapped(&TripleMapper::default(), &record);
        assert_eq!(
            subjects_of(&mapped, wso::HAS_SERVICE)
                .iter()
                .map(NamedNode::as_str)
                .collect::<Vec<_>>(),
            [expected],
            "{url}"
        );
    }
    Ok(())
}
