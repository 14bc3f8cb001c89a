use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::error::Error;
use svcrdf::batch::{discover, BatchDriver, BatchSummary, CancellationFlag, DocumentStatus};
use svcrdf::config::BatchConfig;
use svcrdf::io::RdfFormat;
use svcrdf::mapping::ClassificationMiss;
use svcrdf::store::GraphStore;

const WMS: &str = r#"{
    "url": "http://example.com/wms",
    "digest": "0a1b2c",
    "identity": {"protocol": "OGC:WMS", "version": "1.3.0"},
    "service_description": {"service": {
        "title": "Example WMS",
        "endpoints": [{"url": "http://example.com/wms?service=WMS&request={request}", "protocol": "HTTP"}]
    }}
}"#;

const NASA: &str = include_str!("../../documents/tests/data/opensearch-nasa.xml");

fn corpus() -> Result<TempDir, Box<dyn Error>> {
    let dir = TempDir::new()?;
    dir.child("a.json").write_str(WMS)?;
    dir.child("b.json")
        .write_str(r#"{"url": "http://example.com/feed", "protocol": "RSS"}"#)?;
    dir.child("c.json").write_str("{")?;
    dir.child("d.xml").write_str(NASA)?;
    dir.child("notes.txt").write_str("not a document")?;
    dir.child("nested/e.json").write_str(WMS)?;
    Ok(dir)
}

#[test]
fn discovers_documents_of_the_directory_only() -> Result<(), Box<dyn Error>> {
    let dir = corpus()?;
    let names = discover(dir.path())?
        .into_iter()
        .filter_map(|path| Some(path.file_name()?.to_str()?.to_owned()))
        .collect::<Vec<_>>();
    assert_eq!(names, ["a.json", "b.json", "c.json", "d.xml"]);
    Ok(())
}

#[test]
fn a_single_file_is_a_batch() -> Result<(), Box<dyn Error>> {
    let dir = corpus()?;
    let file = dir.child("a.json");
    assert_eq!(discover(file.path())?, [file.path().to_owned()]);
    Ok(())
}

#[test]
fn failing_documents_do_not_stop_the_batch() -> Result<(), Box<dyn Error>> {
    let dir = corpus()?;
    let mut config = BatchConfig::new(dir.path());
    config.workers = Some(2);
    let reports = BatchDriver::new(config).run()?;

    assert_eq!(reports.len(), 4);
    assert!(matches!(reports[0].status, DocumentStatus::Mapped(_)));
    assert!(matches!(
        &reports[1].status,
        DocumentStatus::Unrecognized(ClassificationMiss::UnknownProtocol(p)) if p == "RSS"
    ));
    assert!(matches!(reports[2].status, DocumentStatus::ParseFailed(_)));
    assert!(matches!(reports[3].status, DocumentStatus::Mapped(_)));

    let summary = BatchSummary::from_reports(&reports);
    assert_eq!(summary.mapped, 2);
    assert_eq!(summary.total(), 4);

    let mut store = GraphStore::new();
    for report in reports {
        if let DocumentStatus::Mapped(document) = report.status {
            store.extend(document.triples);
        }
    }
    let turtle = store.serialize(RdfFormat::Turtle)?;
    assert!(turtle.contains("Example WMS"));
    assert!(turtle.contains("MODAPS"));
    assert!(!turtle.contains("{request}"));
    Ok(())
}

#[test]
fn cancelled_batches_skip_documents() -> Result<(), Box<dyn Error>> {
    let dir = corpus()?;
    let cancellation = CancellationFlag::new();
    cancellation.cancel();
    let reports = BatchDriver::new(BatchConfig::new(dir.path()))
        .with_cancellation(cancellation)
        .run()?;
    assert_eq!(reports.len(), 4);
    assert!(reports
        .iter()
        .all(|report| matches!(report.status, DocumentStatus::Skipped)));
    Ok(())
}
