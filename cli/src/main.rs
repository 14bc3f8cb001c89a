#![allow(clippy::print_stderr)]
use crate::cli::Args;
use anyhow::{bail, Context};
use clap::{CommandFactory, Parser};
use std::fs::{File, OpenOptions};
use std::io::{self, stdout, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use svcrdf::batch::{BatchDriver, BatchSummary, CancellationFlag, DocumentReport, DocumentStatus};
use svcrdf::config::BatchConfig;
use svcrdf::io::rdf_format_from_name;
use svcrdf::mapping::{FingerprintRegistry, MapperConfig, TripleMapper};
use svcrdf::model::OntologyNamespaces;
use svcrdf::sparql::SparqlEndpoint;
use svcrdf::store::GraphStore;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    if !args.path.is_dir() && !args.path.is_file() {
        eprintln!("{}", Args::command().render_help());
        bail!("{} is neither a file nor a directory", args.path.display())
    }
    let format = rdf_format_from_name(&args.format)?;
    let registry = if let Some(file) = &args.fingerprints {
        let reader = BufReader::new(
            File::open(file)
                .with_context(|| format!("Could not open the fingerprints {}", file.display()))?,
        );
        FingerprintRegistry::from_json_reader(reader)
            .with_context(|| format!("Invalid fingerprints in {}", file.display()))?
    } else {
        FingerprintRegistry::builtin().clone()
    };
    let namespaces = Arc::new(OntologyNamespaces::builtin().clone());
    let mapper = TripleMapper::new(
        Arc::clone(&namespaces),
        Arc::new(registry),
        mapper_config(&args),
    );
    let config = BatchConfig {
        mapper,
        path: args.path,
        workers: args.workers,
    };

    let cancellation = CancellationFlag::new();
    tokio::spawn({
        let cancellation = cancellation.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, finishing the documents in progress");
                cancellation.cancel();
            }
        }
    });
    let driver = BatchDriver::new(config).with_cancellation(cancellation);
    let reports = tokio::task::spawn_blocking(move || driver.run()).await??;
    let summary = BatchSummary::from_reports(&reports);

    if let Some(url) = args.sparql {
        let endpoint = SparqlEndpoint::new(&url, Duration::from_secs(args.timeout))?;
        let failures = send_to_endpoint(&endpoint, reports).await;
        tracing::info!(store_failures = failures, "{summary}");
    } else {
        let mut store = GraphStore::new();
        store.bind_namespaces(&namespaces)?;
        for report in reports {
            if let DocumentStatus::Mapped(document) = report.status {
                store.extend(document.triples);
            }
        }
        if let Some(output) = &args.output {
            let file = File::create(output)
                .with_context(|| format!("Could not create {}", output.display()))?;
            close_file_writer(store.serialize_to_writer(format, BufWriter::new(file))?)?;
        } else {
            store.serialize_to_writer(format, stdout().lock())?.flush()?;
        }
        tracing::info!(triples = store.len(), "{summary}");
    }
    Ok(())
}

/// The identifier policies asked for on the command line.
///
/// Documents sent to a SPARQL endpoint replace their previous version, which requires reproducible
/// identifiers.
fn mapper_config(args: &Args) -> MapperConfig {
    let config = MapperConfig {
        endpoint_ids: args.endpoint_ids.into(),
        parameter_ids: args.parameter_ids.into(),
    };
    if args.sparql.is_none() || config.is_reproducible() {
        return config;
    }
    tracing::warn!(
        requested = ?config,
        "Using URL endpoint identifiers and positional parameter identifiers with --sparql"
    );
    MapperConfig::reproducible()
}

/// Replaces the description of every mapped document in the store behind `endpoint`.
///
/// Returns the number of documents the endpoint did not accept.
async fn send_to_endpoint(endpoint: &SparqlEndpoint, reports: Vec<DocumentReport>) -> usize {
    let mut failures = 0;
    for report in reports {
        let DocumentStatus::Mapped(document) = report.status else {
            continue;
        };
        let mut store = GraphStore::new();
        store.extend(document.triples);
        if let Err(error) = store
            .replace(endpoint, document.identifier.as_ref())
            .await
        {
            tracing::error!(
                path = %report.path.display(),
                endpoint = endpoint.url(),
                error = %error,
                "Could not update the SPARQL endpoint"
            );
            failures += 1;
        }
    }
    failures
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Could not open the log file {}", path.display()))?;
        subscriber
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        subscriber.with_writer(io::stderr).init();
    }
    Ok(())
}

fn close_file_writer(writer: BufWriter<File>) -> io::Result<()> {
    let mut file = writer
        .into_inner()
        .map_err(io::IntoInnerError::into_error)?;
    file.flush()?;
    file.sync_all()
}
