//! Parallel conversion of a directory of documents.
//!
//! Each document is read and mapped on its own, so that a failing document never prevents its
//! siblings from being converted.

use crate::config::BatchConfig;
use crate::error::BatchError;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use svcrdf_documents::{read_path, DocumentKind, ParseError};
use svcrdf_mapping::{ClassificationMiss, MappedDocument, MappingError, MappingOutcome};
use walkdir::WalkDir;

/// Stops a running batch.
///
/// Once cancelled, no new document is read. Documents already being mapped are finished and
/// reported normally.
#[derive(Clone, Debug, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Lists the documents to convert.
///
/// A file is returned as is. For a directory, the `.json` and `.xml` files it directly contains are
/// returned, sorted by name.
pub fn discover(path: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if path.is_file() {
        return Ok(vec![path.to_owned()]);
    }
    if !path.is_dir() {
        return Err(BatchError::InvalidPath(path.to_owned()));
    }
    let mut documents = Vec::new();
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| BatchError::Walk {
            path: path.to_owned(),
            source,
        })?;
        if entry.file_type().is_file() && DocumentKind::from_path(entry.path()).is_some() {
            documents.push(entry.into_path());
        }
    }
    Ok(documents)
}

/// What happened to a document.
#[derive(Debug)]
pub enum DocumentStatus {
    Mapped(MappedDocument),
    Unrecognized(ClassificationMiss),
    ParseFailed(ParseError),
    MappingFailed(MappingError),
    /// The batch was cancelled before the document was read.
    Skipped,
}

#[derive(Debug)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub status: DocumentStatus,
}

impl DocumentReport {
    /// Emits one log event for the document.
    pub fn log(&self) {
        let path = self.path.display();
        match &self.status {
            DocumentStatus::Mapped(document) => tracing::info!(
                path = %path,
                document = %document.identifier,
                triples = document.triples.len(),
                "Mapped document"
            ),
            DocumentStatus::Unrecognized(miss) => {
                tracing::warn!(
                    path = %path,
                    reason = %miss,
                    "Not a recognized service description"
                );
            }
            DocumentStatus::ParseFailed(error) => {
                tracing::warn!(path = %path, error = %error, "Could not parse document");
            }
            DocumentStatus::MappingFailed(error) => {
                tracing::warn!(path = %path, error = %error, "Could not map document");
            }
            DocumentStatus::Skipped => {
                tracing::info!(path = %path, "Skipped document after cancellation");
            }
        }
    }
}

/// Counts the documents of a batch by status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub mapped: usize,
    pub unrecognized: usize,
    pub parse_failed: usize,
    pub mapping_failed: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a DocumentReport>) -> Self {
        let mut summary = Self::default();
        for report in reports {
            let counter = match report.status {
                DocumentStatus::Mapped(_) => &mut summary.mapped,
                DocumentStatus::Unrecognized(_) => &mut summary.unrecognized,
                DocumentStatus::ParseFailed(_) => &mut summary.parse_failed,
                DocumentStatus::MappingFailed(_) => &mut summary.mapping_failed,
                DocumentStatus::Skipped => &mut summary.skipped,
            };
            *counter += 1;
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.mapped + self.unrecognized + self.parse_failed + self.mapping_failed + self.skipped
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents: {} mapped, {} unrecognized, {} unreadable, {} failed, {} skipped",
            self.total(),
            self.mapped,
            self.unrecognized,
            self.parse_failed,
            self.mapping_failed,
            self.skipped
        )
    }
}

/// Maps the documents of a [`BatchConfig`] on a pool of worker threads.
#[derive(Debug)]
pub struct BatchDriver {
    config: BatchConfig,
    cancellation: CancellationFlag,
}

impl BatchDriver {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            cancellation: CancellationFlag::default(),
        }
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Maps every document of the configured path.
    ///
    /// The reports are in the order of [`discover`], whatever the order in which the workers
    /// finish. One log event is emitted per document.
    pub fn run(&self) -> Result<Vec<DocumentReport>, BatchError> {
        let paths = discover(&self.config.path)?;
        tracing::info!(
            path = %self.config.path.display(),
            documents = paths.len(),
            "Starting batch"
        );
        let mut builder = ThreadPoolBuilder::new();
        if let Some(workers) = self.config.workers {
            builder = builder.num_threads(workers);
        }
        let pool = builder.build()?;
        let reports = pool.install(|| {
            paths
                .par_iter()
                .map(|path| self.process(path))
                .collect::<Vec<_>>()
        });
        for report in &reports {
            report.log();
        }
        Ok(reports)
    }

    fn process(&self, path: &Path) -> DocumentReport {
        let status = if self.cancellation.is_cancelled() {
            DocumentStatus::Skipped
        } else {
            match read_path(path) {
                Err(error) => DocumentStatus::ParseFailed(error),
                Ok(record) => match self.config.mapper.map(&record) {
                    Ok(MappingOutcome::Mapped(document)) => DocumentStatus::Mapped(document),
                    Ok(MappingOutcome::Unrecognized(miss)) => DocumentStatus::Unrecognized(miss),
                    Err(error) => DocumentStatus::MappingFailed(error),
                },
            }
        };
        DocumentReport {
            path: path.to_owned(),
            status,
        }
    }
}
