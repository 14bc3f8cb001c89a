use std::path::PathBuf;
use std::time::Duration;
use svcrdf_mapping::TripleMapper;

/// The default timeout of the requests sent to a SPARQL endpoint.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Holds the configuration of a batch conversion.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// The mapper applied to every document.
    pub mapper: TripleMapper,
    /// A directory containing documents, or a single document.
    pub path: PathBuf,
    /// The number of worker threads. Defaults to the number of CPUs.
    pub workers: Option<usize>,
}

impl BatchConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            mapper: TripleMapper::default(),
            path: path.into(),
            workers: None,
        }
    }
}
