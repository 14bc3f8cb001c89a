use clap::{Parser, ValueEnum, ValueHint};
use std::path::PathBuf;
use svcrdf::mapping::{EndpointIdPolicy, ParameterIdPolicy};

#[derive(Parser)]
#[command(about, version, name = "svcrdf")]
/// Converts web service descriptions (JSON service records and OpenSearch description documents)
/// to RDF
pub struct Args {
    /// Directory of documents to convert, or a single document
    ///
    /// Only the .json and .xml files directly inside the directory are read.
    #[arg(short, long, value_hint = ValueHint::AnyPath)]
    pub path: PathBuf,
    /// The RDF format to write
    ///
    /// It can be a name like "turtle", an extension like "nt" or a MIME type like
    /// "application/n-triples".
    #[arg(short, long, default_value = "turtle")]
    pub format: String,
    /// SPARQL update endpoint to send the triples of each document to, instead of writing them
    #[arg(long, value_hint = ValueHint::Url)]
    pub sparql: Option<String>,
    /// File to write to
    ///
    /// If no file is given, stdout is written.
    #[arg(short, long, value_hint = ValueHint::FilePath, conflicts_with = "sparql")]
    pub output: Option<PathBuf>,
    /// JSON file replacing the built-in table of known service protocols
    ///
    /// The file contains an array of {"protocol", "object_type", "class"} objects.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub fingerprints: Option<PathBuf>,
    /// How endpoint identifiers are minted
    ///
    /// With --sparql, URL identifiers are always used so that re-ingested documents replace their
    /// previous description.
    #[arg(long, value_enum, default_value_t = EndpointIds::Url)]
    pub endpoint_ids: EndpointIds,
    /// How parameter identifiers are minted
    ///
    /// With --sparql, positional identifiers are always used.
    #[arg(long, value_enum, default_value_t = ParameterIds::Synthetic)]
    pub parameter_ids: ParameterIds,
    /// Timeout of the requests to the SPARQL endpoint, in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,
    /// Number of documents mapped in parallel
    ///
    /// By default one per CPU.
    #[arg(long)]
    pub workers: Option<usize>,
    /// File to append the diagnostics to, instead of stderr
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum EndpointIds {
    /// The endpoint URL, with a counter suffix if it repeats within a document
    Url,
    /// A random urn:uuid: IRI
    Synthetic,
}

impl From<EndpointIds> for EndpointIdPolicy {
    fn from(value: EndpointIds) -> Self {
        match value {
            EndpointIds::Url => Self::UrlKeyed,
            EndpointIds::Synthetic => Self::Synthetic,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ParameterIds {
    /// A random urn:uuid: IRI
    Synthetic,
    /// The position of the parameter in the document, stable across runs
    Positional,
}

impl From<ParameterIds> for ParameterIdPolicy {
    fn from(value: ParameterIds) -> Self {
        match value {
            ParameterIds::Synthetic => Self::Synthetic,
            ParameterIds::Positional => Self::Positional,
        }
    }
}
