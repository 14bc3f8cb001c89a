//! Names of the RDF serialization formats.

pub use oxrdfio::RdfFormat;

use crate::error::UnknownFormatError;

/// Looks up a format by name (`turtle`, `ntriples`...), file extension (`ttl`, `nt`...) or media
/// type (`text/turtle`...).
pub fn rdf_format_from_name(name: &str) -> Result<RdfFormat, UnknownFormatError> {
    let format = match name.to_ascii_lowercase().as_str() {
        "turtle" => Some(RdfFormat::Turtle),
        "ntriples" | "n-triples" => Some(RdfFormat::NTriples),
        "nquads" | "n-quads" => Some(RdfFormat::NQuads),
        "trig" => Some(RdfFormat::TriG),
        "n3" => Some(RdfFormat::N3),
        "rdfxml" | "rdf/xml" | "xml" => Some(RdfFormat::RdfXml),
        _ => None,
    };
    if let Some(format) = format {
        return Ok(format);
    }
    if let Some(format) = RdfFormat::from_extension(name) {
        return Ok(format);
    }
    if let Some(format) = RdfFormat::from_media_type(name) {
        return Ok(format);
    }
    Err(UnknownFormatError(name.to_owned()))
}
