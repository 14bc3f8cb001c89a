use crate::{content_digest, ParseError, ServiceRecord};

/// Reads a JSON service record.
///
/// Records that do not carry a digest get the [`content_digest`] of `content`, so that reading the
/// same file twice always yields the same digest.
pub fn read_json(content: &[u8]) -> Result<ServiceRecord, ParseError> {
    let mut record: ServiceRecord = serde_json::from_slice(content)?;
    if record.digest().is_none() {
        record.digest = Some(content_digest(content));
    }
    Ok(record)
}
