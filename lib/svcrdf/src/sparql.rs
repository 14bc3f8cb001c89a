//! Sending triples to a remote store through the [SPARQL 1.1 protocol](https://www.w3.org/TR/sparql11-protocol/).

use crate::error::StoreError;
use reqwest::header::CONTENT_TYPE;
use spargebra::Update;
use std::time::Duration;
use svcrdf_mapping::TripleSet;
use svcrdf_model::{Iri, NamedNodeRef};

const SPARQL_UPDATE_MEDIA_TYPE: &str = "application/sparql-update";

/// A SPARQL update endpoint.
#[derive(Clone, Debug)]
pub struct SparqlEndpoint {
    url: Iri<String>,
    client: reqwest::Client,
}

impl SparqlEndpoint {
    /// Creates an endpoint whose requests fail after `timeout`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let url = Iri::parse(url.to_owned()).map_err(|error| StoreError::InvalidEndpoint {
            url: url.to_owned(),
            error,
        })?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Sends `update` to the endpoint.
    ///
    /// Fails with [`StoreError::Rejected`] if the endpoint does not answer with a success status.
    pub async fn update(&self, update: &Update) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.url.as_str())
            .header(CONTENT_TYPE, SPARQL_UPDATE_MEDIA_TYPE)
            .body(update.to_string())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected { status, body });
        }
        tracing::debug!(endpoint = %self.url, %status, "Update applied");
        Ok(())
    }
}

/// Builds the update inserting `triples`.
///
/// If `replace` is set, the triples having it as subject are deleted first.
pub fn insert_update(
    triples: &TripleSet,
    replace: Option<NamedNodeRef<'_>>,
) -> Result<Update, StoreError> {
    let mut text = String::new();
    if let Some(subject) = replace {
        text.push_str("DELETE WHERE { ");
        text.push_str(&subject.to_string());
        text.push_str(" ?p ?o } ;\n");
    }
    text.push_str("INSERT DATA {\n");
    for triple in triples.iter() {
        text.push_str("  ");
        text.push_str(&triple.to_string());
        text.push_str(" .\n");
    }
    text.push('}');
    Ok(Update::parse(&text, None)?)
}
