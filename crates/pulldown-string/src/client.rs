//! STRING-db REST API client.
//! Used for turning a gene list into a link to its interaction network.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

use crate::error::{LookupError, Result};

pub const STRING_API_URL: &str = "https://version-11-5.string-db.org/api";

const OUTPUT_FORMAT: &str = "tsv-no-header";
const METHOD: &str = "get_link";

/// NCBI taxon id for Drosophila melanogaster.
const DEFAULT_SPECIES: u32 = 7227;

/// Fixed request parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StringDbSettings {
    pub api_url: String,
    pub species: u32,
    pub network_flavor: String,
    pub caller_identity: String,
    pub timeout: Duration,
}

impl Default for StringDbSettings {
    fn default() -> Self {
        Self {
            api_url: STRING_API_URL.to_string(),
            species: DEFAULT_SPECIES,
            network_flavor: "confidence".to_string(),
            caller_identity: "explodata".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Something that can turn a gene list into a network URL.
#[async_trait]
pub trait InteractionNetwork: Send + Sync {
    async fn network_link(&self, genes: &[String]) -> Result<String>;
}

pub struct StringDbClient {
    client: Client,
    settings: StringDbSettings,
}

impl StringDbClient {
    pub fn new(settings: StringDbSettings) -> Result<Self> {
        let client = ClientBuilder::new().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    /// `{api}/tsv-no-header/get_link`
    pub fn request_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.settings.api_url.trim_end_matches('/'),
            OUTPUT_FORMAT,
            METHOD
        )
    }

    /// Form fields for one request. Genes are newline-separated.
    pub fn form(&self, genes: &[String]) -> Vec<(&'static str, String)> {
        vec![
            ("identifiers", genes.join("\n")),
            ("species", self.settings.species.to_string()),
            ("network_flavor", self.settings.network_flavor.clone()),
            ("caller_identity", self.settings.caller_identity.clone()),
        ]
    }
}

#[async_trait]
impl InteractionNetwork for StringDbClient {
    async fn network_link(&self, genes: &[String]) -> Result<String> {
        let url = self.request_url();
        debug!("POST {} with {} genes", url, genes.len());

        let resp = self.client.post(&url).form(&self.form(genes)).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        let link = body.trim();
        if link.is_empty() {
            return Err(LookupError::EmptyResponse);
        }
        Ok(link.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_url() {
        let client = StringDbClient::new(StringDbSettings::default()).unwrap();
        assert_eq!(
            client.request_url(),
            "https://version-11-5.string-db.org/api/tsv-no-header/get_link"
        );

        let client = StringDbClient::new(StringDbSettings {
            api_url: "http://localhost:8080/api/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.request_url(), "http://localhost:8080/api/tsv-no-header/get_link");
    }

    #[test]
    fn test_form_fields() {
        let client = StringDbClient::new(StringDbSettings::default()).unwrap();
        let form = client.form(&["piwi".to_string(), "aub".to_string()]);
        assert_eq!(
            form,
            vec![
                ("identifiers", "piwi\naub".to_string()),
                ("species", "7227".to_string()),
                ("network_flavor", "confidence".to_string()),
                ("caller_identity", "explodata".to_string()),
            ]
        );
    }
}
