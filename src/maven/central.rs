use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::DepsConfig;
use crate::error::AppError;
use crate::maven::pom;

/// Blocking client for the Maven Central search API and repository.
pub struct Central {
    client: Client,
    search_url: String,
    repository_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    response: SearchResponse,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    #[serde(rename = "latestVersion")]
    latest_version: Option<String>,
}

impl Central {
    pub fn new(config: &DepsConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(concat!("devkit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            search_url: config.search_url.clone(),
            repository_url: config.repository_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn latest_version(&self, group: &str, artifact: &str) -> Result<String, AppError> {
        let query = format!("g:{group} AND a:{artifact}");
        debug!("GET {} q={}", self.search_url, query);
        let body = self
            .client
            .get(&self.search_url)
            .query(&[("q", query.as_str()), ("rows", "1"), ("wt", "json")])
            .send()?
            .error_for_status()?
            .text()?;
        parse_latest_version(&body)?
            .ok_or_else(|| AppError::registry(format!("No version found for {group}:{artifact}")))
    }

    pub fn pom_url(&self, group: &str, artifact: &str, version: &str) -> String {
        format!(
            "{}/{}/{artifact}/{version}/{artifact}-{version}.pom",
            self.repository_url,
            group.replace('.', "/")
        )
    }

    /// Version of `dep_group:dep_artifact` declared in the published POM of `group:artifact:version`.
    pub fn declared_dependency_version(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
        dep_group: &str,
        dep_artifact: &str,
    ) -> Result<Option<String>, AppError> {
        let url = self.pom_url(group, artifact, version);
        debug!("GET {url}");
        let body = self.client.get(&url).send()?.error_for_status()?.text()?;
        pom::declared_dependency_version(&body, dep_group, dep_artifact)
    }
}

fn parse_latest_version(body: &str) -> Result<Option<String>, AppError> {
    let payload: SearchPayload = serde_json::from_str(body)?;
    Ok(payload.response.docs.into_iter().next().and_then(|doc| doc.latest_version))
}
