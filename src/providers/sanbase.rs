use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::core::cache::Cache;
use crate::core::navigation::Preloader;
use crate::core::project::ProjectRow;
use crate::core::source::ProjectSource;

const PROJECT_FIELDS: &str = "
    name
    ticker
    coinmarketcapId
    priceUsd
    percentChange24h
    volumeUsd
    volumeChange24h
    marketcapUsd
    ethSpent
    averageDevActivity
    averageDailyActiveAddresses
    signals {
      description
    }
";

fn all_projects_query() -> String {
    format!("query allErc20Projects {{\n  allErc20Projects {{{PROJECT_FIELDS}  }}\n}}")
}

fn project_by_slug_query() -> String {
    format!(
        "query projectBySlug($slug: String!) {{\n  projectBySlug(slug: $slug) {{{PROJECT_FIELDS}  }}\n}}"
    )
}

#[derive(Deserialize, Debug)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize, Debug)]
struct GraphqlError {
    message: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AllProjectsData {
    all_erc20_projects: Option<Vec<ProjectRow>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ProjectBySlugData {
    project_by_slug: Option<ProjectRow>,
}

/// SANbase GraphQL API client
#[derive(Clone)]
pub struct SanbaseProvider {
    base_url: String,
    client: reqwest::Client,
    cache: Arc<Cache<String, ProjectRow>>,
}

impl SanbaseProvider {
    pub fn new(base_url: &str, cache: Arc<Cache<String, ProjectRow>>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sanbase/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(SanbaseProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            cache,
        })
    }

    async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}/graphql", self.base_url);
        debug!("Posting GraphQL query to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} URL: {}", response.status(), url));
        }

        let text = response.text().await?;
        let body: GraphqlResponse<T> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse GraphQL response: {}", e))?;

        // Partial data alongside errors still counts as a failure.
        if !body.errors.is_empty() {
            let messages: Vec<&str> = body.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(anyhow!("GraphQL error: {}", messages.join("; ")));
        }

        body.data
            .ok_or_else(|| anyhow!("GraphQL response without data"))
    }
}

#[async_trait]
impl ProjectSource for SanbaseProvider {
    #[instrument(name = "SanbaseProjectsFetch", skip(self))]
    async fn fetch_projects(&self) -> Result<Vec<ProjectRow>> {
        let data: AllProjectsData = self
            .query(&all_projects_query(), serde_json::Value::Null)
            .await?;
        let projects = data.all_erc20_projects.unwrap_or_default();
        debug!(count = projects.len(), "Received projects");
        Ok(projects)
    }

    #[instrument(name = "SanbaseProjectFetch", skip(self), fields(slug = %slug))]
    async fn fetch_project(&self, slug: &str) -> Result<Option<ProjectRow>> {
        if let Some(cached) = self.cache.get(&slug.to_string()).await {
            return Ok(Some(cached));
        }

        let data: ProjectBySlugData = self
            .query(&project_by_slug_query(), json!({ "slug": slug }))
            .await?;

        if let Some(project) = &data.project_by_slug {
            self.cache.put(slug.to_string(), project.clone()).await;
        }
        Ok(data.project_by_slug)
    }
}

impl Preloader for SanbaseProvider {
    fn preload(&self, slug: &str) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!(slug, "No runtime available, skipping preload");
            return;
        };
        let provider = self.clone();
        let slug = slug.to_string();
        handle.spawn(async move {
            match provider.fetch_project(&slug).await {
                Ok(_) => debug!(%slug, "Preloaded project"),
                Err(e) => debug!(%slug, error = %e, "Preload failed"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PROJECTS_RESPONSE: &str = r#"{
        "data": {
            "allErc20Projects": [
                {
                    "name": "Santiment",
                    "ticker": "SAN",
                    "coinmarketcapId": "santiment",
                    "priceUsd": "1.25",
                    "percentChange24h": "-2.1",
                    "volumeUsd": "1520000",
                    "volumeChange24h": null,
                    "marketcapUsd": "78300000",
                    "ethSpent": 1520.5,
                    "averageDevActivity": 17.3,
                    "averageDailyActiveAddresses": null,
                    "signals": []
                },
                {
                    "name": "Aragon",
                    "ticker": "ANT",
                    "coinmarketcapId": "aragon",
                    "priceUsd": null,
                    "marketcapUsd": null,
                    "ethSpent": 0,
                    "signals": [{"description": "Project wallet moved funds"}]
                }
            ]
        }
    }"#;

    fn cache() -> Arc<Cache<String, ProjectRow>> {
        Arc::new(Cache::new(Duration::minutes(5)))
    }

    async fn create_mock_server(operation: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains(operation))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_fetch_projects() {
        let mock_server = create_mock_server("allErc20Projects", 200, PROJECTS_RESPONSE).await;
        let provider = SanbaseProvider::new(&mock_server.uri(), cache()).unwrap();

        let projects = provider.fetch_projects().await.unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Santiment");
        assert_eq!(projects[0].price_usd, Some(1.25));
        assert_eq!(projects[0].marketcap_usd, Some(78_300_000.0));
        assert!(projects[0].signals.is_empty());
        assert!(projects[1].price_usd.is_none());
        assert_eq!(projects[1].signals.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_projects_http_error() {
        let mock_server = create_mock_server("allErc20Projects", 502, "Bad Gateway").await;
        let provider = SanbaseProvider::new(&mock_server.uri(), cache()).unwrap();

        let err = provider.fetch_projects().await.unwrap_err();
        assert!(err.to_string().contains("HTTP error: 502"), "{err}");
    }

    #[tokio::test]
    async fn test_fetch_projects_graphql_errors() {
        let body = r#"{
            "data": {"allErc20Projects": []},
            "errors": [{"message": "timeout"}, {"message": "try later"}]
        }"#;
        let mock_server = create_mock_server("allErc20Projects", 200, body).await;
        let provider = SanbaseProvider::new(&mock_server.uri(), cache()).unwrap();

        let err = provider.fetch_projects().await.unwrap_err();
        assert_eq!(err.to_string(), "GraphQL error: timeout; try later");
    }

    #[tokio::test]
    async fn test_fetch_projects_malformed_body() {
        let mock_server = create_mock_server("allErc20Projects", 200, "<html>").await;
        let provider = SanbaseProvider::new(&mock_server.uri(), cache()).unwrap();

        let err = provider.fetch_projects().await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse GraphQL response"));
    }

    #[tokio::test]
    async fn test_fetch_project_is_cached() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("projectBySlug"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"data": {"projectBySlug": {"name": "Santiment", "ticker": "SAN", "coinmarketcapId": "santiment"}}}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;
        let provider = SanbaseProvider::new(&mock_server.uri(), cache()).unwrap();

        let first = provider.fetch_project("santiment").await.unwrap();
        let second = provider.fetch_project("santiment").await.unwrap();
        assert_eq!(first.as_ref().map(|p| p.name.as_str()), Some("Santiment"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fetch_unknown_project() {
        let mock_server = create_mock_server(
            "projectBySlug",
            200,
            r#"{"data": {"projectBySlug": null}}"#,
        )
        .await;
        let provider = SanbaseProvider::new(&mock_server.uri(), cache()).unwrap();

        assert!(provider.fetch_project("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_preload_warms_cache() {
        let mock_server = create_mock_server(
            "projectBySlug",
            200,
            r#"{"data": {"projectBySlug": {"name": "Aragon", "ticker": "ANT", "coinmarketcapId": "aragon"}}}"#,
        )
        .await;
        let cache = cache();
        let provider = SanbaseProvider::new(&mock_server.uri(), Arc::clone(&cache)).unwrap();

        provider.preload("aragon");

        for _ in 0..50 {
            if !cache.is_empty().await {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        assert_eq!(
            cache.get(&"aragon".to_string()).await.map(|p| p.ticker),
            Some("ANT".to_string())
        );
    }

    #[test]
    fn test_preload_without_runtime_is_a_no_op() {
        let provider = SanbaseProvider::new("http://127.0.0.1:9", cache()).unwrap();
        provider.preload("santiment");
    }
}
