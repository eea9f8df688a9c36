/// Google Books volumes API provider
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::Book,
    services::providers::CatalogClient,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;

/// Search response envelope; `items` is absent entirely for empty results
#[derive(Debug, Deserialize)]
struct ApiVolumeList {
    #[serde(default)]
    items: Option<Vec<Book>>,
}

#[derive(Clone)]
pub struct GoogleBooksProvider {
    http_client: HttpClient,
    api_url: String,
    api_key: Option<String>,
}

impl GoogleBooksProvider {
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.catalog_api_url.clone(), config.catalog_api_key.clone())
    }

    fn query_params<'a>(&'a self, query: &'a str) -> Vec<(&'a str, &'a str)> {
        let mut params = vec![("q", query)];
        if let Some(key) = &self.api_key {
            params.push(("key", key.as_str()));
        }
        params
    }
}

#[async_trait::async_trait]
impl CatalogClient for GoogleBooksProvider {
    async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        if query.trim().is_empty() {
            return Err(AppError::ExternalApi(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/volumes", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog returned status {}: {}",
                status, body
            )));
        }

        let list: ApiVolumeList = response.json().await?;
        let books = list.items.unwrap_or_default();

        tracing::info!(
            query = %query,
            results = books.len(),
            provider = "google_books",
            "Catalog search completed"
        );

        Ok(books)
    }

    async fn fetch_details(&self, volume_id: &str) -> AppResult<Option<Book>> {
        let url = format!("{}/volumes/{}", self.api_url, volume_id);
        let mut request = self.http_client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog returned status {}: {}",
                status, body
            )));
        }

        let book: Book = response.json().await?;
        if book.volume_info.is_none() {
            tracing::warn!(volume_id = %volume_id, "Volume payload has no descriptive block");
            return Ok(None);
        }

        tracing::info!(
            volume_id = %volume_id,
            provider = "google_books",
            "Volume details fetched"
        );

        Ok(Some(book))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_search_response_maps_to_empty_vec() {
        let list: ApiVolumeList = serde_json::from_str("{}").unwrap();
        assert!(list.items.unwrap_or_default().is_empty());

        let list: ApiVolumeList = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(list.items.unwrap_or_default().is_empty());
    }

    #[test]
    fn test_search_response_parses_volumes() {
        let json = r#"{
            "items": [
                {"id": "v1", "volumeInfo": {"title": "Dune"}},
                {"id": "v2"}
            ]
        }"#;

        let list: ApiVolumeList = serde_json::from_str(json).unwrap();
        let books = list.items.unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, "v1");
        assert!(books[1].volume_info.is_none());
    }

    #[test]
    fn test_query_params_include_key_when_configured() {
        let provider =
            GoogleBooksProvider::new("http://test.local".to_string(), Some("k123".to_string()));
        let params = provider.query_params("dune");
        assert_eq!(params, vec![("q", "dune"), ("key", "k123")]);

        let provider = GoogleBooksProvider::new("http://test.local".to_string(), None);
        assert_eq!(provider.query_params("dune"), vec![("q", "dune")]);
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let provider = GoogleBooksProvider::new("http://test.local".to_string(), None);
        let result = provider.search("   ").await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }
}
