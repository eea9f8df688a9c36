use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Book catalog API base URL
    #[serde(default = "default_catalog_api_url")]
    pub catalog_api_url: String,

    /// Optional catalog API key, appended to every request when set
    #[serde(default)]
    pub catalog_api_key: Option<String>,

    /// Path of the JSON document used by the file-backed store
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

fn default_catalog_api_url() -> String {
    "https://www.googleapis.com/books/v1".to_string()
}

fn default_store_path() -> String {
    "bookstack.json".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
