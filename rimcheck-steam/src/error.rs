/// Errors that can occur while talking to the Steam Web API.
#[derive(Debug, thiserror::Error)]
pub enum SteamError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Collection {0} not found or not public")]
    CollectionNotFound(String),
}

impl SteamError {
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }
}
