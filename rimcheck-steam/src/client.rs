use std::collections::HashMap;
use std::time::Duration;

use crate::error::SteamError;
use crate::types::{parse_collection_children, parse_published_file_titles};

const BASE_URL: &str = "https://api.steampowered.com/ISteamRemoteStorage";

/// Blocking HTTP client for the two Steam Remote Storage endpoints the
/// checker needs. Both endpoints are anonymous POSTs with form-encoded
/// bodies; no API key is required for public collections.
pub struct SteamClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl SteamClient {
    pub fn new() -> Result<Self, SteamError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Fetch the ordered member workshop ids of a collection via
    /// GetCollectionDetails. One request, no retry; network errors and
    /// malformed responses propagate.
    pub fn collection_children(&self, collection_id: &str) -> Result<Vec<String>, SteamError> {
        let params = [
            ("collectioncount", "1".to_string()),
            ("publishedfileids[0]", collection_id.to_string()),
        ];

        let url = format!("{}/GetCollectionDetails/v1/", self.base_url);
        let resp = self.http.post(&url).form(&params).send()?;

        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(SteamError::api(format!(
                "HTTP {status} from GetCollectionDetails: {}",
                &text[..text.len().min(200)]
            )));
        }

        let children = parse_collection_children(&text, collection_id)?;
        log::debug!("collection {collection_id} has {} members", children.len());
        Ok(children)
    }

    /// Resolve display titles for a batch of workshop ids via
    /// GetPublishedFileDetails. All ids go into a single request.
    ///
    /// An empty id list is a no-op: no request is made and an empty map is
    /// returned.
    pub fn published_file_titles(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, String>, SteamError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut params = vec![("itemcount".to_string(), ids.len().to_string())];
        for (i, id) in ids.iter().enumerate() {
            params.push((format!("publishedfileids[{i}]"), id.clone()));
        }

        let url = format!("{}/GetPublishedFileDetails/v1/", self.base_url);
        let resp = self.http.post(&url).form(&params).send()?;

        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(SteamError::api(format!(
                "HTTP {status} from GetPublishedFileDetails: {}",
                &text[..text.len().min(200)]
            )));
        }

        parse_published_file_titles(&text)
    }

    #[cfg(test)]
    fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_id_list_makes_no_request() {
        // An unroutable base URL: any attempted request would fail, so a
        // successful empty result proves no request was made.
        let client = SteamClient::with_base_url("http://127.0.0.1:1");
        let titles = client.published_file_titles(&[]).unwrap();
        assert!(titles.is_empty());
    }
}
