use std::collections::HashMap;

use serde::Deserialize;

use crate::error::SteamError;

/// Per-item result code meaning success in Steam Web API responses.
const RESULT_OK: u32 = 1;

/// Top-level response wrapper from GetCollectionDetails.
#[derive(Debug, Deserialize)]
pub struct CollectionDetailsResponse {
    pub response: CollectionDetailsData,
}

#[derive(Debug, Deserialize, Default)]
pub struct CollectionDetailsData {
    #[serde(default)]
    pub collectiondetails: Vec<CollectionDetails>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionDetails {
    pub publishedfileid: String,
    #[serde(default)]
    pub result: u32,
    #[serde(default)]
    pub children: Vec<CollectionChild>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionChild {
    pub publishedfileid: String,
}

/// Top-level response wrapper from GetPublishedFileDetails.
#[derive(Debug, Deserialize)]
pub struct PublishedFileDetailsResponse {
    pub response: PublishedFileDetailsData,
}

#[derive(Debug, Deserialize, Default)]
pub struct PublishedFileDetailsData {
    #[serde(default)]
    pub publishedfiledetails: Vec<PublishedFileDetails>,
}

#[derive(Debug, Deserialize)]
pub struct PublishedFileDetails {
    pub publishedfileid: String,
    #[serde(default)]
    pub result: u32,
    /// Absent when the item was deleted or is not visible.
    #[serde(default)]
    pub title: Option<String>,
}

/// Extract the ordered child workshop ids of a collection from a
/// GetCollectionDetails response body.
pub fn parse_collection_children(
    body: &str,
    collection_id: &str,
) -> Result<Vec<String>, SteamError> {
    let envelope: CollectionDetailsResponse = serde_json::from_str(body).map_err(|e| {
        SteamError::api(format!(
            "Failed to parse collection details: {e}. Response: {}",
            &body[..body.len().min(200)]
        ))
    })?;

    let details = envelope
        .response
        .collectiondetails
        .into_iter()
        .next()
        .ok_or_else(|| SteamError::CollectionNotFound(collection_id.to_string()))?;

    if details.result != RESULT_OK {
        return Err(SteamError::CollectionNotFound(collection_id.to_string()));
    }

    Ok(details
        .children
        .into_iter()
        .map(|c| c.publishedfileid)
        .collect())
}

/// Extract the workshop-id → title map from a GetPublishedFileDetails
/// response body. Items without a title (deleted, hidden) are omitted;
/// callers substitute a placeholder at render time.
pub fn parse_published_file_titles(body: &str) -> Result<HashMap<String, String>, SteamError> {
    let envelope: PublishedFileDetailsResponse = serde_json::from_str(body).map_err(|e| {
        SteamError::api(format!(
            "Failed to parse file details: {e}. Response: {}",
            &body[..body.len().min(200)]
        ))
    })?;

    Ok(envelope
        .response
        .publishedfiledetails
        .into_iter()
        .filter(|d| d.result == RESULT_OK)
        .filter_map(|d| d.title.map(|t| (d.publishedfileid, t)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_COLLECTION: &str = r#"{
        "response": {
            "result": 1,
            "resultcount": 1,
            "collectiondetails": [
                {
                    "publishedfileid": "123456",
                    "result": 1,
                    "children": [
                        {"publishedfileid": "100", "sortorder": 1, "filetype": 0},
                        {"publishedfileid": "300", "sortorder": 2, "filetype": 0},
                        {"publishedfileid": "200", "sortorder": 3, "filetype": 0}
                    ]
                }
            ]
        }
    }"#;

    const SAMPLE_FILE_DETAILS: &str = r#"{
        "response": {
            "result": 1,
            "resultcount": 3,
            "publishedfiledetails": [
                {"publishedfileid": "100", "result": 1, "title": "Harmony"},
                {"publishedfileid": "200", "result": 1, "title": "HugsLib"},
                {"publishedfileid": "300", "result": 9}
            ]
        }
    }"#;

    #[test]
    fn test_parse_collection_children_ordered() {
        let children = parse_collection_children(SAMPLE_COLLECTION, "123456").unwrap();
        assert_eq!(children, vec!["100", "300", "200"]);
    }

    #[test]
    fn test_parse_collection_not_found() {
        let body = r#"{"response": {"result": 1, "collectiondetails": [
            {"publishedfileid": "999", "result": 9}
        ]}}"#;
        let result = parse_collection_children(body, "999");
        assert!(matches!(result, Err(SteamError::CollectionNotFound(_))));
    }

    #[test]
    fn test_parse_collection_empty_details() {
        let body = r#"{"response": {"result": 1}}"#;
        let result = parse_collection_children(body, "999");
        assert!(matches!(result, Err(SteamError::CollectionNotFound(_))));
    }

    #[test]
    fn test_parse_collection_malformed() {
        let result = parse_collection_children("not json", "1");
        assert!(matches!(result, Err(SteamError::Api(_))));
    }

    #[test]
    fn test_parse_titles() {
        let titles = parse_published_file_titles(SAMPLE_FILE_DETAILS).unwrap();
        assert_eq!(titles.get("100").map(String::as_str), Some("Harmony"));
        assert_eq!(titles.get("200").map(String::as_str), Some("HugsLib"));
        // deleted item (result != 1, no title) is simply absent
        assert!(!titles.contains_key("300"));
    }

    #[test]
    fn test_parse_titles_empty_response() {
        let titles = parse_published_file_titles(r#"{"response": {"result": 1}}"#).unwrap();
        assert!(titles.is_empty());
    }
}
