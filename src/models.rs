use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentInfo {
    pub id: String,
    pub title: String,
    pub cover: String,
    pub genre: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    pub title: String,
    pub description: String,
    pub cover: String,
    pub genre: String,
    pub total_episodes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentMediaItem {
    pub id: String,
    pub index: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetailsPage {
    pub id: String,
    pub details: ContentDetails,
    pub media_items: Vec<ContentMediaItem>,
}

/// Directly playable location of a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamResult {
    pub media_url: String,
}
