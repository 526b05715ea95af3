use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub state: String,
    pub county: String,
}

impl SearchParams {
    pub fn new(state: &str, county: &str) -> Self {
        SearchParams {
            state: state.trim().into(),
            county: county.trim().into(),
        }
    }
}

/// A candidate feature-server URL for a county's zoning districts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub provider: String,
    pub confidence: f64,
    pub timestamp: String,
    pub validated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved: Option<bool>,
}
