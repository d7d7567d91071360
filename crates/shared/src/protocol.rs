use serde::{Deserialize, Serialize};

use crate::domain::SearchType;

/// POST body for `/api/recommendations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub query: String,
    pub search_type: SearchType,
}

/// A single ranked entry. `distance` is the server's dissimilarity
/// score; lower means more similar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub title: String,
    pub distance: f64,
}

/// Success body of `/api/recommendations`. `recommendations` arrives
/// ordered by ascending distance; that ordering is the server's
/// relevance ranking and clients must not reorder it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub input_book: String,
    pub recommendations: Vec<RecommendationItem>,
}
