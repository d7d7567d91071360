use serde::{Deserialize, Serialize};

/// Field of a book record a query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    /// Title search. The service expects the literal wire value
    /// `"book"` for this case, not `"title"`.
    #[default]
    #[serde(rename = "book")]
    Title,
    Author,
    Genre,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Recommend,
    About,
    Research,
}
