//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// One page of a paginated listing, as returned by `/courses` and `/users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The items of this page
    #[serde(default = "Vec::new")]
    pub docs: Vec<T>,

    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Total number of pages
    #[serde(default = "default_page")]
    pub total_pages: u32,

    /// Total number of items across all pages
    #[serde(default)]
    pub total_docs: u64,

    /// Whether there's a next page
    #[serde(default)]
    pub has_next_page: bool,

    /// Whether there's a previous page
    #[serde(default)]
    pub has_prev_page: bool,
}

impl<T> Page<T> {
    /// Split the page into its items and pagination metadata
    pub fn into_parts(self) -> (Vec<T>, PaginationState) {
        let state = PaginationState {
            page: self.page,
            total_pages: self.total_pages,
            total_docs: self.total_docs,
            has_next_page: self.has_next_page,
            has_prev_page: self.has_prev_page,
        };
        (self.docs, state)
    }

    /// Check if the page is empty
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Pagination metadata kept alongside a listing in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub page: u32,
    pub total_pages: u32,
    pub total_docs: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            total_pages: DEFAULT_PAGE,
            total_docs: 0,
            has_next_page: false,
            has_prev_page: false,
        }
    }
}

/// Ordered query string parameters that skip absent values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter unconditionally
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a parameter only when a value is present
    pub fn with_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Add a free-text parameter only when it is not blank
    pub fn with_search(self, key: &str, value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self
        } else {
            self.with(key, trimmed)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

// Constants
pub const DEFAULT_PAGE: u32 = 1;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_backend_shape() {
        let json = r#"{
            "docs": [1, 2, 3],
            "page": 2,
            "totalPages": 4,
            "totalDocs": 31,
            "hasNextPage": true,
            "hasPrevPage": true,
            "limit": 10
        }"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        let (docs, state) = page.into_parts();
        assert_eq!(docs, vec![1, 2, 3]);
        assert_eq!(state.page, 2);
        assert_eq!(state.total_docs, 31);
        assert!(state.has_next_page);
    }

    #[test]
    fn test_page_defaults_missing_fields() {
        let page: Page<u32> = serde_json::from_str(r#"{"docs": []}"#).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.page, 1);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_query_params_skip_absent_values() {
        let params = QueryParams::new()
            .with("page", 1)
            .with_opt("status", None::<&str>)
            .with_opt("role", Some("ADMIN"))
            .with_search("search", "   ");

        assert_eq!(params.pairs().len(), 2);
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("role"), Some("ADMIN"));
        assert_eq!(params.get("search"), None);
    }
}
