//! Book model and list query

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Catalog entry. The category is referenced by id only and resolved for display
/// against the loaded category list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub book_name: String,
    pub author: String,
    pub isbn: String,
    /// Serialized as `YYYY-MM-DD`
    pub published_date: NaiveDate,
    pub category_id: i64,
}

/// Filters for the book list, sent as query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl BookQuery {
    /// Build a query, dropping an empty search term and a non-positive category id
    pub fn new(search: &str, category_id: Option<i64>) -> Self {
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            category_id: category_id.filter(|id| *id > 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_book_wire_format() {
        let book = Book {
            id: Some(7),
            book_name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "9780441013593".to_string(),
            published_date: NaiveDate::from_ymd_opt(1965, 8, 1).unwrap(),
            category_id: 2,
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "bookName": "Dune",
                "author": "Frank Herbert",
                "isbn": "9780441013593",
                "publishedDate": "1965-08-01",
                "categoryId": 2
            })
        );
    }

    #[test]
    fn test_query_skips_empty_filters() {
        assert_eq!(BookQuery::new("", None), BookQuery::default());

        assert_eq!(BookQuery::new("", Some(0)), BookQuery::default());
        assert_eq!(BookQuery::new("", Some(-3)).category_id, None);

        let query = BookQuery::new("dune", Some(4));
        assert_eq!(query.search.as_deref(), Some("dune"));
        assert_eq!(query.category_id, Some(4));
    }
}
