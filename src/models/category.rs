//! Category model

use serde::{Deserialize, Serialize};

/// A named grouping that books reference by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Assigned by the backend, absent until persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unsaved_category_omits_id() {
        let category = Category::new("Fiction", Some("Fiction books".to_string()));
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value, json!({ "name": "Fiction", "description": "Fiction books" }));
    }

    #[test]
    fn test_decode_without_description() {
        let category: Category = serde_json::from_value(json!({ "id": 3, "name": "Poetry" })).unwrap();
        assert_eq!(category.id, Some(3));
        assert_eq!(category.description, None);
    }
}
