//! Category form

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::Category,
};

use super::{FieldError, FormErrors, FormModel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: String,
}

impl FormModel for CategoryForm {
    const FIELDS: &'static [&'static str] = &["name", "description"];
}

impl CategoryForm {
    /// Set a field from user input
    pub fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        match field {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            other => {
                return Err(AppError::Validation(format!("Unknown category field '{}'", other)))
            }
        }
        Ok(())
    }

    /// All errors, including uniqueness against `existing` minus the record under edit
    pub fn errors(&self, existing: &[Category], editing: Option<i64>) -> FormErrors {
        let mut errors = self.required_errors();
        if !name_is_unique(&self.name, existing, editing) {
            errors.add("name", FieldError::Duplicate);
        }
        errors
    }

    /// Request body for create and update
    pub fn to_payload(&self) -> Category {
        let description = (!self.description.is_empty()).then(|| self.description.clone());
        Category::new(self.name.clone(), description)
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }
}

/// Case-insensitive name check against the loaded categories, skipping `editing`
pub fn name_is_unique(candidate: &str, categories: &[Category], editing: Option<i64>) -> bool {
    if candidate.is_empty() {
        return true;
    }

    let candidate = candidate.to_lowercase();
    !categories
        .iter()
        .any(|c| c.id != editing && c.name.to_lowercase() == candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> Vec<Category> {
        vec![
            Category { id: Some(1), name: "Fiction".to_string(), description: None },
            Category { id: Some(2), name: "History".to_string(), description: None },
        ]
    }

    #[test]
    fn test_duplicate_name_is_case_insensitive() {
        let categories = loaded();
        assert!(!name_is_unique("fiction", &categories, None));
        assert!(!name_is_unique("HISTORY", &categories, Some(1)));
        assert!(name_is_unique("Poetry", &categories, None));
    }

    #[test]
    fn test_record_under_edit_is_excluded() {
        let categories = loaded();
        assert!(name_is_unique("FICTION", &categories, Some(1)));
    }

    #[test]
    fn test_empty_name_reports_required_only() {
        let form = CategoryForm::default();
        let errors = form.errors(&loaded(), None);
        assert_eq!(errors.get("name"), &[FieldError::Required]);
        assert!(errors.get("description").is_empty());
    }

    #[test]
    fn test_payload_drops_empty_description() {
        let mut form = CategoryForm::default();
        form.set_field("name", "Poetry").unwrap();
        assert_eq!(form.to_payload(), Category::new("Poetry", None));

        form.set_field("description", "Verse").unwrap();
        assert_eq!(form.to_payload().description.as_deref(), Some("Verse"));

        assert!(form.set_field("isbn", "123").is_err());
    }
}
