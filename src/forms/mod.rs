//! Form models and client-side validation
//!
//! Required-field rules are declared with `validator`; cross-record uniqueness
//! rules are plain functions taking the loaded collection and the id under edit.

pub mod book;
pub mod category;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use validator::{Validate, ValidationErrors};

pub use book::{isbn_is_unique, BookForm};
pub use category::{name_is_unique, CategoryForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    /// Value already used by another loaded record
    Duplicate,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => write!(f, "is required"),
            FieldError::Duplicate => write!(f, "already exists"),
        }
    }
}

/// Validation errors keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, Vec<FieldError>>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn add(&mut self, field: &'static str, error: FieldError) {
        let errors = self.0.entry(field).or_default();
        if !errors.contains(&error) {
            errors.push(error);
        }
    }

    pub fn get(&self, field: &str) -> &[FieldError] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str, error: FieldError) -> bool {
        self.get(field).contains(&error)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[FieldError])> + '_ {
        self.0.iter().map(|(field, errors)| (*field, errors.as_slice()))
    }

    /// Every `validator` failure on these forms is a missing required value
    fn from_validation(errors: &ValidationErrors) -> Self {
        let mut result = Self::default();
        for (field, _) in errors.field_errors() {
            result.add(field, FieldError::Required);
        }
        result
    }

    fn retain_fields(&self, touched: &BTreeSet<&'static str>) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(field, _)| touched.contains(*field))
                .map(|(field, errors)| (*field, errors.clone()))
                .collect(),
        )
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, errors) in self.iter() {
            for error in errors {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{} {}", field, error)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A form definition: its field names and its required-field rules
pub trait FormModel: Validate + Default {
    const FIELDS: &'static [&'static str];

    fn required_errors(&self) -> FormErrors {
        match self.validate() {
            Ok(()) => FormErrors::default(),
            Err(errors) => FormErrors::from_validation(&errors),
        }
    }
}

/// Field values plus the set of fields the user has interacted with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState<F> {
    pub values: F,
    touched: BTreeSet<&'static str>,
}

impl<F: FormModel> FormState<F> {
    pub fn new(values: F) -> Self {
        Self {
            values,
            touched: BTreeSet::new(),
        }
    }

    /// Clear values and touched state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replace the values without touching any field
    pub fn patch(&mut self, values: F) {
        self.values = values;
    }

    pub fn touch(&mut self, field: &str) {
        if let Some(known) = F::FIELDS.iter().find(|f| **f == field) {
            self.touched.insert(*known);
        }
    }

    pub fn mark_all_touched(&mut self) {
        self.touched.extend(F::FIELDS.iter().copied());
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Errors the user should see: only those on touched fields
    pub fn visible_errors(&self, errors: &FormErrors) -> FormErrors {
        errors.retain_fields(&self.touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_deduplicate() {
        let mut errors = FormErrors::default();
        errors.add("name", FieldError::Required);
        errors.add("name", FieldError::Required);
        assert_eq!(errors.get("name"), &[FieldError::Required]);
        assert!(errors.get("description").is_empty());
        assert_eq!(errors.to_string(), "name is required");
    }

    #[test]
    fn test_visible_errors_follow_touched_fields() {
        let mut state = FormState::new(CategoryForm::default());
        let errors = state.values.required_errors();
        assert!(errors.has("name", FieldError::Required));
        assert!(state.visible_errors(&errors).is_empty());

        state.touch("name");
        assert!(state.visible_errors(&errors).has("name", FieldError::Required));

        state.reset();
        assert!(!state.is_touched("name"));
    }

    #[test]
    fn test_touch_ignores_unknown_fields() {
        let mut state = FormState::new(CategoryForm::default());
        state.touch("isbn");
        assert!(!state.is_touched("isbn"));

        state.mark_all_touched();
        assert!(state.is_touched("name"));
        assert!(state.is_touched("description"));
    }
}
