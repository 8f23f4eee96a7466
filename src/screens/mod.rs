//! List/detail screens
//!
//! A screen owns its loaded collection, its form and its modal state for as long
//! as it is displayed. Every backend call is awaited in place, so a screen never
//! has two operations of its own in flight.

pub mod books;
pub mod categories;

use crate::{
    error::AppError,
    forms::FormErrors,
    notify::{Notification, Notifier},
};

pub use books::BooksScreen;
pub use categories::CategoriesScreen;

/// Modal dialog state. An open dialog always knows what it is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Creating,
    Editing(i64),
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }

    pub fn editing_id(&self) -> Option<i64> {
        match self {
            Modal::Editing(id) => Some(*id),
            _ => None,
        }
    }
}

/// Result of a save attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome<T> {
    /// Stored by the backend; the list was reloaded and the modal closed
    Saved(T),
    /// Blocked locally, no request sent
    Invalid(FormErrors),
    /// Backend call failed; the modal stays open
    Failed,
    /// No modal open
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined, or nothing was awaiting confirmation
    Cancelled,
    Failed,
}

/// Blocking yes/no question put to the user
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

pub(crate) const CONNECTION_ERROR: &str = "Connection Error";
pub(crate) const CONNECTION_ERROR_DETAIL: &str = "Cannot connect to backend.";
pub(crate) const SAVE_FAILED: &str = "Save Failed";
pub(crate) const DELETE_FAILED: &str = "Delete Failed";

pub(crate) fn report_load_failure(notifier: &dyn Notifier, what: &str, err: &AppError) {
    tracing::error!("Failed to load {}: {}", what, err);
    notifier.notify(Notification::error(CONNECTION_ERROR, CONNECTION_ERROR_DETAIL));
}

pub(crate) fn report_failure(notifier: &dyn Notifier, summary: &str, err: &AppError) {
    tracing::error!("{}: {}", summary, err);
    notifier.notify(Notification::error(summary, err.user_message()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_states() {
        assert!(!Modal::Closed.is_open());
        assert!(Modal::Creating.is_open());
        assert_eq!(Modal::Creating.editing_id(), None);
        assert_eq!(Modal::Editing(4).editing_id(), Some(4));
        assert_eq!(Modal::default(), Modal::Closed);
    }

    #[test]
    fn test_closure_confirm() {
        let mut asked = Vec::new();
        let mut answer = |message: &str| {
            asked.push(message.to_string());
            false
        };
        assert!(!answer.confirm("Sure?"));
        assert_eq!(asked, vec!["Sure?".to_string()]);
    }
}
