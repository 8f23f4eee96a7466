//! Category management screen

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    forms::{CategoryForm, FormErrors, FormState},
    models::Category,
    notify::{Notification, Notifier},
    services::CategoryApi,
};

use super::{report_failure, report_load_failure, DeleteOutcome, Modal, SaveOutcome, DELETE_FAILED, SAVE_FAILED};

pub struct CategoriesScreen {
    service: Arc<dyn CategoryApi>,
    notifier: Arc<dyn Notifier>,
    categories: Vec<Category>,
    modal: Modal,
    form: FormState<CategoryForm>,
    pending_delete: Option<i64>,
}

impl CategoriesScreen {
    pub fn new(service: Arc<dyn CategoryApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            categories: Vec::new(),
            modal: Modal::Closed,
            form: FormState::default(),
            pending_delete: None,
        }
    }

    /// Prepare an empty form and load the list
    pub async fn init(&mut self) {
        self.form.reset();
        self.load_categories().await;
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn form(&self) -> &FormState<CategoryForm> {
        &self.form
    }

    /// Category awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    /// Replace the list with the backend's. On failure the previous list stays.
    pub async fn load_categories(&mut self) -> bool {
        match self.service.list().await {
            Ok(categories) => {
                tracing::debug!("Loaded {} categories", categories.len());
                self.categories = categories;
                true
            }
            Err(e) => {
                report_load_failure(self.notifier.as_ref(), "categories", &e);
                false
            }
        }
    }

    pub fn open_add_modal(&mut self) {
        self.form.reset();
        self.modal = Modal::Creating;
    }

    pub fn open_edit_modal(&mut self, id: i64) -> AppResult<()> {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == Some(id))
            .ok_or_else(|| AppError::Validation(format!("No category with id {}", id)))?;

        self.form.reset();
        self.form.patch(CategoryForm::from(category));
        self.modal = Modal::Editing(id);
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.form.reset();
    }

    /// Update a form field and mark it touched
    pub fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        if !self.modal.is_open() {
            return Err(AppError::Validation("No category form is open".to_string()));
        }
        self.form.values.set_field(field, value)?;
        self.form.touch(field);
        Ok(())
    }

    /// Current form errors against the loaded list
    pub fn errors(&self) -> FormErrors {
        self.form
            .values
            .errors(&self.categories, self.modal.editing_id())
    }

    pub fn visible_errors(&self) -> FormErrors {
        self.form.visible_errors(&self.errors())
    }

    /// Validate, then create or update depending on the modal state
    pub async fn save_category(&mut self) -> SaveOutcome<Category> {
        if !self.modal.is_open() {
            return SaveOutcome::Closed;
        }

        let errors = self.errors();
        if !errors.is_empty() {
            tracing::debug!("Category form invalid: {}", errors);
            self.form.mark_all_touched();
            return SaveOutcome::Invalid(errors);
        }

        let payload = self.form.values.to_payload();
        let result = match self.modal {
            Modal::Editing(id) => self
                .service
                .update(id, &payload)
                .await
                .map(|saved| (saved, Notification::success("Updated", "Category updated!"))),
            _ => self
                .service
                .create(&payload)
                .await
                .map(|saved| (saved, Notification::success("Created", "Category added!"))),
        };

        match result {
            Ok((saved, notification)) => {
                tracing::info!("Saved category {:?} ({})", saved.id, saved.name);
                self.notifier.notify(notification);
                self.load_categories().await;
                self.close_modal();
                SaveOutcome::Saved(saved)
            }
            Err(e) => {
                report_failure(self.notifier.as_ref(), SAVE_FAILED, &e);
                SaveOutcome::Failed
            }
        }
    }

    /// First step of a delete: remember the target and ask for confirmation
    pub fn confirm_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second step of a delete; does nothing unless a target is awaiting confirmation
    pub async fn delete_category(&mut self) -> DeleteOutcome {
        let Some(id) = self.pending_delete.take() else {
            return DeleteOutcome::Cancelled;
        };

        match self.service.delete(id).await {
            Ok(()) => {
                tracing::info!("Deleted category {}", id);
                self.notifier
                    .notify(Notification::warn("Deleted", "Category deleted."));
                self.load_categories().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                report_failure(self.notifier.as_ref(), DELETE_FAILED, &e);
                DeleteOutcome::Failed
            }
        }
    }
}
