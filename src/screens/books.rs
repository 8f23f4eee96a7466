//! Book management screen

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    forms::{BookForm, FormErrors, FormState},
    models::{Book, BookQuery, Category},
    notify::{Notification, Notifier},
    services::{BookApi, CategoryApi},
};

use super::{
    report_failure, report_load_failure, Confirm, DeleteOutcome, Modal, SaveOutcome, DELETE_FAILED,
    SAVE_FAILED,
};

pub const DELETE_PROMPT: &str = "Delete this book? This cannot be undone.";

/// Shown for a book whose category is not in the loaded list
pub const UNKNOWN_CATEGORY: &str = "—";

pub struct BooksScreen {
    books_api: Arc<dyn BookApi>,
    categories_api: Arc<dyn CategoryApi>,
    notifier: Arc<dyn Notifier>,
    books: Vec<Book>,
    categories: Vec<Category>,
    search_term: String,
    selected_category_id: Option<i64>,
    modal: Modal,
    form: FormState<BookForm>,
}

impl BooksScreen {
    pub fn new(
        books_api: Arc<dyn BookApi>,
        categories_api: Arc<dyn CategoryApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            books_api,
            categories_api,
            notifier,
            books: Vec::new(),
            categories: Vec::new(),
            search_term: String::new(),
            selected_category_id: None,
            modal: Modal::Closed,
            form: FormState::default(),
        }
    }

    /// Load reference categories, then the book list
    pub async fn init(&mut self) {
        self.form.reset();
        self.load_categories().await;
        self.load_books().await;
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_category_id(&self) -> Option<i64> {
        self.selected_category_id
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn form(&self) -> &FormState<BookForm> {
        &self.form
    }

    pub async fn load_categories(&mut self) -> bool {
        match self.categories_api.list().await {
            Ok(categories) => {
                self.categories = categories;
                true
            }
            Err(e) => {
                report_load_failure(self.notifier.as_ref(), "categories", &e);
                false
            }
        }
    }

    /// Reload books with the active filters. On failure the previous list stays.
    pub async fn load_books(&mut self) -> bool {
        let query = BookQuery::new(&self.search_term, self.selected_category_id);
        match self.books_api.list(&query).await {
            Ok(books) => {
                tracing::debug!("Loaded {} books", books.len());
                self.books = books;
                true
            }
            Err(e) => {
                report_load_failure(self.notifier.as_ref(), "books", &e);
                false
            }
        }
    }

    pub async fn set_search(&mut self, term: &str) -> bool {
        self.search_term = term.to_string();
        self.load_books().await
    }

    pub async fn set_category_filter(&mut self, category_id: Option<i64>) -> bool {
        self.selected_category_id = category_id;
        self.load_books().await
    }

    /// Display name of a category, resolved against the loaded categories
    pub fn category_name(&self, category_id: i64) -> &str {
        self.categories
            .iter()
            .find(|c| c.id == Some(category_id))
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    pub fn open_add_modal(&mut self) {
        self.form.reset();
        self.modal = Modal::Creating;
    }

    pub fn open_edit_modal(&mut self, id: i64) -> AppResult<()> {
        let book = self
            .books
            .iter()
            .find(|b| b.id == Some(id))
            .ok_or_else(|| AppError::Validation(format!("No book with id {}", id)))?;

        self.form.reset();
        self.form.patch(BookForm::from(book));
        self.modal = Modal::Editing(id);
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.form.reset();
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        if !self.modal.is_open() {
            return Err(AppError::Validation("No book form is open".to_string()));
        }
        self.form.values.set_field(field, value)?;
        self.form.touch(field);
        Ok(())
    }

    pub fn errors(&self) -> FormErrors {
        self.form.values.errors(&self.books, self.modal.editing_id())
    }

    pub fn visible_errors(&self) -> FormErrors {
        self.form.visible_errors(&self.errors())
    }

    /// Validate, then create or update with the full form payload
    pub async fn save_book(&mut self) -> SaveOutcome<Book> {
        if !self.modal.is_open() {
            return SaveOutcome::Closed;
        }

        let errors = self.errors();
        let payload = match self.form.values.to_payload() {
            Ok(payload) if errors.is_empty() => payload,
            _ => {
                tracing::debug!("Book form invalid: {}", errors);
                self.form.mark_all_touched();
                return SaveOutcome::Invalid(errors);
            }
        };

        let result = match self.modal {
            Modal::Editing(id) => self
                .books_api
                .update(id, &payload)
                .await
                .map(|saved| (saved, Notification::success("Updated", "Book updated!"))),
            _ => self
                .books_api
                .create(&payload)
                .await
                .map(|saved| (saved, Notification::success("Created", "Book added!"))),
        };

        match result {
            Ok((saved, notification)) => {
                tracing::info!("Saved book {:?} ({})", saved.id, saved.isbn);
                self.notifier.notify(notification);
                self.load_books().await;
                self.close_modal();
                SaveOutcome::Saved(saved)
            }
            Err(e) => {
                report_failure(self.notifier.as_ref(), SAVE_FAILED, &e);
                SaveOutcome::Failed
            }
        }
    }

    /// Ask `confirm` first; delete and reload only on a yes
    pub async fn confirm_delete(&mut self, id: i64, confirm: &mut dyn Confirm) -> DeleteOutcome {
        if !confirm.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        match self.books_api.delete(id).await {
            Ok(()) => {
                tracing::info!("Deleted book {}", id);
                self.notifier.notify(Notification::warn("Deleted", "Book deleted."));
                self.load_books().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                report_failure(self.notifier.as_ref(), DELETE_FAILED, &e);
                DeleteOutcome::Failed
            }
        }
    }
}
