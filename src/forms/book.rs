//! Book form

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::Book,
};

use super::{FieldError, FormErrors, FormModel};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Book name is required"))]
    pub book_name: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    #[validate(required(message = "Published date is required"))]
    pub published_date: Option<NaiveDate>,
    #[validate(required(message = "Category is required"))]
    pub category_id: Option<i64>,
}

impl FormModel for BookForm {
    const FIELDS: &'static [&'static str] =
        &["book_name", "author", "isbn", "published_date", "category_id"];
}

impl BookForm {
    /// Set a field from user input. An empty value clears the date and category.
    pub fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        match field {
            "book_name" => self.book_name = value.to_string(),
            "author" => self.author = value.to_string(),
            "isbn" => self.isbn = value.to_string(),
            "published_date" if value.is_empty() => self.published_date = None,
            "published_date" => {
                let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
                    AppError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", value))
                })?;
                self.published_date = Some(date);
            }
            "category_id" if value.is_empty() => self.category_id = None,
            "category_id" => {
                let id = value.parse::<i64>().map_err(|_| {
                    AppError::Validation(format!("Invalid category id '{}'", value))
                })?;
                self.category_id = Some(id);
            }
            other => return Err(AppError::Validation(format!("Unknown book field '{}'", other))),
        }
        Ok(())
    }

    /// All errors, including ISBN uniqueness against `existing` minus the record under edit
    pub fn errors(&self, existing: &[Book], editing: Option<i64>) -> FormErrors {
        let mut errors = self.required_errors();
        if !isbn_is_unique(&self.isbn, existing, editing) {
            errors.add("isbn", FieldError::Duplicate);
        }
        errors
    }

    /// Full request body built from every field of the form
    pub fn to_payload(&self) -> AppResult<Book> {
        let (Some(published_date), Some(category_id)) = (self.published_date, self.category_id)
        else {
            return Err(AppError::Validation("Book form is incomplete".to_string()));
        };

        Ok(Book {
            id: None,
            book_name: self.book_name.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            published_date,
            category_id,
        })
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            book_name: book.book_name.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            published_date: Some(book.published_date),
            category_id: Some(book.category_id),
        }
    }
}

/// Exact ISBN check against the loaded books, skipping `editing`
pub fn isbn_is_unique(candidate: &str, books: &[Book], editing: Option<i64>) -> bool {
    if candidate.is_empty() {
        return true;
    }
    !books.iter().any(|b| b.id != editing && b.isbn == candidate)
}
