//! Interactive console
//!
//! Reads one command per line, applies it to the active screen and redraws it.
//! Notifications go through the injected notifier, not through the screen output.

use std::io::{BufRead, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::{
    error::{AppError, AppResult},
    forms::{book::DATE_FORMAT, BookForm, CategoryForm, FormErrors, FormModel},
    notify::Notifier,
    routes::Route,
    screens::{BooksScreen, CategoriesScreen, Confirm, Modal},
    services::Services,
};

/// One console input line
#[derive(Debug, Parser)]
#[command(name = "catalog-desk", no_binary_name = true, disable_version_flag = true)]
pub struct ConsoleLine {
    #[command(subcommand)]
    pub command: ConsoleCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConsoleCommand {
    /// Open a screen: /categories or /books
    Go { path: String },
    /// Reload the current list
    List,
    /// Open the create form
    New,
    /// Open the edit form of a record
    Edit { id: i64 },
    /// Set a field of the open form
    Set {
        field: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Submit the open form
    Save,
    /// Close the open form or drop a pending delete
    Cancel,
    /// Delete a record (asks for confirmation)
    Delete { id: i64 },
    /// Confirm a pending category delete
    Confirm,
    /// Search books by term; no term clears the search
    Search {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        term: Vec<String>,
    },
    /// Filter books by category id; no id clears the filter
    Filter { category_id: Option<i64> },
    /// Leave the console
    #[command(alias = "exit")]
    Quit,
}

enum ActiveScreen {
    Categories(CategoriesScreen),
    Books(BooksScreen),
}

/// Blocking yes/no prompt on the console streams
struct Prompter<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Confirm for Prompter<'_, R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if write!(self.output, "{} [y/N] ", message)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

pub struct Console<R, W> {
    services: Services,
    notifier: Arc<dyn Notifier>,
    screen: ActiveScreen,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(services: Services, notifier: Arc<dyn Notifier>, input: R, output: W) -> Self {
        let screen = ActiveScreen::Categories(CategoriesScreen::new(
            services.categories.clone(),
            notifier.clone(),
        ));
        Self {
            services,
            notifier,
            screen,
            input,
            output,
        }
    }

    pub fn route(&self) -> Route {
        match self.screen {
            ActiveScreen::Categories(_) => Route::Categories,
            ActiveScreen::Books(_) => Route::Books,
        }
    }

    /// Replace the active screen with a fresh one and initialize it
    pub async fn navigate(&mut self, path: &str) -> AppResult<Route> {
        let route = Route::resolve(path)
            .ok_or_else(|| AppError::Validation(format!("No screen at '{}'", path)))?;
        tracing::debug!("Navigating to {}", route);

        self.screen = match route {
            Route::Categories => {
                let mut screen =
                    CategoriesScreen::new(self.services.categories.clone(), self.notifier.clone());
                screen.init().await;
                ActiveScreen::Categories(screen)
            }
            Route::Books => {
                let mut screen = BooksScreen::new(
                    self.services.books.clone(),
                    self.services.categories.clone(),
                    self.notifier.clone(),
                );
                screen.init().await;
                ActiveScreen::Books(screen)
            }
        };
        Ok(route)
    }

    /// Command loop; returns on `quit` or end of input
    pub async fn run(&mut self, start: &str) -> AppResult<()> {
        if let Err(e) = self.navigate(start).await {
            writeln!(self.output, "{}", e)?;
            self.navigate("").await?;
        }
        self.render()?;

        loop {
            write!(self.output, "{}> ", self.route())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let words: Vec<&str> = line.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }

            let command = match ConsoleLine::try_parse_from(words) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(true) => self.render()?,
                Ok(false) => break,
                Err(AppError::Validation(message)) => writeln!(self.output, "{}", message)?,
                Err(e) => return Err(e),
            }
        }

        tracing::info!("Console closed");
        Ok(())
    }

    /// Apply one command; `Ok(false)` asks to leave
    pub async fn execute(&mut self, command: ConsoleCommand) -> AppResult<bool> {
        match command {
            ConsoleCommand::Quit => return Ok(false),
            ConsoleCommand::Go { path } => {
                self.navigate(&path).await?;
            }
            command => match &mut self.screen {
                ActiveScreen::Categories(screen) => {
                    execute_on_categories(screen, command).await?;
                }
                ActiveScreen::Books(screen) => {
                    let mut prompter = Prompter {
                        input: &mut self.input,
                        output: &mut self.output,
                    };
                    execute_on_books(screen, command, &mut prompter).await?;
                }
            },
        }
        Ok(true)
    }

    fn render(&mut self) -> AppResult<()> {
        match &self.screen {
            ActiveScreen::Categories(screen) => render_categories(&mut self.output, screen)?,
            ActiveScreen::Books(screen) => render_books(&mut self.output, screen)?,
        }
        self.output.flush()?;
        Ok(())
    }
}

fn joined(words: &[String]) -> String {
    words.join(" ")
}

fn unsupported(route: Route, what: &str) -> AppError {
    AppError::Validation(format!("'{}' is not available on {}", what, route))
}

async fn execute_on_categories(screen: &mut CategoriesScreen, command: ConsoleCommand) -> AppResult<()> {
    match command {
        ConsoleCommand::List => {
            screen.load_categories().await;
        }
        ConsoleCommand::New => screen.open_add_modal(),
        ConsoleCommand::Edit { id } => screen.open_edit_modal(id)?,
        ConsoleCommand::Set { field, value } => screen.set_field(&field, &joined(&value))?,
        ConsoleCommand::Save => {
            screen.save_category().await;
        }
        ConsoleCommand::Cancel if screen.pending_delete().is_some() => screen.cancel_delete(),
        ConsoleCommand::Cancel => screen.close_modal(),
        ConsoleCommand::Delete { id } => screen.confirm_delete(id),
        ConsoleCommand::Confirm => {
            screen.delete_category().await;
        }
        ConsoleCommand::Search { .. } => return Err(unsupported(Route::Categories, "search")),
        ConsoleCommand::Filter { .. } => return Err(unsupported(Route::Categories, "filter")),
        ConsoleCommand::Go { .. } | ConsoleCommand::Quit => {}
    }
    Ok(())
}

async fn execute_on_books(
    screen: &mut BooksScreen,
    command: ConsoleCommand,
    confirm: &mut dyn Confirm,
) -> AppResult<()> {
    match command {
        ConsoleCommand::List => {
            screen.load_books().await;
        }
        ConsoleCommand::New => screen.open_add_modal(),
        ConsoleCommand::Edit { id } => screen.open_edit_modal(id)?,
        ConsoleCommand::Set { field, value } => screen.set_field(&field, &joined(&value))?,
        ConsoleCommand::Save => {
            screen.save_book().await;
        }
        ConsoleCommand::Cancel => screen.close_modal(),
        ConsoleCommand::Delete { id } => {
            screen.confirm_delete(id, confirm).await;
        }
        ConsoleCommand::Confirm => return Err(unsupported(Route::Books, "confirm")),
        ConsoleCommand::Search { term } => {
            screen.set_search(&joined(&term)).await;
        }
        ConsoleCommand::Filter { category_id } => {
            screen.set_category_filter(category_id).await;
        }
        ConsoleCommand::Go { .. } | ConsoleCommand::Quit => {}
    }
    Ok(())
}

fn render_categories<W: Write>(out: &mut W, screen: &CategoriesScreen) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Categories ({})", screen.categories().len())?;
    writeln!(out, "{:>6}  {:<24}  {}", "ID", "NAME", "DESCRIPTION")?;
    for category in screen.categories() {
        writeln!(
            out,
            "{:>6}  {:<24}  {}",
            category.id.map(|id| id.to_string()).unwrap_or_default(),
            category.name,
            category.description.as_deref().unwrap_or("")
        )?;
    }

    if let Some(id) = screen.pending_delete() {
        writeln!(out, "Delete category {}? Type `confirm` or `cancel`.", id)?;
    }

    let form = &screen.form().values;
    render_form(
        out,
        screen.modal(),
        "Category",
        &[form.name.clone(), form.description.clone()],
        CategoryForm::FIELDS,
        &screen.visible_errors(),
    )
}

fn render_books<W: Write>(out: &mut W, screen: &BooksScreen) -> std::io::Result<()> {
    writeln!(out)?;
    write!(out, "Books ({})", screen.books().len())?;
    if !screen.search_term().is_empty() {
        write!(out, "  search: \"{}\"", screen.search_term())?;
    }
    if let Some(category_id) = screen.selected_category_id() {
        write!(out, "  category: {}", screen.category_name(category_id))?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "{:>6}  {:<24}  {:<20}  {:<14}  {:<10}  {}",
        "ID", "NAME", "AUTHOR", "ISBN", "PUBLISHED", "CATEGORY"
    )?;
    for book in screen.books() {
        writeln!(
            out,
            "{:>6}  {:<24}  {:<20}  {:<14}  {:<10}  {}",
            book.id.map(|id| id.to_string()).unwrap_or_default(),
            book.book_name,
            book.author,
            book.isbn,
            book.published_date.format(DATE_FORMAT),
            screen.category_name(book.category_id)
        )?;
    }

    let form: &BookForm = &screen.form().values;
    render_form(
        out,
        screen.modal(),
        "Book",
        &[
            form.book_name.clone(),
            form.author.clone(),
            form.isbn.clone(),
            form.published_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            form.category_id
                .map(|id| format!("{} ({})", id, screen.category_name(id)))
                .unwrap_or_default(),
        ],
        BookForm::FIELDS,
        &screen.visible_errors(),
    )
}

fn render_form<W: Write>(
    out: &mut W,
    modal: Modal,
    title: &str,
    values: &[String],
    fields: &[&str],
    errors: &FormErrors,
) -> std::io::Result<()> {
    match modal {
        Modal::Closed => return Ok(()),
        Modal::Creating => writeln!(out, "-- New {} --", title)?,
        Modal::Editing(id) => writeln!(out, "-- Edit {} {} --", title, id)?,
    }

    for (field, value) in fields.iter().zip(values) {
        write!(out, "  {:<16} {}", field, value)?;
        for error in errors.get(field) {
            write!(out, "  ! {} {}", field, error)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "Use `set <field> <value>`, then `save` or `cancel`.")
}
