//! Catalog Desk
//!
//! Category and book management against a library REST backend: HTTP services,
//! validated forms, list/detail screens and an interactive console driving them.

pub mod config;
pub mod console;
pub mod error;
pub mod forms;
pub mod models;
pub mod notify;
pub mod routes;
pub mod screens;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
