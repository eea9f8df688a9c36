//! Book-tracking core: catalog search, reading lists, and recommendations.
//!
//! A thin orchestration layer over a remote book catalog, a key-value
//! persistence slot, and a rendering surface, all consumed through trait
//! seams. The [`App`] facade is the single entry point for embeddings.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod presentation;
pub mod services;
pub mod session;

pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
