/// State management module
///
/// This module holds the book's data model and navigation state:
/// - Page catalog, spread math, and manifests (catalog.rs)
/// - Flip transition state machine (navigator.rs)

pub mod catalog;
pub mod navigator;
