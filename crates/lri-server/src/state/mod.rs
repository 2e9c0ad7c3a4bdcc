//! Shared, read-only application state.

pub mod store;

pub use store::AppState;
