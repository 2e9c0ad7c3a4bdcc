//! Shared library surface for the LRI server and its tests.

pub mod api;
pub mod config;
pub mod state;
