//! LRI CLI - score points, build decay grids and inspect scenarios.
//!
//! Everything runs locally against `lri-core` unless a server URL is given,
//! in which case [`client::LriClient`] talks to the HTTP API instead.

pub mod client;
pub mod render;

pub use client::LriClient;
