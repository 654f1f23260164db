//! `pawpal` terminal front end.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod command;
pub mod config;
pub mod render;
pub mod session;
pub mod terminal;
