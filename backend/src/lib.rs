//! Agent Studio Backend Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
/// Reply endpoint wire types and the demo reply template
pub mod chat;
pub mod config;
pub mod error;
