//! Bandeco library
//!
//! Resolves a day and a restaurant into a week's menu, served from the local cache
//! when possible. Exposed as a library for use in integration tests.

pub mod cache;
pub mod cli;
pub mod data;
pub mod date;
pub mod display;
pub mod service;
pub mod week;
