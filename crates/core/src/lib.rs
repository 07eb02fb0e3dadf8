//! Dynamic Pricing Core - Shared types library.
//!
//! This crate provides common types used across all dashboard components:
//! - `dashboard` - The web application (auth, pricing views, chat assistant)
//! - `cli` - Command-line tools for schema setup, users and exports
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, usernames and chat roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
