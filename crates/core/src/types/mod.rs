//! Core types for the dynamic pricing dashboard.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod role;
pub mod username;

pub use id::*;
pub use role::ChatRole;
pub use username::{Username, UsernameError};
