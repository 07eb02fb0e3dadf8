//! Dynamic pricing dashboard library.
//!
//! Server-rendered dashboard over a synthetic product catalogue, with
//! username/password accounts in SQLite and a Groq-backed chat assistant.
//! Exposed as a library so the CLI and the integration tests can reuse it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod groq;
pub mod middleware;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod services;
pub mod state;
