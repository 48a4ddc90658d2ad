//! HTTP API over three MongoDB document collections: generic named records,
//! registered accounts, and blog posts.
//!
//! The binary entry point lives in `main.rs`; the library root exists so
//! integration tests can build the router against an in-memory store.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
