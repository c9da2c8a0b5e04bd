//! Signcraft server library.
//!
//! This crate provides the storefront API as a library, allowing the
//! router to be exercised directly in tests and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
