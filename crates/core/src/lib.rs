//! Signcraft Core - Shared types and pricing library.
//!
//! This crate provides common types used across all Signcraft components:
//! - `server` - JSON API backend for the signage storefront
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, phones, and statuses
//! - [`catalog`] - Size and finish option schemas for configurable products
//! - [`pricing`] - Pure price computation from a customer's selections

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod pricing;
pub mod types;

pub use catalog::*;
pub use types::*;
