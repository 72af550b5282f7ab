//! Vitala Core - Shared types library.
//!
//! This crate provides common types used across Vitala components:
//! - `api` - HTTP backend for registration, profiles, and health data reads
//!
//! # Architecture
//!
//! The core crate contains only types and pure derivations - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails, BMI
//!   derivation, and status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
