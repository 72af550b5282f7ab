//! Core types for Vitala.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod bmi;
pub mod email;
pub mod id;
pub mod status;

pub use bmi::{Bmi, BmiCategory, UnknownVariant};
pub use email::{Email, EmailError};
pub use id::*;
pub use status::*;
