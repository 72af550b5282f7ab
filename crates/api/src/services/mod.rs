//! Business logic services.
//!
//! Services sit between the route handlers and the repositories: they own
//! validation and derivation, and translate repository errors into
//! domain-shaped ones.

pub mod auth;
pub mod profile;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use profile::{NameRule, ProfileError, ProfileUpdate, ValidatedProfile};
pub use token::{TokenError, TokenService};
