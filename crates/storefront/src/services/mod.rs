//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Seller registration, login and password resets
//! - `description` - "Magic Write" product descriptions
//! - `email` - Password reset mail
//! - `help_bot` - Canned seller help
//! - `media` - Uploaded image storage
//! - `whatsapp` - `wa.me` order and share links

pub mod auth;
pub mod description;
pub mod email;
pub mod help_bot;
pub mod media;
pub mod whatsapp;

pub use auth::{AuthError, AuthService, RegisterSeller};
pub use description::{DescriptionError, DescriptionService};
pub use email::{EmailError, EmailService};
pub use media::{MediaError, MediaKind, MediaStore, Upload};
