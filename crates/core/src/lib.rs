//! Sanndikaa Core - Shared domain types.
//!
//! This crate provides the types shared by every Sanndikaa component:
//! - `storefront` - Public shop pages and the seller dashboard
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no database
//! access, no HTTP clients. Database encoding for IDs and prices is available
//! behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, dalasi prices, emails, WhatsApp numbers, shop
//!   slugs and the small enums used by shops, products and orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
