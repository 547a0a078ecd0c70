//! Core domain entities.
//!
//! - [`UrlMapping`] - A persisted original URL to short token association
//! - [`NewMapping`] - Input for inserting a mapping

pub mod mapping;

pub use mapping::{NewMapping, UrlMapping};
