//! Core types and helpers shared by the `kabar` content platform crates.
//!
//! The content store exposes schemaless JSON documents; this crate provides
//! the aliases, extension traits and model primitives the other crates build
//! on: the [`Error`](error::Error) type, [`Map`] documents, the
//! [`Query`](model::Query)/[`Mutation`](model::Mutation) containers and the
//! text helpers for slugs and reading time.

#![allow(async_fn_in_trait)]

pub mod error;
pub mod extension;
pub mod helper;
pub mod model;
pub mod validation;

#[doc(no_inline)]
pub use serde_json::json;

/// A JSON value.
pub type JsonValue = serde_json::Value;

/// A JSON key-value type: the raw representation of a content document.
pub type Map = serde_json::Map<String, JsonValue>;

/// An allocation-optimized string.
pub type SharedString = std::borrow::Cow<'static, str>;
