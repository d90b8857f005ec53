//! Content-store query contract and backends for the `kabar` content platform.
//!
//! The store owns every content document and exposes the query contract the
//! query layer is written against: filtered, sorted, paginated collection
//! reads with bounded relation resolution, single-document lookups, partial
//! updates and singleton globals.
//!
//! Two backends implement the contract: [`MemoryStore`], an in-process
//! backend for tests, seeding and single-process deployments, and
//! [`HttpStore`], a client for a remote headless CMS speaking the same
//! contract over REST. Neither backend retries: store failures propagate
//! unchanged to the caller.

mod filter;
mod http;
mod memory;
mod source;
mod spec;

pub use http::HttpStore;
pub use memory::MemoryStore;
pub use source::{ContentSource, Page};
pub use spec::{CollectionSpec, GlobalSpec, RelationField};
