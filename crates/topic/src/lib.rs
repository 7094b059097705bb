//! Statement-time topic provisioning.
//!
//! [`TopicCreateInjector`] sits in the statement preparation pipeline. For
//! every `CREATE STREAM|TABLE ... AS SELECT` it resolves the sink topic's
//! name, partition count and replica count, pins them in the statement's
//! `WITH` clause and asks the broker to create the topic. Every other
//! statement passes through untouched.

pub mod cleanup;
pub mod error;
pub mod injector;
pub mod naming;
pub mod properties;
pub mod provision;
pub mod rewrite;
pub mod source;

pub use error::TopicInjectionError;
pub use injector::{Injector, TopicCreateInjector};
pub use properties::{Builder, SourceDescriptionSupplier, TopicProperties, TopicPropertiesBuilder};
