//! Statement AST for the streaming SQL dialect.
//!
//! Nothing here parses SQL. The types model the statements the preparation
//! pipeline works on, and their [`Display`](std::fmt::Display) impls produce
//! the canonical statement text that is persisted and replayed.

pub mod ast;
pub mod statement;

pub use statement::ConfiguredStatement;
