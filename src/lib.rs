//! soyo library.
//!
//! This crate prepares a publishable `dist` directory from a built npm-style
//! package: the source `package.json` is filtered through a fixed field
//! rulebook into a clean manifest, and built artifacts plus auxiliary files
//! are arranged into the publish layout. It backs the `soyo` CLI binary and
//! can be driven programmatically for testing.
//!
//! # Modules
//!
//! - [`assemble`] - Publish directory assembly
//! - [`build`] - Build script invocation
//! - [`cli`] - Command-line argument definitions
//! - [`context`] - Invocation-scoped run context
//! - [`error`] - Semantic error types
//! - [`fields`] - The manifest field rulebook
//! - [`fsutil`] - Recursive copy/move/remove primitives
//! - [`manifest`] - Source manifest loading and access
//! - [`output`] - Writer-injected output helpers
//! - [`pipeline`] - Copy pipeline orchestration
//! - [`reconcile`] - Manifest field reconciliation

pub mod assemble;
pub mod build;
pub mod cli;
pub mod context;
pub mod error;
pub mod fields;
pub mod fsutil;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod reconcile;
