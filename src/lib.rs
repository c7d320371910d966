//! # manyrepo - combinator algebra and manifest-driven repository cloning
//!
//! `manyrepo` clones the repositories listed in a `manyrepo.yml` manifest.
//! Its core is a small algebra for values that may be absent, may have
//! failed, or may not have arrived yet.
//!
//! ## The algebra
//!
//! - [`monad::Maybe`]: a value that is either `Just` or `Nothing`
//! - [`monad::ResultE`] / [`monad::Result`]: success or failure, with the
//!   crate [`Error`] as the fixed failure type of `Result`
//! - [`monad::Res`]: the same semantics over a plain `std::result::Result`,
//!   driven through free functions in [`monad::res`]
//! - [`monad::Future`]: a single-assignment asynchronous `Result`
//!
//! ## Manifest
//!
//! ```yaml
//! repos:
//!   - git: https://github.com/example/frontend.git
//!   - git: git@github.com:example/backend.git
//!     path: services/backend
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: manifest entities
//! - [`application`]: the clone use case
//! - [`infrastructure`]: manifest file access
//! - [`presentation`]: CLI interface
//! - [`common`]: shared error taxonomy
//! - [`monad`]: the combinator algebra
//!
//! ## Examples
//!
//! ```rust
//! use manyrepo::monad::{result, Maybe};
//!
//! let port = Maybe::just("8080")
//!     .ok_or(manyrepo::Error::missing("port"))
//!     .and_then(|p| result::wrap_res(p.parse::<u16>().map_err(|e| {
//!         manyrepo::Error::failure_with_source("invalid port", e)
//!     })));
//! assert_eq!(port, result::ok(8080));
//! ```

// Documentation attributes
#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod monad;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::{Error, Missing};
pub use crate::monad::{Future, Maybe, Res, Result, ResultE};
