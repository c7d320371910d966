//! The combinator algebra: [`Maybe`], [`ResultE`]/[`Result`], the
//! unwrapped [`Res`] encoding and the single-assignment [`Future`].
//!
//! Combinators never panic. Failure travels as data through `Err` and
//! `Nothing`. The operations that abort the current operation are:
//!
//! - invalid construction, reported as a `ConstructionError` by the
//!   `try_*` constructors
//! - `unwrap` on `Err` or `Nothing`
//! - [`ResultE::unsafe_cast`] on an `Ok` whose payload is not the target type
//!
//! Each aborting path logs with `tracing::error!` before panicking.

pub mod future;
pub mod maybe;
pub mod res;
pub mod result;

pub use future::{Completer, Future, Settle};
pub use maybe::Maybe;
pub use res::Res;
pub use result::{Result, ResultE, ResultPatterns};
