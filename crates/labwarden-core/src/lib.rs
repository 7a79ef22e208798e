//! labwarden core: role model, authorization policy, and error types.
//!
//! This crate defines the admission-control primitives shared by the guard
//! shell and any embedding binary. It intentionally carries no runtime or
//! transport dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `WardenError`/`Result`, and the
//! admission decisions themselves are plain values: an unknown caller or an
//! exceeded limit is a normal outcome, never an error.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod authz;
pub mod error;
pub mod role;

/// Shared result type.
pub use error::{Result, WardenError};
pub use role::Role;
