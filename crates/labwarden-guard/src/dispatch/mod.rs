//! Dispatcher module exports.
//!
//! Re-exports the dispatcher and command trait so downstream consumers can
//! depend on this module directly.

pub mod dispatcher;

pub use dispatcher::{Command, CommandCtx, Dispatcher};
