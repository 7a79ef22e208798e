//! Top-level facade crate for labwarden.
//!
//! Re-exports core types and the guard library so users can depend on a single crate.

pub mod core {
    pub use labwarden_core::*;
}

pub mod guard {
    pub use labwarden_guard::*;
}
