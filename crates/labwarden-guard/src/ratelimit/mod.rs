//! Rate limiting (fixed trailing windows, escalating blocks).
//!
//! Admission verdicts are plain values: an exceeded window or a blocked
//! caller is a normal outcome for the dispatcher to render, never an error.

pub mod classify;
pub mod engine;

pub use classify::{default_classifier, ActionClassifier, CLASS_ADMIN, CLASS_AUTH, CLASS_DEFAULT};
pub use engine::{RateLimiter, Verdict};
