//! Lightweight in-process metrics (dependency-free).
//!
//! Counters are stored as atomics behind `DashMap` label keys and rendered
//! by the `/metrics` handler; no metrics crate is pulled in for this.

pub mod metrics;
