//! Host-facing entry point of the fingerprint authentication bridge.
//!
//! Re-exports [`fingerprint_auth_core`] so hosts depend on a single crate
//! while the core keeps its own `UniFFI` scaffolding.

pub use fingerprint_auth_core::*;
