//! Authentication gate (`access`) and ownership gate (`ownership`).
//!
//! `access` must wrap every route `ownership` wraps: the ownership gate reads
//! the `AuthCtx` the access gate attached.

pub mod access;
pub mod ownership;
