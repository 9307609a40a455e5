//! Read-only derivations over entity snapshots: reference resolution,
//! project membership and the per-user review aggregation.
//!
//! Everything here is pure. Callers pass fully materialized collections and
//! get borrowed views back; nothing is cached between calls.

pub mod resolve;
pub mod membership;
pub mod aggregate;

pub use resolve::*;
pub use membership::*;
pub use aggregate::*;
