//! Blocking JSON client for the CITRIQ review service.

pub mod client;
pub mod endpoints;
pub mod filter;

pub use client::*;
pub use filter::*;
