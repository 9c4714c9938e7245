//! Shared utilities for varsel.
//!
//! This crate provides the cross-cutting error type used by every other
//! varsel crate, so selection failures raised deep inside a descriptor reach
//! the graph walker with the same shape as configuration or input errors.

pub mod errors;
