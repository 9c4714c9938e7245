//! Core data types for varsel.
//!
//! This crate defines the values that flow through edge resolution: consumer
//! and variant attributes, component selectors and version constraints,
//! component identifiers, configuration and component metadata, artifact names,
//! exclude rules, the attribute compatibility schema, and the resolution
//! configuration file.
//!
//! Everything here is immutable after construction and free of I/O, apart from
//! loading the configuration file.

pub mod artifact;
pub mod attributes;
pub mod component;
pub mod config;
pub mod schema;
pub mod selector;
pub mod version;
