//! Edge resolution: decides which configurations of a target component satisfy
//! a single declared dependency, and derives new edges as resolution proceeds.
//!
//! Published components with variants are matched on attributes; everything
//! else falls back to legacy Maven/Ivy configuration selection.

pub mod descriptor;
pub mod edge;
pub mod ivy;
pub mod matcher;
pub mod maven;
pub mod strategy;
