//! Integration test utilities for the gateway bot
//!
//! This crate provides an in-process mock of the REST API and gateway so a
//! real `Bot` can be driven end to end.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
