//! Shared test helpers for `covera-core` integration tests.
//!
//! An in-memory store implements every persistence port so service tests can
//! focus on behaviour instead of storage.

#![allow(dead_code)]

pub mod fixtures;
pub mod memory;

pub use fixtures::*;
