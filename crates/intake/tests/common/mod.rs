//! Shared test utilities for intake integration tests.
//!
//! This module provides:
//! - `TestHarness` for isolated pipeline runs with a temp scratch dir
//! - `FailingDrive` for injecting remote failures
//! - Submission builders

#![allow(dead_code)]

pub mod harness;

pub use harness::*;
