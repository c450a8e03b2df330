//! Unit tests for the comparison pipeline
//!
//! This module contains unit tests for individual components.
//! Tests are organized by module and functionality.

pub mod diff_tests;
pub mod fingerprint_tests;
