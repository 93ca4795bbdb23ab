//! Test helpers module
//!
//! This module provides utilities for testing HackHub services against a
//! real PostgreSQL database, plus seed functions for common fixtures.

pub mod database_helper;
pub mod test_data;

pub use database_helper::*;
pub use test_data::*;
