//! Test helpers module
//!
//! Drives the router in-process and provides PostgreSQL setup for the
//! database-backed suite.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_app;

pub use database_helper::*;
pub use test_app::*;
