//! SQLite persistence.
//!
//! This module provides:
//! - Database initialization and schema application
//! - SQLite pragma configuration
//! - Repository layer for partner, referral, and commission records

pub mod migrations;
pub mod repo;

pub use migrations::init_db;
pub use repo::Repository;
