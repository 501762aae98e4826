//! Use-case orchestration over the repositories.
//!
//! # Responsibility
//! - Build read models for reporting.
//! - Run the sample-data seeding sequence.

pub mod report_service;
pub mod seed_service;
