//! Core types and trait definitions for the Kennsla course-registration
//! backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod course;
pub mod error;
pub mod paging;
pub mod person;
pub mod registration;
pub mod service;
pub mod store;

pub use error::{ServiceError, ValidationCode};
