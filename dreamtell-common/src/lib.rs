//! # Dreamtell Common Library
//!
//! Shared code for the dreamtell backend:
//! - Error types
//! - Configuration loading and root folder resolution
//! - Timestamp and UUID utilities

pub mod config;
pub mod error;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
