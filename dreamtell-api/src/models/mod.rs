//! Data models for dreamtell-api

pub mod dream;
pub mod status;

pub use dream::{DreamGeneration, DreamRequest, FormatType, GenerationStatus};
pub use status::{StatusCheck, StatusCheckCreate};
