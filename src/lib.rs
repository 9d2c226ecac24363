//! Weather Advisor: answers natural-language weather questions.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod advisor;
pub mod config;
pub mod data;
pub mod intent;
pub mod llm;
pub mod types;
