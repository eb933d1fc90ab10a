//! ffbatch - Batch media transcoding over a directory tree
//!
//! This library crate exposes the planning and execution engine for
//! integration testing.

pub mod config;
pub mod discovery;
pub mod encoder;
pub mod error;
pub mod executor;
pub mod output_policy;
pub mod plan;
pub mod probe;
pub mod summary;
