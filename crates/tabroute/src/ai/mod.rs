//! Model inference seam.
//!
//! The pipeline depends on the [`ModelClient`] trait only; production code
//! wires in the HTTP client, tests substitute fakes.

pub mod client;

pub use client::{HttpModelClient, ModelClient, ModelError};
