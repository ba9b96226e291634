//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `pullsub` crate.
//!
//! This module centralizes reusable components, such as the error types and the
//! logging setup, so the broker and config modules share one vocabulary.

pub mod error;
pub mod logging;

pub use error::PubSubError;
