//! # crr-core
//!
//! Core types and error definitions shared by every crate in the workspace.
//!
//! This crate provides the foundational building blocks – numeric type
//! aliases, the error hierarchy with its `ensure!` / `fail!` macros, and
//! small utilities for parsing and formatting model parameters.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Parsing and formatting utilities.
pub mod utilities;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for step counts and node indices.
pub type Size = usize;

/// A per-period rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A price or value.
pub type Price = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
