//! # crr-methods
//!
//! Numerical methods on the recombining binomial lattice: the triangular
//! node container, the Cox-Ross-Rubinstein asset model, and
//! backward-induction pricing with and without early exercise.
//!
//! # Modules
//!
//! * [`lattice`] - lattice storage, asset model, and backward induction

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: node storage, CRR model, backward induction.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{
    european_value, snell_envelope, BinomialModel, BinomialParams, Lattice, SnellEnvelope,
    MAX_STEPS,
};
