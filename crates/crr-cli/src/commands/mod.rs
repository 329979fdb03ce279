//! Command implementations.

pub mod interactive;
pub mod price;
pub mod report;
