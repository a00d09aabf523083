//! Application layer (use-cases).
//!
//! Orchestrates domain logic and infrastructure for the command-line tools.

pub mod patch;
