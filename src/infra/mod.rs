//! Infrastructure layer (adapters/implementations).
//!
//! This module contains the IO-heavy pieces: filesystem glob expansion,
//! configuration files and API surface manifests.

pub mod app_config;
pub mod glob;
pub mod manifest;
