//! TF1 compatibility shim.
//!
//! Instead of patching a shared module at import time, [`install`] builds a
//! [`CompatLayer`] over a TF2 API surface and hands it back to the caller.

pub mod gfile;
mod install;
pub mod overlay;

pub use gfile::{GFILE_RENAMES, GFileTranslator, translate};
pub use install::{Binding, CompatLayer, LEGACY_HOOKS, SHIM_LOADED, Verbosity, install};
pub use overlay::Overlay;
