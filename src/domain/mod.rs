//! Domain types for tfcompat
//! Defines the source line buffer, the API surface model and the error types.

pub mod error;
pub mod source;
pub mod surface;

pub use error::*;
pub use source::*;
pub use surface::*;
