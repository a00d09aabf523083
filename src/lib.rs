pub mod application;
pub mod compat;
pub mod domain;
pub mod infra;
