//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod comparables;
pub mod dcf;
pub mod report;
pub mod sector;
pub mod sensitivity;
pub mod trends;
pub mod validate;
