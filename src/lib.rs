//! setup-angle - pre-built ANGLE binaries for CI
//!
//! Resolves a requested ANGLE branch to the archive built for the host
//! platform, installs it through a tool cache (downloading from object
//! storage on a miss) and reports where it landed.

pub mod action;
pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod reporter;
pub mod resolver;
pub mod ui;

pub use error::{AngleError, AngleResult};
