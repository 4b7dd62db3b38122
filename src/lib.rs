//! duim - disk usage report with bar graphs
//!
//! Sizes the immediate subdirectories of a target, either through the
//! external `du` utility or an in-process walk, and prints each entry's
//! share of the total as a fixed-width bar.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod usage;

// Re-export commonly used types
pub use config::Config;
pub use error::{DuimError, Result};
