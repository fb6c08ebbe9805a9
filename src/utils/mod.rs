//! Utility functions module
//!
//! This module contains utility functions used throughout the application.

pub mod duration;
pub mod signals;

// Re-export main functions
pub use duration::{format_mm_ss, format_uptime};
pub use signals::{shutdown_signal, until_shutdown};
