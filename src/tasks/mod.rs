//! Background tasks module
//!
//! This module contains the ready button controller and the pieces it is
//! scheduled with.

pub mod coalescer;
pub mod ready_button;
pub mod tick;
pub mod view_logger;

// Re-export main types
pub use coalescer::UpdateCoalescer;
pub use ready_button::{ActiveReadyButton, ReadyButton};
pub use tick::TickScheduler;
pub use view_logger::button_view_logger_task;
