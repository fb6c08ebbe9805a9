//! Ready button presentation
//!
//! Pure derivation of what the ready button shows; scheduling lives in
//! [`crate::tasks`].

pub mod display;
pub mod palette;
pub mod view;

pub use display::{derive, tooltip, ColourCategory, DerivedDisplay};
pub use palette::{ButtonColours, Colour, Palette};
pub use view::ButtonView;
