//! Landscape implementations organized by category
//!
//! - `unimodal`: single basin functions (plate, bowl and valley shaped)
//! - `multimodal`: functions with many local minima

pub mod multimodal;
pub mod unimodal;

// Re-export all functions for easy access
pub use multimodal::*;
pub use unimodal::*;
