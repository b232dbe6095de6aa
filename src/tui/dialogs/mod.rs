//! Dialog overlays

pub mod confirm;
pub mod help;
pub mod welcome;
