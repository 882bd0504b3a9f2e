//! Summary statistics over quantized grids

/// Per-color brick counts
pub mod statistics;
