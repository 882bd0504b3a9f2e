//! Spatial data structures shared across the pipeline

/// Rectangular grid storage and row-major traversal
pub mod grid;

pub use grid::Grid;
