//! Input/output operations, configuration, and error handling

/// Bit-depth asset generation
pub mod assets;
/// Command-line parsing and per-file orchestration
pub mod cli;
/// Runtime defaults and palette configuration files
pub mod configuration;
/// Error type shared by the whole crate
pub mod error;
/// Emoji preview and pixel map literal export
pub mod export;
/// Image loading and PNG preview rendering
pub mod image;
/// Progress display for batch conversions
pub mod progress;
