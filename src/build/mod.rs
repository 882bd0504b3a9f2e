//! Build sequence planning and execution against an actuator

/// Actuator capability trait and the logging virtual actuator
pub mod actuator;
/// Deterministic pick-and-place planning over a quantized grid
pub mod planner;

pub use actuator::{Actuator, ActuatorEvent, VirtualActuator, execute};
pub use planner::{Action, BinLayout, BuildPlanner, ColorClassifier, Coordinate, FallbackRule};
