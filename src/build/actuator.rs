//! Actuator capability set and a virtual actuator that records every step

use std::fmt;
use std::io::Write;

use crate::build::planner::{Action, Coordinate};
use crate::color::ColorCode;
use crate::io::error::Result;

/// Capabilities needed to carry out a build plan
///
/// The virtual actuator records transitions; a hardware driver would
/// implement the same three operations.
pub trait Actuator {
    /// Travel to a coordinate
    ///
    /// # Errors
    ///
    /// Returns an error if the move cannot be carried out
    fn move_to(&mut self, target: Coordinate) -> Result<()>;

    /// Pick a brick from the bin of a color
    ///
    /// # Errors
    ///
    /// Returns an error if the pick cannot be carried out
    fn pick(&mut self, color: &ColorCode) -> Result<()>;

    /// Place the held brick
    ///
    /// # Errors
    ///
    /// Returns an error if the placement cannot be carried out
    fn place(&mut self) -> Result<()>;
}

/// Feed an action sequence to an actuator in order
///
/// # Errors
///
/// Stops at and returns the first actuator error
pub fn execute<A: Actuator + ?Sized>(actuator: &mut A, actions: &[Action]) -> Result<()> {
    for action in actions {
        match action {
            Action::Move { to } => actuator.move_to(*to)?,
            Action::Pick { color } => actuator.pick(color)?,
            Action::Place => actuator.place()?,
        }
    }
    Ok(())
}

/// Recorded actuator transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActuatorEvent {
    /// Position changed (possibly to the same coordinate)
    Moved {
        /// Position before the move
        from: Coordinate,
        /// Position after the move
        to: Coordinate,
    },
    /// Brick picked from a bin
    Picked {
        /// Bin key
        color: ColorCode,
    },
    /// Brick placed at the current position
    Placed,
}

impl fmt::Display for ActuatorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved { from, to } => write!(f, "➡️ Move {from} → {to}"),
            Self::Picked { color } => write!(f, "🧱 Pick {color}"),
            Self::Placed => f.write_str("📍 Place brick"),
        }
    }
}

/// Position tracker that logs every command instead of driving hardware
///
/// Starts at (0, 0) and lives for a single build.
#[derive(Debug, Default)]
pub struct VirtualActuator {
    position: Coordinate,
    events: Vec<ActuatorEvent>,
}

impl VirtualActuator {
    /// Create an actuator at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    /// Every recorded transition in order
    pub fn events(&self) -> &[ActuatorEvent] {
        &self.events
    }

    /// Number of `move_to` calls received
    pub fn move_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, ActuatorEvent::Moved { .. }))
            .count()
    }

    /// Write the recorded transitions, one per line
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails
    pub fn write_log<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        for event in &self.events {
            writeln!(writer, "{event}")?;
        }
        Ok(())
    }

    fn record(&mut self, event: ActuatorEvent) {
        log::debug!("{event}");
        self.events.push(event);
    }
}

impl Actuator for VirtualActuator {
    fn move_to(&mut self, target: Coordinate) -> Result<()> {
        self.record(ActuatorEvent::Moved {
            from: self.position,
            to: target,
        });
        self.position = target;
        Ok(())
    }

    fn pick(&mut self, color: &ColorCode) -> Result<()> {
        self.record(ActuatorEvent::Picked {
            color: color.clone(),
        });
        Ok(())
    }

    fn place(&mut self) -> Result<()> {
        self.record(ActuatorEvent::Placed);
        Ok(())
    }
}
