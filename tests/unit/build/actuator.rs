//! Tests for the virtual actuator and plan execution

#[cfg(test)]
mod tests {
    use brickmap::PixelMapError;
    use brickmap::build::{
        Action, Actuator, ActuatorEvent, Coordinate, VirtualActuator, execute,
    };
    use brickmap::color::ColorCode;

    // Tests the actuator starts at the origin with no history
    // Verified by starting at the first bin
    #[test]
    fn test_initial_state() {
        let actuator = VirtualActuator::new();

        assert_eq!(actuator.position(), Coordinate::new(0, 0));
        assert!(actuator.events().is_empty());
        assert_eq!(actuator.move_count(), 0);
    }

    // Tests position tracks the latest move target
    // Verified by updating position before recording the transition
    #[test]
    fn test_position_follows_moves() {
        let mut actuator = VirtualActuator::new();
        let targets = [
            Coordinate::new(-2, 0),
            Coordinate::new(5, 3),
            Coordinate::new(5, 3),
            Coordinate::new(-7, -1),
        ];

        let mut previous = Coordinate::new(0, 0);
        for (n, target) in targets.into_iter().enumerate() {
            actuator.move_to(target).unwrap();
            assert_eq!(actuator.position(), target);
            assert_eq!(
                actuator.events().get(n),
                Some(&ActuatorEvent::Moved {
                    from: previous,
                    to: target
                })
            );
            previous = target;
        }

        // Moving to the current position still counts as a transition
        assert_eq!(actuator.move_count(), 4);
    }

    // Tests pick and place record without moving
    // Verified by resetting position on place
    #[test]
    fn test_pick_and_place_keep_position() {
        let mut actuator = VirtualActuator::new();
        actuator.move_to(Coordinate::new(2, 2)).unwrap();
        actuator.pick(&ColorCode::from('R')).unwrap();
        actuator.place().unwrap();

        assert_eq!(actuator.position(), Coordinate::new(2, 2));
        assert_eq!(
            actuator.events().get(1),
            Some(&ActuatorEvent::Picked {
                color: ColorCode::from('R')
            })
        );
        assert_eq!(actuator.events().get(2), Some(&ActuatorEvent::Placed));
    }

    // Tests execute forwards every action in order
    // Verified by skipping Place actions
    #[test]
    fn test_execute_log_output() {
        let actions = vec![
            Action::Move {
                to: Coordinate::new(-2, 0),
            },
            Action::Pick {
                color: ColorCode::from('R'),
            },
            Action::Move {
                to: Coordinate::new(0, 0),
            },
            Action::Place,
        ];
        let mut actuator = VirtualActuator::new();
        execute(&mut actuator, &actions).unwrap();

        let mut log = Vec::new();
        actuator.write_log(&mut log).unwrap();

        assert_eq!(
            String::from_utf8(log).unwrap(),
            "➡️ Move (0,0) → (-2,0)\n🧱 Pick R\n➡️ Move (-2,0) → (0,0)\n📍 Place brick\n"
        );
    }

    struct FailingArm {
        moves: usize,
    }

    impl Actuator for FailingArm {
        fn move_to(&mut self, _target: Coordinate) -> brickmap::Result<()> {
            self.moves += 1;
            if self.moves > 1 {
                return Err(PixelMapError::InvalidParameter {
                    parameter: "target",
                    value: String::new(),
                    reason: "arm jammed".to_string(),
                });
            }
            Ok(())
        }

        fn pick(&mut self, _color: &ColorCode) -> brickmap::Result<()> {
            Ok(())
        }

        fn place(&mut self) -> brickmap::Result<()> {
            Ok(())
        }
    }

    // Tests execute stops at the first actuator error
    // Verified by ignoring actuator results
    #[test]
    fn test_execute_stops_on_error() {
        let actions = vec![
            Action::Move {
                to: Coordinate::new(1, 0),
            },
            Action::Move {
                to: Coordinate::new(2, 0),
            },
            Action::Move {
                to: Coordinate::new(3, 0),
            },
        ];
        let mut arm = FailingArm { moves: 0 };

        assert!(execute(&mut arm, &actions).is_err());
        assert_eq!(arm.moves, 2);
    }
}
