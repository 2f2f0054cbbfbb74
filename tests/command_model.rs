//! Property tests for the command model and positional clamping
//!
//! Negation must round-trip for directional commands and be the identity for
//! the rest; no MOVE or GOTO may ever leave the stage box.

use blockstage::interpreter::{
    CommandKind, Param, PassSettings, Program, create_command, interpret, template,
};
use blockstage::runtime::actor::{Bounds, Point, Pose};
use proptest::prelude::*;

fn finite() -> impl Strategy<Value = f64> {
    -1e15f64..1e15f64
}

proptest! {
    #[test]
    fn move_and_turn_negation_round_trips(value in finite()) {
        for kind in [CommandKind::Move, CommandKind::Turn] {
            let command = create_command(kind, &[Param::from(value)]).unwrap();
            let twice = command.negated().negated();
            prop_assert_eq!(twice.params()[0].as_number(), Some(value));
            prop_assert_eq!(twice.instance_id(), command.instance_id());
        }
    }

    #[test]
    fn goto_negation_round_trips(x in finite(), y in finite()) {
        let command = create_command(CommandKind::Goto, &[Param::from(x), Param::from(y)]).unwrap();
        let once = command.negated();
        prop_assert_eq!(once.params()[0].as_number(), Some(-x));
        prop_assert_eq!(once.params()[1].as_number(), Some(-y));
        prop_assert_eq!(once.negated(), command);
    }

    #[test]
    fn move_stays_on_stage(
        steps in prop_oneof![finite(), any::<f64>()],
        heading in -1e6f64..1e6f64,
        x in 30.0f64..=470.0,
        y in 30.0f64..=370.0,
    ) {
        let program: Program = [
            create_command(CommandKind::Move, &[Param::from(steps)]).unwrap(),
            create_command(CommandKind::Move, &[Param::from(steps)]).unwrap(),
        ]
        .into_iter()
        .collect();
        let start = Pose { position: Point::new(x, y), heading };
        let bounds = Bounds::default();
        for step in interpret(&program, start, PassSettings::default()) {
            prop_assert!(bounds.contains(step.patch.position.unwrap()));
        }
    }

    #[test]
    fn goto_stays_on_stage(x in any::<f64>(), y in any::<f64>()) {
        let program: Program = std::iter::once(
            create_command(CommandKind::Goto, &[Param::from(x), Param::from(y)]).unwrap(),
        )
        .collect();
        let start = Pose { position: Point::new(200.0, 200.0), heading: 0.0 };
        let mut pass = interpret(&program, start, PassSettings::default());
        let step = pass.next().unwrap();
        prop_assert!(Bounds::default().contains(step.patch.position.unwrap()));
        prop_assert!(Bounds::default().contains(pass.pose().position));
    }
}

#[test]
fn non_directional_commands_negate_to_themselves() {
    for kind in [CommandKind::Repeat, CommandKind::Say, CommandKind::Think] {
        let command = template(kind).instantiate();
        assert_eq!(command.negated(), command);
    }
}

#[test]
fn textual_numbers_negate_numerically() {
    let command = create_command(CommandKind::Move, &[Param::from(" 12 ")]).unwrap();
    assert_eq!(command.negated().params()[0], Param::Number(-12.0));

    let garbled = create_command(CommandKind::Turn, &[Param::from("left")]).unwrap();
    assert_eq!(garbled.negated(), garbled);
}

#[test]
fn repeat_three_turns_two_hundred_seventy_degrees() {
    let program: Program = std::iter::once(
        create_command(CommandKind::Repeat, &[Param::from(3)]).unwrap(),
    )
    .collect();
    let start = Pose { position: Point::new(100.0, 150.0), heading: 0.0 };
    let mut pass = interpret(&program, start, PassSettings::default());
    let steps: Vec<_> = pass.by_ref().collect();

    assert_eq!(steps.len(), 3);
    let mut previous = 0.0;
    for step in &steps {
        let heading = step.patch.heading.unwrap();
        assert_eq!(heading - previous, 90.0);
        assert_eq!(step.delay, std::time::Duration::from_millis(300));
        previous = heading;
    }
    assert_eq!(pass.pose().heading, 270.0);
}
