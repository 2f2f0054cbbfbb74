//! Integration tests for roster management, selection and program editing

use blockstage::interpreter::{CommandKind, Param, template};
use blockstage::runtime::actor::{Patch, Point, Pose};
use blockstage::runtime::error::{ActorError, ProgramError, StageError};
use blockstage::runtime::state::layout_position;
use blockstage::runtime::ActorId;
use blockstage::{Stage, StageConfig};

fn stage() -> Stage {
    Stage::new(StageConfig::default()).unwrap()
}

#[test]
fn fifth_actor_is_refused() {
    let stage = stage();
    assert_eq!(stage.add_actor(), Some(ActorId(4)));
    assert_eq!(stage.add_actor(), None);
    assert_eq!(stage.actors().len(), 4);

    let panda = stage.actor(ActorId(4)).unwrap();
    assert_eq!(panda.name, "Panda");
    assert_eq!(panda.position, Point::new(200.0, 200.0));
    assert!(panda.program.is_empty());
}

#[test]
fn last_actor_cannot_be_removed() {
    let stage = stage();
    assert!(stage.remove_actor(ActorId(2)).unwrap());
    assert!(stage.remove_actor(ActorId(3)).unwrap());
    assert!(!stage.remove_actor(ActorId(1)).unwrap());
    assert_eq!(stage.actors().len(), 1);
    assert_eq!(
        stage.remove_actor(ActorId(2)),
        Err(ActorError::NotFound(ActorId(2)))
    );
}

#[test]
fn added_actor_reuses_first_free_identity() {
    let stage = stage();
    stage.remove_actor(ActorId(2)).unwrap();
    assert_eq!(stage.add_actor(), Some(ActorId(2)));
    let ids: Vec<_> = stage.actors().into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![ActorId(1), ActorId(3), ActorId(2)]);
}

#[test]
fn removing_selected_actor_moves_selection() {
    let stage = stage();
    stage.select(ActorId(2)).unwrap();
    stage.remove_actor(ActorId(2)).unwrap();
    assert_eq!(stage.selected(), ActorId(1));

    stage.select(ActorId(3)).unwrap();
    stage.remove_actor(ActorId(1)).unwrap();
    assert_eq!(stage.selected(), ActorId(3));
}

#[test]
fn authoring_targets_selected_actor() {
    let stage = stage();
    stage.select(ActorId(2)).unwrap();
    stage
        .append_command(template(CommandKind::Move).instantiate())
        .unwrap();
    stage
        .append_command(template(CommandKind::Say).instantiate())
        .unwrap();
    stage.update_parameter(1, 0, "Woof").unwrap();

    let dog = stage.actor(ActorId(2)).unwrap();
    assert_eq!(dog.program.len(), 2);
    assert_eq!(dog.program.commands()[1].describe(), "Say Woof for 2 secs");
    assert!(stage.actor(ActorId(1)).unwrap().program.is_empty());

    let removed = stage.remove_command(0).unwrap();
    assert_eq!(removed.kind(), CommandKind::Move);
    assert_eq!(stage.actor(ActorId(2)).unwrap().program.len(), 1);
}

#[test]
fn out_of_range_edits_are_signalled() {
    let stage = stage();
    stage
        .append_command(template(CommandKind::Turn).instantiate())
        .unwrap();

    assert!(matches!(
        stage.remove_command(5),
        Err(StageError::Program(ProgramError::CommandOutOfRange { index: 5, len: 1 }))
    ));
    assert!(matches!(
        stage.update_parameter(0, 2, Param::from(1)),
        Err(StageError::Program(ProgramError::ParameterOutOfRange { .. }))
    ));
    assert!(matches!(
        stage.append_command_to(ActorId(4), template(CommandKind::Turn).instantiate()),
        Err(StageError::Actor(ActorError::NotFound(_)))
    ));
}

#[test]
fn reset_restores_layout() {
    let stage = stage();
    stage
        .place(
            ActorId(3),
            Pose {
                position: Point::new(900.0, -5.0),
                heading: 135.0,
            },
        )
        .unwrap();
    let fox = stage.actor(ActorId(3)).unwrap();
    assert_eq!(fox.position, Point::new(470.0, 30.0));

    assert!(stage.reset());
    for (index, actor) in stage.actors().iter().enumerate() {
        assert_eq!(actor.position, layout_position(index));
        assert_eq!(actor.heading, 0.0);
        assert_eq!(actor.annotation, None);
    }
}

#[test]
fn direct_table_writes_stay_on_stage() {
    let stage = stage();
    stage
        .table()
        .apply_patch(ActorId(1), Patch::position(Point::new(9999.0, -50.0)))
        .unwrap();
    assert_eq!(stage.actor(ActorId(1)).unwrap().position, Point::new(470.0, 30.0));
}
