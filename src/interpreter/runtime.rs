//! Async driver that plays a [`Pass`] against the live actor table.

use crate::runtime::actor::RunResult;
use crate::runtime::error::ActorResult;
use crate::runtime::ids::ActorId;
use crate::runtime::state::ActorTable;

use super::pass::Pass;

/// Apply every step of `pass` to `actor`, sleeping for each step's delay.
///
/// Steps are strictly sequential: the next patch is only applied once the
/// previous delay has elapsed. Sleeps are the only suspension points. The
/// returned result comes from the pass's own working pose, never from the
/// table.
pub async fn drive(table: &ActorTable, actor: ActorId, mut pass: Pass) -> ActorResult<RunResult> {
    while let Some(step) = pass.next() {
        tracing::trace!("{} patch {:?}", actor, step.patch);
        table.apply_patch(actor, step.patch)?;
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }
    }

    let pose = pass.pose();
    tracing::debug!(
        "{} pass finished at ({:.1}, {:.1}) heading {}",
        actor,
        pose.position.x,
        pose.position.y,
        pose.heading
    );
    Ok(RunResult {
        actor,
        position: pose.position,
        heading: pose.heading,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{CommandKind, Param, PassSettings, create_command, interpret};
    use crate::runtime::actor::{Actor, Bounds, Point};
    use crate::runtime::ids::SPRITE_POOL;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn drive_applies_patches_and_waits() {
        let table = ActorTable::new(16, Bounds::default());
        table.insert(Actor::new(&SPRITE_POOL[0], Point::new(100.0, 150.0)));

        let mut actor = table.get(ActorId(1)).unwrap();
        actor.program.append(create_command(CommandKind::Move, &[Param::from(20)]).unwrap());
        actor.program.append(create_command(CommandKind::Turn, &[Param::from(90)]).unwrap());

        let began = Instant::now();
        let pass = interpret(&actor.program, actor.pose(), PassSettings::default());
        let result = drive(&table, ActorId(1), pass).await.unwrap();

        assert_eq!(began.elapsed(), Duration::from_millis(600));
        assert_eq!(result.position, Point::new(120.0, 150.0));
        assert_eq!(result.heading, 90.0);

        let live = table.get(ActorId(1)).unwrap();
        assert_eq!(live.position, result.position);
        assert_eq!(live.heading, result.heading);
    }
}
