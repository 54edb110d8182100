#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player input policy that turns directional intents into world commands.

use gridquest_core::{ActorId, ActorView, Command, Direction, Event, MoveRejection};

/// Directional intent sampled by the adapter for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerInput {
    /// Direction the player pressed this frame, if any.
    pub direction: Option<Direction>,
}

/// Pure system that owns the face-then-move player policy.
///
/// A directional input first turns the player toward that direction; only a
/// repeated input in the same direction issues the actual move. Inputs
/// arriving while the player is mid-transition are dropped, never queued.
#[derive(Debug, Default)]
pub struct Controller {
    feedback: Option<MoveRejection>,
}

impl Controller {
    /// Consumes world events and the sampled input to emit player commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        actor_view: &ActorView,
        player: ActorId,
        input: ControllerInput,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::MoveRejected { actor, reason, .. } = event {
                if *actor == player {
                    self.feedback = Some(*reason);
                }
            }
        }

        let Some(direction) = input.direction else {
            return;
        };
        let Some(snapshot) = actor_view.get(player) else {
            return;
        };
        if snapshot.in_movement || snapshot.is_rotating {
            return;
        }

        if snapshot.facing == direction {
            out.push(Command::MoveActor {
                actor: player,
                direction,
            });
        } else {
            out.push(Command::RotateActor {
                actor: player,
                direction,
            });
        }
    }

    /// Takes the most recent rejection observed for the player, if any.
    ///
    /// Adapters consume this to play "can't move" feedback.
    #[must_use]
    pub fn take_feedback(&mut self) -> Option<MoveRejection> {
        self.feedback.take()
    }
}
