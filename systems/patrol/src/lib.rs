#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic patrol system that walks enemies along authored paths.
//!
//! Each enemy owns a list of cells it walks back and forth. Enemies advance
//! one step every time the player starts moving; an enemy whose next path
//! cell is the player's announced destination holds its ground and strikes
//! instead of stepping.

use gridquest_core::{ActorId, ActorView, Command, Direction, Event, GridPosition};
use gridquest_world::PatrolRoute;

/// Pure system that reacts to player movement and emits enemy commands.
#[derive(Debug, Default)]
pub struct Patrol {
    routes: Vec<Route>,
}

#[derive(Clone, Debug)]
struct Route {
    enemy: ActorId,
    path: Vec<GridPosition>,
    cursor: usize,
    forward: bool,
    pending: Option<(usize, bool)>,
}

impl Patrol {
    /// Builds the system from the routes the world validated at level load.
    #[must_use]
    pub fn from_routes(routes: &[PatrolRoute]) -> Self {
        Self {
            routes: routes
                .iter()
                .map(|route| Route {
                    enemy: route.enemy,
                    path: route.path.clone(),
                    cursor: 0,
                    forward: true,
                    pending: None,
                })
                .collect(),
        }
    }

    /// Consumes world events and the actor view to emit enemy commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        actor_view: &ActorView,
        player: ActorId,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                // A confirmed step commits the proposed cursor position; a
                // rejected one leaves it in place for the next attempt.
                Event::MoveStarted { actor, .. } if *actor != player => {
                    for route in &mut self.routes {
                        if route.enemy == *actor {
                            if let Some((cursor, forward)) = route.pending.take() {
                                route.cursor = cursor;
                                route.forward = forward;
                            }
                        }
                    }
                }
                Event::MoveRejected { actor, .. } if *actor != player => {
                    for route in &mut self.routes {
                        if route.enemy == *actor {
                            route.pending = None;
                        }
                    }
                }
                _ => {}
            }
        }

        for event in events {
            let Event::MoveStarted { actor, to, .. } = event else {
                continue;
            };
            if *actor != player {
                continue;
            }
            for route in &mut self.routes {
                route.advance_toward(*to, actor_view, out);
            }
        }
    }
}

impl Route {
    fn advance_toward(
        &mut self,
        player_destination: GridPosition,
        actor_view: &ActorView,
        out: &mut Vec<Command>,
    ) {
        let Some(snapshot) = actor_view.get(self.enemy) else {
            return;
        };
        if snapshot.in_movement || snapshot.is_rotating {
            return;
        }
        let Some((next_index, forward)) = self.next_step() else {
            return;
        };
        let next_cell = self.path[next_index];

        if next_cell == player_destination {
            out.push(Command::EnemyStrike { enemy: self.enemy });
            return;
        }

        let Some(direction) = direction_between(snapshot.cell, next_cell) else {
            return;
        };
        self.pending = Some((next_index, forward));
        out.push(Command::MoveActor {
            actor: self.enemy,
            direction,
        });
    }

    /// Next path index in ping-pong order, reversing at either end.
    fn next_step(&self) -> Option<(usize, bool)> {
        if self.path.len() < 2 {
            return None;
        }
        if self.forward {
            if self.cursor + 1 < self.path.len() {
                Some((self.cursor + 1, true))
            } else {
                Some((self.cursor - 1, false))
            }
        } else if self.cursor > 0 {
            Some((self.cursor - 1, false))
        } else {
            Some((self.cursor + 1, true))
        }
    }
}

fn direction_between(from: GridPosition, to: GridPosition) -> Option<Direction> {
    if from.manhattan_distance(to) != 1 {
        return None;
    }
    if to.x() > from.x() {
        Some(Direction::East)
    } else if to.x() < from.x() {
        Some(Direction::West)
    } else if to.y() > from.y() {
        Some(Direction::North)
    } else {
        Some(Direction::South)
    }
}
