#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state management for Gridquest.
//!
//! The [`World`] owns the full cell collection and every actor, trigger and
//! door placed on it. It is the single source of truth for "what is at
//! position P": adapters and systems mutate it exclusively through
//! [`apply`], which executes one [`Command`] and broadcasts the resulting
//! [`Event`] values, and read it exclusively through the [`query`] module.

mod transitions;

use std::collections::HashMap;
use std::time::Duration;

use gridquest_core::{
    ActorId, ActorKind, Command, Direction, DoorId, Event, GridPosition, Health, LevelLayout,
    LevelOutcome, MotionProfile, MoveRejection, RotationRejection, TriggerId,
};
use thiserror::Error;

use transitions::{DoorSwing, Transition, TransitionKind};

/// Configuration errors that prevent a level from starting.
///
/// Detected eagerly while constructing the world; a failing layout refuses
/// to start with no partial or degraded mode.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The layout declared no traversable cells.
    #[error("level contains no cells")]
    EmptyGrid,
    /// A cell position appeared more than once in the layout.
    #[error("cell {0} is declared more than once")]
    DuplicateCell(GridPosition),
    /// The designated entry position is not part of the grid.
    #[error("entry cell {0} is not part of the grid")]
    MissingEntry(GridPosition),
    /// The designated exit position is not part of the grid.
    #[error("exit cell {0} is not part of the grid")]
    MissingExit(GridPosition),
    /// A wall, crate, trigger or door was placed outside the grid.
    #[error("placement at {0} lies outside the grid")]
    PlacementOffGrid(GridPosition),
    /// Two occupants were placed on the same cell.
    #[error("cell {0} holds more than one occupant")]
    CellOccupied(GridPosition),
    /// Two triggers were placed on the same cell.
    #[error("cell {0} holds more than one trigger")]
    DoubledTrigger(GridPosition),
    /// Two doors were placed on the same cell.
    #[error("cell {0} holds more than one door")]
    DoubledDoor(GridPosition),
    /// A door referenced a trigger index the layout does not define.
    #[error("door at {0} is bound to unknown trigger index {1}")]
    UnknownTrigger(GridPosition, u32),
    /// A door was bound to no trigger at all.
    #[error("door at {0} is not bound to any trigger")]
    UnboundDoor(GridPosition),
    /// An enemy patrol declared an empty path.
    #[error("enemy patrol {0} has an empty path")]
    EmptyPatrol(usize),
    /// An enemy patrol visits a cell outside the grid.
    #[error("enemy patrol {0} leaves the grid at {1}")]
    PatrolOffGrid(usize, GridPosition),
    /// Two consecutive patrol cells are not cardinal neighbours.
    #[error("enemy patrol {0} jumps between {1} and {2}")]
    BrokenPatrol(usize, GridPosition, GridPosition),
}

/// One discrete grid location.
///
/// The cell does not own its occupant; it is a placement index kept
/// consistent by the actor-move protocol.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    position: GridPosition,
    occupant: Option<ActorId>,
    trigger: Option<TriggerId>,
    door: Option<DoorId>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ActorState {
    id: ActorId,
    kind: ActorKind,
    cell: GridPosition,
    facing: Direction,
    in_movement: bool,
    is_rotating: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct TriggerState {
    id: TriggerId,
    cell: GridPosition,
    matching: Vec<ActorKind>,
    keep_triggered: bool,
    is_triggered: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct DoorState {
    id: DoorId,
    cell: GridPosition,
    is_open: bool,
    triggers: Vec<TriggerId>,
}

/// Authored walking route of one path-following enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatrolRoute {
    /// Identifier the world assigned to the enemy.
    pub enemy: ActorId,
    /// Cells the enemy walks back and forth, in layout order.
    pub path: Vec<GridPosition>,
}

/// Represents the authoritative state of one running level.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    cells: Vec<Cell>,
    index: HashMap<GridPosition, usize>,
    actors: Vec<ActorState>,
    triggers: Vec<TriggerState>,
    doors: Vec<DoorState>,
    patrols: Vec<PatrolRoute>,
    player: ActorId,
    entry: GridPosition,
    exit: GridPosition,
    player_health: Health,
    inputs_enabled: bool,
    outcome: LevelOutcome,
    exit_reached: bool,
    transitions: Vec<Transition>,
    door_swings: Vec<DoorSwing>,
    profile: MotionProfile,
}

impl World {
    /// Builds a world from the provided layout, validating it eagerly.
    ///
    /// The player spawns on the entry cell facing north. Walls, crates and
    /// enemies are placed in layout order; any inconsistency aborts the
    /// load with a [`LevelError`].
    pub fn from_layout(layout: &LevelLayout, profile: MotionProfile) -> Result<Self, LevelError> {
        if layout.cells.is_empty() {
            return Err(LevelError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(layout.cells.len());
        let mut index = HashMap::with_capacity(layout.cells.len());
        for &position in &layout.cells {
            if index.insert(position, cells.len()).is_some() {
                return Err(LevelError::DuplicateCell(position));
            }
            cells.push(Cell {
                position,
                occupant: None,
                trigger: None,
                door: None,
            });
        }

        if !index.contains_key(&layout.entry) {
            return Err(LevelError::MissingEntry(layout.entry));
        }
        if !index.contains_key(&layout.exit) {
            return Err(LevelError::MissingExit(layout.exit));
        }

        let mut world = Self {
            cells,
            index,
            actors: Vec::new(),
            triggers: Vec::new(),
            doors: Vec::new(),
            patrols: Vec::new(),
            player: ActorId::new(0),
            entry: layout.entry,
            exit: layout.exit,
            player_health: Health::new(layout.player_health),
            inputs_enabled: true,
            outcome: LevelOutcome::InProgress,
            exit_reached: false,
            transitions: Vec::new(),
            door_swings: Vec::new(),
            profile,
        };

        for &position in &layout.walls {
            let _ = world.place_actor(ActorKind::Wall, position, Direction::North)?;
        }
        for &position in &layout.crates {
            let _ = world.place_actor(ActorKind::Crate, position, Direction::North)?;
        }
        world.player = world.place_actor(ActorKind::Player, layout.entry, Direction::North)?;

        for (slot, patrol) in layout.enemies.iter().enumerate() {
            let spawn = *patrol
                .path
                .first()
                .ok_or(LevelError::EmptyPatrol(slot))?;
            for &cell in &patrol.path {
                if !world.index.contains_key(&cell) {
                    return Err(LevelError::PatrolOffGrid(slot, cell));
                }
            }
            for window in patrol.path.windows(2) {
                if window[0].manhattan_distance(window[1]) != 1 {
                    return Err(LevelError::BrokenPatrol(slot, window[0], window[1]));
                }
            }
            let facing = patrol
                .path
                .get(1)
                .and_then(|&next| direction_between(spawn, next))
                .unwrap_or(Direction::North);
            let enemy = world.place_actor(ActorKind::Enemy, spawn, facing)?;
            world.patrols.push(PatrolRoute {
                enemy,
                path: patrol.path.clone(),
            });
        }

        for spec in &layout.triggers {
            let cell_index = world
                .cell_index(spec.position)
                .ok_or(LevelError::PlacementOffGrid(spec.position))?;
            if world.cells[cell_index].trigger.is_some() {
                return Err(LevelError::DoubledTrigger(spec.position));
            }
            let id = TriggerId::new(world.triggers.len() as u32);
            world.cells[cell_index].trigger = Some(id);
            world.triggers.push(TriggerState {
                id,
                cell: spec.position,
                matching: spec.matching.clone(),
                keep_triggered: spec.keep_triggered,
                is_triggered: false,
            });
        }

        for spec in &layout.doors {
            let cell_index = world
                .cell_index(spec.position)
                .ok_or(LevelError::PlacementOffGrid(spec.position))?;
            if world.cells[cell_index].door.is_some() {
                return Err(LevelError::DoubledDoor(spec.position));
            }
            if spec.triggers.is_empty() {
                return Err(LevelError::UnboundDoor(spec.position));
            }
            let mut bound = Vec::with_capacity(spec.triggers.len());
            for &slot in &spec.triggers {
                if (slot as usize) >= world.triggers.len() {
                    return Err(LevelError::UnknownTrigger(spec.position, slot));
                }
                bound.push(TriggerId::new(slot));
            }
            let id = DoorId::new(world.doors.len() as u32);
            world.cells[cell_index].door = Some(id);
            world.doors.push(DoorState {
                id,
                cell: spec.position,
                is_open: spec.open,
                triggers: bound,
            });
        }

        Ok(world)
    }

    fn place_actor(
        &mut self,
        kind: ActorKind,
        position: GridPosition,
        facing: Direction,
    ) -> Result<ActorId, LevelError> {
        let cell_index = self
            .cell_index(position)
            .ok_or(LevelError::PlacementOffGrid(position))?;
        if self.cells[cell_index].occupant.is_some() {
            return Err(LevelError::CellOccupied(position));
        }
        let id = ActorId::new(self.actors.len() as u32);
        self.cells[cell_index].occupant = Some(id);
        self.actors.push(ActorState {
            id,
            kind,
            cell: position,
            facing,
            in_movement: false,
            is_rotating: false,
        });
        Ok(id)
    }

    fn cell_index(&self, position: GridPosition) -> Option<usize> {
        self.index.get(&position).copied()
    }

    fn actor(&self, id: ActorId) -> Option<&ActorState> {
        self.actors.get(id.get() as usize)
    }

    fn actor_mut(&mut self, id: ActorId) -> Option<&mut ActorState> {
        self.actors.get_mut(id.get() as usize)
    }

    /// Evaluates a move request and, on acceptance, begins the transition.
    ///
    /// Push chains resolve depth-first: a crate on the destination receives
    /// the same directional request before the mover commits, so a chain
    /// blocked anywhere rejects every member with no state change. The
    /// crate's transition is scheduled ahead of the pusher's, which makes
    /// its discrete vacate run first within the shared crossing tick.
    fn request_move(
        &mut self,
        id: ActorId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> Result<(), MoveRejection> {
        let (kind, from, busy) = match self.actor(id) {
            Some(actor) => (
                actor.kind,
                actor.cell,
                actor.in_movement || actor.is_rotating,
            ),
            None => return Err(MoveRejection::Blocked),
        };
        if !kind.is_dynamic() {
            return Err(MoveRejection::Blocked);
        }
        if busy {
            return Err(MoveRejection::Busy);
        }
        if kind == ActorKind::Player && !self.inputs_enabled {
            return Err(MoveRejection::InputsDisabled);
        }

        let to = from.offset(direction);
        let Some(destination_index) = self.cell_index(to) else {
            return Err(MoveRejection::OutOfBounds);
        };

        if let Some(door_id) = self.cells[destination_index].door {
            if !self.doors[door_id.get() as usize].is_open {
                return Err(MoveRejection::ClosedDoor);
            }
        }

        if let Some(occupant_id) = self.cells[destination_index].occupant {
            let pushable = self
                .actor(occupant_id)
                .map_or(false, |occupant| occupant.kind.is_pushable());
            if !pushable {
                return Err(MoveRejection::Blocked);
            }
            self.request_move(occupant_id, direction, out_events)
                .map_err(|_| MoveRejection::PushBlocked)?;
        }

        if let Some(state) = self.actor_mut(id) {
            state.facing = direction;
            state.in_movement = true;
        }
        self.transitions
            .push(Transition::step(id, from, to, self.profile.move_duration));
        out_events.push(Event::MoveStarted {
            actor: id,
            from,
            to,
        });

        if id == self.player && to == self.exit && !self.exit_reached {
            self.exit_reached = true;
            out_events.push(Event::ExitReached { cell: to });
            self.set_inputs_enabled(false, out_events);
        }

        Ok(())
    }

    fn request_rotation(
        &mut self,
        id: ActorId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) {
        let (kind, facing, busy) = match self.actor(id) {
            Some(actor) => (
                actor.kind,
                actor.facing,
                actor.in_movement || actor.is_rotating,
            ),
            None => return,
        };
        if !kind.is_dynamic() {
            return;
        }
        if busy {
            out_events.push(Event::RotationRejected {
                actor: id,
                reason: RotationRejection::Busy,
            });
            return;
        }
        if kind == ActorKind::Player && !self.inputs_enabled {
            out_events.push(Event::RotationRejected {
                actor: id,
                reason: RotationRejection::InputsDisabled,
            });
            return;
        }
        if facing == direction {
            return;
        }

        if let Some(state) = self.actor_mut(id) {
            state.is_rotating = true;
        }
        self.transitions
            .push(Transition::turn(id, direction, self.profile.rotate_duration));
        out_events.push(Event::RotationStarted {
            actor: id,
            facing: direction,
        });
    }

    /// Advances every running transition by one tick.
    ///
    /// Tasks advance in scheduling order, so a pushed crate always crosses
    /// before its pusher. The discrete occupancy change applies the instant
    /// the interpolated position enters the crossing distance, and the
    /// trigger and door reactions it causes run synchronously within the
    /// same tick.
    fn advance_transitions(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut transitions = std::mem::take(&mut self.transitions);
        let mut remaining = Vec::with_capacity(transitions.len());

        for mut transition in transitions.drain(..) {
            transition.advance(dt);
            match transition.kind {
                TransitionKind::Step { from, to, crossed } => {
                    let mut crossed = crossed;
                    if !crossed && transition.within_crossing_distance() {
                        crossed = true;
                        self.relocate(transition.actor, from, to, out_events);
                    }
                    if transition.finished() {
                        if let Some(state) = self.actor_mut(transition.actor) {
                            state.in_movement = false;
                        }
                        out_events.push(Event::MoveCompleted {
                            actor: transition.actor,
                            cell: to,
                        });
                    } else {
                        transition.kind = TransitionKind::Step { from, to, crossed };
                        remaining.push(transition);
                    }
                }
                TransitionKind::Turn { to } => {
                    if transition.finished() {
                        if let Some(state) = self.actor_mut(transition.actor) {
                            state.facing = to;
                            state.is_rotating = false;
                        }
                        out_events.push(Event::RotationCompleted {
                            actor: transition.actor,
                            facing: to,
                        });
                    } else {
                        remaining.push(transition);
                    }
                }
            }
        }

        self.transitions = remaining;
    }

    fn advance_door_swings(&mut self, dt: Duration) {
        for swing in &mut self.door_swings {
            swing.advance(dt);
        }
        self.door_swings.retain(|swing| !swing.finished());
    }

    /// Performs the once-per-move discrete cell reassignment.
    fn relocate(
        &mut self,
        actor: ActorId,
        from: GridPosition,
        to: GridPosition,
        out_events: &mut Vec<Event>,
    ) {
        if let Some(state) = self.actor_mut(actor) {
            state.cell = to;
        }
        out_events.push(Event::ActorAdvanced { actor, from, to });
        self.assign_occupant(from, None, out_events);
        self.assign_occupant(to, Some(actor), out_events);
    }

    /// Occupant setter protocol shared by every discrete occupancy change.
    ///
    /// Stores the occupant, then reacts: a matching occupant activates the
    /// cell's trigger, a vacated cell releases it unless the trigger
    /// latches, and every flip re-evaluates the doors bound to the trigger
    /// synchronously.
    fn assign_occupant(
        &mut self,
        position: GridPosition,
        occupant: Option<ActorId>,
        out_events: &mut Vec<Event>,
    ) {
        let Some(cell_index) = self.cell_index(position) else {
            return;
        };
        self.cells[cell_index].occupant = occupant;

        let Some(trigger_id) = self.cells[cell_index].trigger else {
            return;
        };
        match occupant {
            Some(actor_id) => {
                let Some(kind) = self.actor(actor_id).map(|actor| actor.kind) else {
                    return;
                };
                let trigger = &mut self.triggers[trigger_id.get() as usize];
                if !trigger.is_triggered && trigger.matching.contains(&kind) {
                    trigger.is_triggered = true;
                    out_events.push(Event::TriggerActivated {
                        trigger: trigger_id,
                        cell: trigger.cell,
                    });
                    self.react_to_trigger_change(trigger_id, out_events);
                }
            }
            None => {
                let trigger = &mut self.triggers[trigger_id.get() as usize];
                if trigger.is_triggered && !trigger.keep_triggered {
                    trigger.is_triggered = false;
                    out_events.push(Event::TriggerReleased {
                        trigger: trigger_id,
                        cell: trigger.cell,
                    });
                    self.react_to_trigger_change(trigger_id, out_events);
                }
            }
        }
    }

    /// Re-evaluates every door bound to the trigger that just flipped.
    ///
    /// A door opens only while all of its bound triggers are simultaneously
    /// activated; a latched trigger never releases, which freezes the
    /// actuated state permanently.
    fn react_to_trigger_change(&mut self, trigger: TriggerId, out_events: &mut Vec<Event>) {
        for door_index in 0..self.doors.len() {
            if !self.doors[door_index].triggers.contains(&trigger) {
                continue;
            }
            let all_held = self.doors[door_index]
                .triggers
                .iter()
                .all(|id| self.triggers[id.get() as usize].is_triggered);
            let (id, cell, is_open) = {
                let door = &self.doors[door_index];
                (door.id, door.cell, door.is_open)
            };
            if all_held && !is_open {
                self.doors[door_index].is_open = true;
                out_events.push(Event::DoorOpened { door: id, cell });
                self.begin_door_swing(id);
            } else if !all_held && is_open {
                self.doors[door_index].is_open = false;
                out_events.push(Event::DoorClosed { door: id, cell });
                self.begin_door_swing(id);
            }
        }
    }

    fn begin_door_swing(&mut self, door: DoorId) {
        // A reversal mid-swing restarts the animation from zero.
        self.door_swings.retain(|swing| swing.door != door);
        self.door_swings
            .push(DoorSwing::new(door, self.profile.door_duration));
    }

    fn set_inputs_enabled(&mut self, enabled: bool, out_events: &mut Vec<Event>) {
        if self.inputs_enabled == enabled {
            return;
        }
        self.inputs_enabled = enabled;
        out_events.push(Event::InputGateChanged { enabled });
    }

    fn strike_player(&mut self, enemy: ActorId, out_events: &mut Vec<Event>) {
        if self.outcome != LevelOutcome::InProgress {
            return;
        }
        let valid = self
            .actor(enemy)
            .map_or(false, |actor| actor.kind == ActorKind::Enemy);
        if !valid {
            return;
        }

        self.player_health = self.player_health.damaged(1);
        out_events.push(Event::PlayerStruck {
            enemy,
            remaining: self.player_health,
        });

        if self.player_health.is_depleted() {
            self.outcome = LevelOutcome::Failed;
            let cell = self
                .actor(self.player)
                .map_or(self.entry, |actor| actor.cell);
            self.set_inputs_enabled(false, out_events);
            out_events.push(Event::PlayerDied { cell });
        }
    }

    fn finish_exit_sequence(&mut self, out_events: &mut Vec<Event>) {
        if !self.exit_reached || self.outcome != LevelOutcome::InProgress {
            return;
        }
        self.outcome = LevelOutcome::Completed;
        out_events.push(Event::LevelCompleted);
    }

    fn transition_for(&self, actor: ActorId) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|transition| transition.actor == actor)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            world.advance_transitions(dt, out_events);
            world.advance_door_swings(dt);
        }
        Command::MoveActor { actor, direction } => {
            if world.actor(actor).is_none() {
                return;
            }
            if let Err(reason) = world.request_move(actor, direction, out_events) {
                out_events.push(Event::MoveRejected {
                    actor,
                    direction,
                    reason,
                });
            }
        }
        Command::RotateActor { actor, direction } => {
            world.request_rotation(actor, direction, out_events);
        }
        Command::SetInputsEnabled { enabled } => world.set_inputs_enabled(enabled, out_events),
        Command::EnemyStrike { enemy } => world.strike_player(enemy, out_events),
        Command::FinishExitSequence => world.finish_exit_sequence(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glam::Vec2;
    use gridquest_core::{
        ActorId, ActorSnapshot, ActorView, Direction, DoorId, DoorSnapshot, GridPosition,
        Health, LevelOutcome, TriggerId, TriggerSnapshot,
    };

    use super::{transitions, PatrolRoute, World};

    /// Captures a read-only view of every actor placed in the level.
    #[must_use]
    pub fn actor_view(world: &World) -> ActorView {
        let snapshots = world
            .actors
            .iter()
            .map(|state| ActorSnapshot {
                id: state.id,
                kind: state.kind,
                cell: state.cell,
                facing: state.facing,
                in_movement: state.in_movement,
                is_rotating: state.is_rotating,
                progress: world
                    .transition_for(state.id)
                    .map_or(1.0, super::Transition::progress),
            })
            .collect();
        ActorView::from_snapshots(snapshots)
    }

    /// Retrieves the snapshot of a single actor, if it exists.
    #[must_use]
    pub fn actor(world: &World, id: ActorId) -> Option<ActorSnapshot> {
        actor_view(world).get(id).copied()
    }

    /// Identifier of the player actor.
    #[must_use]
    pub fn player_id(world: &World) -> ActorId {
        world.player
    }

    /// Hit points the player currently has left.
    #[must_use]
    pub fn player_health(world: &World) -> Health {
        world.player_health
    }

    /// Position of the entry cell the player spawned on.
    #[must_use]
    pub fn entry(world: &World) -> GridPosition {
        world.entry
    }

    /// Position of the exit cell the player must reach.
    #[must_use]
    pub fn exit(world: &World) -> GridPosition {
        world.exit
    }

    /// Reports whether the actor is mid-movement or mid-rotation.
    ///
    /// Busy actors reject new move and rotate commands until their running
    /// transition completes.
    #[must_use]
    pub fn is_busy(world: &World, actor: ActorId) -> bool {
        world
            .actor(actor)
            .map_or(false, |state| state.in_movement || state.is_rotating)
    }

    /// Reports whether player-originated commands are currently accepted.
    #[must_use]
    pub fn inputs_enabled(world: &World) -> bool {
        world.inputs_enabled
    }

    /// Progress of the level from the player's point of view.
    #[must_use]
    pub fn outcome(world: &World) -> LevelOutcome {
        world.outcome
    }

    /// Looks up the cell stored at the provided position.
    #[must_use]
    pub fn cell(world: &World, position: GridPosition) -> Option<CellSnapshot> {
        world.cell_index(position).map(|index| {
            let cell = &world.cells[index];
            CellSnapshot {
                position: cell.position,
                occupant: cell.occupant,
                trigger: cell.trigger,
                door: cell.door,
            }
        })
    }

    /// Captures every cell of the grid in storage order.
    #[must_use]
    pub fn cell_view(world: &World) -> Vec<CellSnapshot> {
        world
            .cells
            .iter()
            .map(|cell| CellSnapshot {
                position: cell.position,
                occupant: cell.occupant,
                trigger: cell.trigger,
                door: cell.door,
            })
            .collect()
    }

    /// Looks up the cardinal neighbour of the provided position.
    #[must_use]
    pub fn cell_toward(
        world: &World,
        position: GridPosition,
        direction: Direction,
    ) -> Option<CellSnapshot> {
        cell(world, position.offset(direction))
    }

    /// Captures the state of every trigger in deterministic order.
    #[must_use]
    pub fn trigger_view(world: &World) -> Vec<TriggerSnapshot> {
        world
            .triggers
            .iter()
            .map(|state| TriggerSnapshot {
                id: state.id,
                cell: state.cell,
                is_triggered: state.is_triggered,
                keep_triggered: state.keep_triggered,
            })
            .collect()
    }

    /// Captures the state of every door in deterministic order.
    #[must_use]
    pub fn door_view(world: &World) -> Vec<DoorSnapshot> {
        world
            .doors
            .iter()
            .map(|state| DoorSnapshot {
                id: state.id,
                cell: state.cell,
                is_open: state.is_open,
                swing_progress: door_swing_progress(world, state.id),
            })
            .collect()
    }

    fn door_swing_progress(world: &World, door: DoorId) -> f32 {
        world
            .door_swings
            .iter()
            .find(|swing| swing.door == door)
            .map_or(1.0, super::DoorSwing::progress)
    }

    /// Authored walking routes of the level's path-following enemies.
    #[must_use]
    pub fn patrol_routes(world: &World) -> &[PatrolRoute] {
        &world.patrols
    }

    /// Interpolated world-space position of an actor.
    ///
    /// Mid-transition actors report their interpolated point; idle actors
    /// report the center of their cell.
    #[must_use]
    pub fn world_position(world: &World, actor: ActorId) -> Option<Vec2> {
        let state = world.actor(actor)?;
        let interpolated = world
            .transition_for(actor)
            .and_then(super::Transition::current_point);
        Some(interpolated.unwrap_or_else(|| transitions::world_point(state.cell)))
    }

    /// Read-only description of one grid cell.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CellSnapshot {
        /// Position the cell occupies in the grid.
        pub position: GridPosition,
        /// Actor currently recorded as occupying the cell, if any.
        pub occupant: Option<ActorId>,
        /// Trigger placed on the cell, if any.
        pub trigger: Option<TriggerId>,
        /// Door placed on the cell, if any.
        pub door: Option<DoorId>,
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
