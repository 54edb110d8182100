//! Per-tick transition tasks that drive timed movement, rotation and door
//! swings.
//!
//! Each task holds its elapsed time and target state and is advanced once
//! per simulation tick by the world; the suspension point is the end of the
//! tick and the resumption point the start of the next one. Tasks never run
//! in parallel for the same actor, guarded by the actor's transition flags.

use std::time::Duration;

use glam::Vec2;
use gridquest_core::{ActorId, Direction, DoorId, GridPosition};

/// Distance to the destination, in world units, at which a movement
/// transition applies its discrete cell reassignment.
pub(crate) const CROSSING_THRESHOLD: f32 = 0.5;

/// Side length of one grid cell expressed in world units.
pub(crate) const CELL_LENGTH: f32 = 1.0;

/// Converts a grid position to the world-space point at its center.
#[must_use]
pub(crate) fn world_point(cell: GridPosition) -> Vec2 {
    Vec2::new(cell.x() as f32 * CELL_LENGTH, cell.y() as f32 * CELL_LENGTH)
}

/// Cooperative task advancing one actor's timed transition.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Transition {
    pub(crate) actor: ActorId,
    pub(crate) kind: TransitionKind,
    elapsed: Duration,
    duration: Duration,
}

/// Target state a transition interpolates toward.
#[derive(Clone, Copy, Debug)]
pub(crate) enum TransitionKind {
    /// A one-cell movement; `crossed` records whether the discrete cell
    /// reassignment already ran.
    Step {
        from: GridPosition,
        to: GridPosition,
        crossed: bool,
    },
    /// An angular interpolation toward a new cardinal facing.
    Turn { to: Direction },
}

impl Transition {
    pub(crate) fn step(
        actor: ActorId,
        from: GridPosition,
        to: GridPosition,
        duration: Duration,
    ) -> Self {
        Self {
            actor,
            kind: TransitionKind::Step {
                from,
                to,
                crossed: false,
            },
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub(crate) fn turn(actor: ActorId, to: Direction, duration: Duration) -> Self {
        Self {
            actor,
            kind: TransitionKind::Turn { to },
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Fraction of the transition completed, clamped to `0.0..=1.0`.
    #[must_use]
    pub(crate) fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    #[must_use]
    pub(crate) fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Interpolated world-space position of a movement transition.
    ///
    /// Rotations have no positional component and yield `None`.
    #[must_use]
    pub(crate) fn current_point(&self) -> Option<Vec2> {
        match self.kind {
            TransitionKind::Step { from, to, .. } => {
                Some(world_point(from).lerp(world_point(to), self.progress()))
            }
            TransitionKind::Turn { .. } => None,
        }
    }

    /// Reports whether the interpolated position entered the crossing
    /// distance of the destination.
    #[must_use]
    pub(crate) fn within_crossing_distance(&self) -> bool {
        match self.kind {
            TransitionKind::Step { to, .. } => match self.current_point() {
                Some(point) => point.distance(world_point(to)) <= CROSSING_THRESHOLD,
                None => false,
            },
            TransitionKind::Turn { .. } => false,
        }
    }
}

/// Cosmetic swing animation of a door leaf.
///
/// The door's `is_open` flag flips the instant the trigger reaction runs;
/// the swing only animates the geometry for presentation queries.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DoorSwing {
    pub(crate) door: DoorId,
    elapsed: Duration,
    duration: Duration,
}

impl DoorSwing {
    pub(crate) fn new(door: DoorId, duration: Duration) -> Self {
        Self {
            door,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    #[must_use]
    pub(crate) fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    #[must_use]
    pub(crate) fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
