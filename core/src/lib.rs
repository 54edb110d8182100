#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gridquest simulation.
//!
//! Everything that crosses a crate boundary lives here: the grid coordinate
//! and direction types, the identifier newtypes, the [`Command`] values
//! adapters and systems hand to the world, the [`Event`] values the world
//! answers with, and the serde-derived level-data contracts supplied by the
//! loading boundary. State changes happen only inside the world's `apply`
//! entry point; systems see event batches plus immutable snapshots and
//! respond exclusively with new command batches.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cardinal movement directions available to dynamic actors.
///
/// The grid has no diagonal neighbours; every displacement and every facing
/// is one of these four values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward increasing `y`.
    North,
    /// Movement toward decreasing `y`.
    South,
    /// Movement toward increasing `x`.
    East,
    /// Movement toward decreasing `x`.
    West,
}

impl Direction {
    /// Returns the direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

/// Location of a single grid cell expressed as signed plane coordinates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridPosition {
    x: i32,
    y: i32,
}

impl GridPosition {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate along the west-east axis.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Coordinate along the south-north axis.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub const fn manhattan_distance(self, other: GridPosition) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the position one cell away in the provided direction.
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Self {
        match direction {
            Direction::North => Self::new(self.x, self.y + 1),
            Direction::South => Self::new(self.x, self.y - 1),
            Direction::East => Self::new(self.x + 1, self.y),
            Direction::West => Self::new(self.x - 1, self.y),
        }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.x, self.y)
    }
}

/// Unique identifier assigned to an actor placed on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerId(u32);

impl TriggerId {
    /// Creates a new trigger identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DoorId(u32);

impl DoorId {
    /// Creates a new door identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Category of an actor occupying a grid cell.
///
/// The closed set replaces the engine-driven inheritance hierarchy of the
/// prototypes: occupancy rules branch on the kind instead of a class chain.
/// Sensors and actuators (triggers, doors, the exit portal) do not occupy
/// cells and live in their own collections inside the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// Immovable obstacle that permanently blocks its cell.
    Wall,
    /// Pushable container displaced one cell at a time by a mover behind it.
    Crate,
    /// The player avatar.
    Player,
    /// A path-following enemy.
    Enemy,
}

impl ActorKind {
    /// Reports whether a mover may displace this kind by walking into it.
    #[must_use]
    pub const fn is_pushable(self) -> bool {
        matches!(self, Self::Crate)
    }

    /// Reports whether this kind can move between cells at all.
    #[must_use]
    pub const fn is_dynamic(self) -> bool {
        matches!(self, Self::Crate | Self::Player | Self::Enemy)
    }
}

/// Remaining hit points of a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric hit point count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the health remaining after absorbing the provided damage.
    #[must_use]
    pub const fn damaged(self, amount: u32) -> Self {
        Self(self.0.saturating_sub(amount))
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a dynamic actor move one cell in the given direction.
    MoveActor {
        /// Identifier of the actor attempting to move.
        actor: ActorId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that a dynamic actor turn to face the given direction.
    RotateActor {
        /// Identifier of the actor attempting to turn.
        actor: ActorId,
        /// Facing the actor should rotate toward.
        direction: Direction,
    },
    /// Opens or closes the gate on player-originated commands.
    SetInputsEnabled {
        /// Whether player move and rotate requests should be accepted.
        enabled: bool,
    },
    /// Reports that an enemy attacks the player instead of stepping forward.
    EnemyStrike {
        /// Identifier of the attacking enemy.
        enemy: ActorId,
    },
    /// Reports that the presentation layer finished the exit sequence.
    FinishExitSequence,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an actor accepted a move and began its transition.
    MoveStarted {
        /// Identifier of the moving actor.
        actor: ActorId,
        /// Cell the actor occupies when the transition begins.
        from: GridPosition,
        /// Cell the actor will occupy once the transition crosses over.
        to: GridPosition,
    },
    /// Reports that a move request was rejected with no state change.
    MoveRejected {
        /// Identifier of the actor whose request was rejected.
        actor: ActorId,
        /// Direction of the rejected step.
        direction: Direction,
        /// Specific reason the move was refused.
        reason: MoveRejection,
    },
    /// Confirms the once-per-move discrete occupancy change.
    ///
    /// Fired the instant the interpolated transition crosses the threshold
    /// distance; the previous cell is already vacated and the destination
    /// occupied when this event is observed. Trigger and door reactions
    /// caused by the reassignment follow in the same batch.
    ActorAdvanced {
        /// Identifier of the actor that changed cells.
        actor: ActorId,
        /// Cell the actor vacated.
        from: GridPosition,
        /// Cell the actor now occupies.
        to: GridPosition,
    },
    /// Confirms that a movement transition finished and the actor is idle.
    MoveCompleted {
        /// Identifier of the actor that finished moving.
        actor: ActorId,
        /// Cell the actor rests on.
        cell: GridPosition,
    },
    /// Confirms that an actor began turning toward a new facing.
    RotationStarted {
        /// Identifier of the turning actor.
        actor: ActorId,
        /// Facing the actor is turning toward.
        facing: Direction,
    },
    /// Confirms that a rotation finished and the new facing is effective.
    RotationCompleted {
        /// Identifier of the actor that finished turning.
        actor: ActorId,
        /// Facing the actor now holds.
        facing: Direction,
    },
    /// Reports that a rotation request was rejected with no state change.
    RotationRejected {
        /// Identifier of the actor whose request was rejected.
        actor: ActorId,
        /// Specific reason the rotation was refused.
        reason: RotationRejection,
    },
    /// Announces that a matching occupant activated a trigger.
    TriggerActivated {
        /// Identifier of the activated trigger.
        trigger: TriggerId,
        /// Cell the trigger is placed on.
        cell: GridPosition,
    },
    /// Announces that a trigger released after its occupant left.
    TriggerReleased {
        /// Identifier of the released trigger.
        trigger: TriggerId,
        /// Cell the trigger is placed on.
        cell: GridPosition,
    },
    /// Announces that a door opened and stopped blocking movement.
    DoorOpened {
        /// Identifier of the opened door.
        door: DoorId,
        /// Cell the door is placed on.
        cell: GridPosition,
    },
    /// Announces that a door closed and blocks movement again.
    DoorClosed {
        /// Identifier of the closed door.
        door: DoorId,
        /// Cell the door is placed on.
        cell: GridPosition,
    },
    /// Announces that the player's accepted move targets the exit cell.
    ///
    /// Fired exactly once per level; the input gate closes in the same
    /// command so no further player requests are accepted during the exit
    /// sequence.
    ExitReached {
        /// Position of the exit cell.
        cell: GridPosition,
    },
    /// Reports that an enemy struck the player.
    PlayerStruck {
        /// Identifier of the attacking enemy.
        enemy: ActorId,
        /// Hit points the player has left.
        remaining: Health,
    },
    /// Reports that the player ran out of hit points.
    PlayerDied {
        /// Cell the player occupied when dying.
        cell: GridPosition,
    },
    /// Announces that the level is complete after the exit sequence ended.
    LevelCompleted,
    /// Announces that the player-input gate changed state.
    InputGateChanged {
        /// Whether player requests are accepted from now on.
        enabled: bool,
    },
}

/// Reasons a move request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// The actor is still completing a movement or rotation transition.
    Busy,
    /// The player-input gate is closed.
    InputsDisabled,
    /// The destination lies outside the level grid.
    OutOfBounds,
    /// The destination is occupied by an actor that does not yield.
    Blocked,
    /// The destination holds a door that is currently closed.
    ClosedDoor,
    /// The destination crate could not move out of the way.
    PushBlocked,
}

/// Reasons a rotation request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RotationRejection {
    /// The actor is still completing a movement or rotation transition.
    Busy,
    /// The player-input gate is closed.
    InputsDisabled,
}

/// Progress of the level from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LevelOutcome {
    /// The level is still being played.
    #[default]
    InProgress,
    /// The player reached the exit and the exit sequence finished.
    Completed,
    /// The player died before reaching the exit.
    Failed,
}

/// Durations of the timed transitions driven by the world.
///
/// Configuration, not state: adapters construct one profile per level and
/// hand it to the world at load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionProfile {
    /// Time a one-cell movement transition takes to complete.
    pub move_duration: Duration,
    /// Time a rotation toward a new facing takes to complete.
    pub rotate_duration: Duration,
    /// Time a door swing animation takes to complete.
    pub door_duration: Duration,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            move_duration: Duration::from_millis(250),
            rotate_duration: Duration::from_millis(150),
            door_duration: Duration::from_millis(400),
        }
    }
}

/// Static description of a level supplied by the loading mechanism.
///
/// The layout names every traversable cell plus the placements on top of
/// them; the world validates the collection eagerly and refuses to start on
/// any inconsistency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Every traversable cell composing the level grid.
    pub cells: Vec<GridPosition>,
    /// Cell the player spawns on.
    pub entry: GridPosition,
    /// Cell the player must reach to complete the level.
    pub exit: GridPosition,
    /// Cells permanently blocked by walls.
    #[serde(default)]
    pub walls: Vec<GridPosition>,
    /// Cells holding pushable crates.
    #[serde(default)]
    pub crates: Vec<GridPosition>,
    /// Path-following enemies walking the level.
    #[serde(default)]
    pub enemies: Vec<PatrolSpec>,
    /// Pressure plates placed on cells.
    #[serde(default)]
    pub triggers: Vec<TriggerSpec>,
    /// Doors placed on cells, bound to one or more triggers.
    #[serde(default)]
    pub doors: Vec<DoorSpec>,
    /// Hit points the player starts the level with.
    #[serde(default = "default_player_health")]
    pub player_health: u32,
}

fn default_player_health() -> u32 {
    5
}

/// Description of one pressure plate within a level layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerSpec {
    /// Cell the plate is placed on.
    pub position: GridPosition,
    /// Actor kinds whose presence activates the plate.
    pub matching: Vec<ActorKind>,
    /// Whether the plate stays activated forever once pressed.
    #[serde(default)]
    pub keep_triggered: bool,
}

/// Description of one door within a level layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoorSpec {
    /// Cell the door is placed on.
    pub position: GridPosition,
    /// Whether the door starts the level open.
    #[serde(default)]
    pub open: bool,
    /// Indices into [`LevelLayout::triggers`] the door is bound to.
    ///
    /// The door opens only while every bound trigger is simultaneously
    /// activated.
    pub triggers: Vec<u32>,
}

/// Description of one path-following enemy within a level layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatrolSpec {
    /// Cells the enemy walks back and forth, in order. The enemy spawns on
    /// the first cell; consecutive cells must be cardinal neighbours.
    pub path: Vec<GridPosition>,
}

/// Immutable representation of a single actor's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorSnapshot {
    /// Unique identifier assigned to the actor.
    pub id: ActorId,
    /// Category the actor belongs to.
    pub kind: ActorKind,
    /// Grid cell currently recorded as occupied by the actor.
    pub cell: GridPosition,
    /// Cardinal facing of the actor.
    pub facing: Direction,
    /// Indicates whether a movement transition is running.
    pub in_movement: bool,
    /// Indicates whether a rotation transition is running.
    pub is_rotating: bool,
    /// Progress of the running transition in `0.0..=1.0`, `1.0` when idle.
    pub progress: f32,
}

/// Read-only snapshot describing all actors within the level.
#[derive(Clone, Debug, Default)]
pub struct ActorView {
    snapshots: Vec<ActorSnapshot>,
}

impl ActorView {
    /// Creates a new actor view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ActorSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &ActorSnapshot> {
        self.snapshots.iter()
    }

    /// Retrieves the snapshot captured for the provided actor, if any.
    #[must_use]
    pub fn get(&self, actor: ActorId) -> Option<&ActorSnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.id == actor)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ActorSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single trigger's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerSnapshot {
    /// Unique identifier assigned to the trigger.
    pub id: TriggerId,
    /// Cell the trigger is placed on.
    pub cell: GridPosition,
    /// Indicates whether the trigger is currently activated.
    pub is_triggered: bool,
    /// Indicates whether the trigger latches once activated.
    pub keep_triggered: bool,
}

/// Immutable representation of a single door's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorSnapshot {
    /// Unique identifier assigned to the door.
    pub id: DoorId,
    /// Cell the door is placed on.
    pub cell: GridPosition,
    /// Indicates whether the door currently lets movers through.
    pub is_open: bool,
    /// Progress of the cosmetic swing animation, `1.0` when at rest.
    pub swing_progress: f32,
}
