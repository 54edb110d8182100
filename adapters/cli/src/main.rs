#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots and drives a Gridquest level.
//!
//! The adapter samples one direction per line of input, feeds it through the
//! controller system, pumps the world until every transition settles, and
//! renders the grid as text. It is boundary glue around the simulation core,
//! standing in for the engine-hosted presentation layer.

mod level_code;

use std::collections::HashMap;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use gridquest_core::{
    ActorId, ActorKind, Command, Direction, DoorSpec, Event, GridPosition, LevelLayout,
    LevelOutcome, MotionProfile, MoveRejection, PatrolSpec, TriggerSpec,
};
use gridquest_system_controller::{Controller, ControllerInput};
use gridquest_system_patrol::Patrol;
use gridquest_world::{self as world, query, World};
use log::{debug, info};

/// Fixed frame delta the adapter feeds the simulation.
const FRAME: Duration = Duration::from_millis(50);

/// Upper bound of frames pumped per input before giving control back.
const MAX_FRAMES_PER_TURN: usize = 64;

#[derive(Debug, Parser)]
#[command(name = "gridquest", about = "Terminal front end for the Gridquest core")]
struct Args {
    /// Path to a JSON level layout file.
    #[arg(long)]
    level: Option<PathBuf>,
    /// Single-line level code produced by --share.
    #[arg(long)]
    code: Option<String>,
    /// Print the selected level as a shareable code and exit.
    #[arg(long)]
    share: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let layout = if let Some(path) = &args.level {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading level file {}", path.display()))?;
        serde_json::from_str(&contents).context("parsing level file")?
    } else if let Some(code) = &args.code {
        level_code::decode(code).context("decoding level code")?
    } else {
        demo_layout()
    };

    if args.share {
        println!("{}", level_code::encode(&layout));
        return Ok(());
    }

    let mut world =
        World::from_layout(&layout, MotionProfile::default()).context("level failed to start")?;
    info!(
        "level loaded: {} cells, entry {}, exit {}",
        layout.cells.len(),
        query::entry(&world),
        query::exit(&world)
    );

    run(&mut world)
}

fn run(world: &mut World) -> Result<()> {
    let mut controller = Controller::default();
    let mut patrol = Patrol::from_routes(query::patrol_routes(world));
    let player = query::player_id(world);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        render(world);
        print!("move [w/a/s/d, q quits] > ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let direction = match line?.trim() {
            "q" => break,
            "w" => Direction::North,
            "s" => Direction::South,
            "a" => Direction::West,
            "d" => Direction::East,
            "" => continue,
            other => {
                println!("unknown input '{other}'");
                continue;
            }
        };

        let events = play_turn(world, &mut controller, &mut patrol, player, direction);
        debug!("turn produced {} events", events.len());

        if events
            .iter()
            .any(|event| matches!(event, Event::ExitReached { .. }))
        {
            render(world);
            println!("The exit portal flares and swallows you...");
            let mut events = Vec::new();
            world::apply(world, Command::FinishExitSequence, &mut events);
        }

        if let Some(reason) = controller.take_feedback() {
            println!("{}", feedback_line(reason));
        }

        match query::outcome(world) {
            LevelOutcome::Completed => {
                println!("Level complete!");
                break;
            }
            LevelOutcome::Failed => {
                render(world);
                println!("You died.");
                break;
            }
            LevelOutcome::InProgress => {}
        }
    }

    Ok(())
}

/// Runs one player input through the controller and pumps the world until
/// every transition settles.
fn play_turn(
    world: &mut World,
    controller: &mut Controller,
    patrol: &mut Patrol,
    player: ActorId,
    direction: Direction,
) -> Vec<Event> {
    let mut all = Vec::new();

    let mut commands = Vec::new();
    controller.handle(
        &[],
        &query::actor_view(world),
        player,
        ControllerInput {
            direction: Some(direction),
        },
        &mut commands,
    );

    let mut batch = Vec::new();
    for command in commands {
        world::apply(world, command, &mut batch);
    }
    pump(world, patrol, player, batch, &mut all);

    for _ in 0..MAX_FRAMES_PER_TURN {
        if query::actor_view(world)
            .iter()
            .all(|actor| !actor.in_movement && !actor.is_rotating)
        {
            break;
        }
        let mut batch = Vec::new();
        world::apply(world, Command::Tick { dt: FRAME }, &mut batch);
        pump(world, patrol, player, batch, &mut all);
    }

    // Deliver the settled batch to the controller for rejection feedback.
    let mut sink = Vec::new();
    controller.handle(
        &all,
        &query::actor_view(world),
        player,
        ControllerInput::default(),
        &mut sink,
    );

    all
}

/// Hands each event batch to the patrol system exactly once and applies the
/// commands it answers with.
fn pump(
    world: &mut World,
    patrol: &mut Patrol,
    player: ActorId,
    events: Vec<Event>,
    all: &mut Vec<Event>,
) {
    let mut batch = events;
    while !batch.is_empty() {
        let mut commands = Vec::new();
        patrol.handle(&batch, &query::actor_view(world), player, &mut commands);
        all.extend(batch.drain(..));
        for command in commands {
            world::apply(world, command, &mut batch);
        }
    }
}

fn feedback_line(reason: MoveRejection) -> &'static str {
    match reason {
        MoveRejection::Busy => "You are still moving.",
        MoveRejection::InputsDisabled => "You cannot act right now.",
        MoveRejection::OutOfBounds => "The world ends there.",
        MoveRejection::Blocked => "Something solid is in the way.",
        MoveRejection::ClosedDoor => "The door is closed.",
        MoveRejection::PushBlocked => "The crate will not budge.",
    }
}

fn render(world: &World) {
    let cells = query::cell_view(world);
    let actors = query::actor_view(world);
    let doors: HashMap<_, _> = query::door_view(world)
        .into_iter()
        .map(|door| (door.id, door))
        .collect();
    let triggers: HashMap<_, _> = query::trigger_view(world)
        .into_iter()
        .map(|trigger| (trigger.id, trigger))
        .collect();
    let by_position: HashMap<GridPosition, _> = cells
        .iter()
        .map(|cell| (cell.position, cell))
        .collect();

    let min_x = cells.iter().map(|cell| cell.position.x()).min().unwrap_or(0);
    let max_x = cells.iter().map(|cell| cell.position.x()).max().unwrap_or(0);
    let min_y = cells.iter().map(|cell| cell.position.y()).min().unwrap_or(0);
    let max_y = cells.iter().map(|cell| cell.position.y()).max().unwrap_or(0);
    let exit = query::exit(world);

    println!();
    for y in (min_y..=max_y).rev() {
        let mut line = String::new();
        for x in min_x..=max_x {
            let position = GridPosition::new(x, y);
            let glyph = match by_position.get(&position) {
                None => ' ',
                Some(cell) => {
                    if let Some(occupant) = cell.occupant.and_then(|id| actors.get(id)) {
                        match occupant.kind {
                            ActorKind::Player => '@',
                            ActorKind::Wall => '#',
                            ActorKind::Crate => 'o',
                            ActorKind::Enemy => 'E',
                        }
                    } else if let Some(door) = cell.door.and_then(|id| doors.get(&id)) {
                        if door.is_open {
                            '/'
                        } else {
                            'D'
                        }
                    } else if let Some(trigger) = cell.trigger.and_then(|id| triggers.get(&id)) {
                        if trigger.is_triggered {
                            '_'
                        } else {
                            '^'
                        }
                    } else if position == exit {
                        'X'
                    } else {
                        '.'
                    }
                }
            };
            line.push(glyph);
            line.push(' ');
        }
        println!("{line}");
    }
    println!("hp: {}", query::player_health(world).get());
}

/// Built-in level used when no layout is supplied: push the crate onto the
/// plate to open the door, then slip past the patrol to the exit.
fn demo_layout() -> LevelLayout {
    let mut cells = Vec::new();
    for y in 0..4 {
        for x in 0..4 {
            cells.push(GridPosition::new(x, y));
        }
    }
    LevelLayout {
        cells,
        entry: GridPosition::new(0, 0),
        exit: GridPosition::new(3, 3),
        walls: vec![GridPosition::new(1, 1)],
        crates: vec![GridPosition::new(1, 0)],
        enemies: vec![PatrolSpec {
            path: vec![GridPosition::new(0, 3), GridPosition::new(0, 2)],
        }],
        triggers: vec![TriggerSpec {
            position: GridPosition::new(3, 0),
            matching: vec![ActorKind::Crate],
            keep_triggered: true,
        }],
        doors: vec![DoorSpec {
            position: GridPosition::new(2, 2),
            open: false,
            triggers: vec![0],
        }],
        player_health: 5,
    }
}
