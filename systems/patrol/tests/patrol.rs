use std::time::Duration;

use gridquest_core::{
    Command, Direction, Event, GridPosition, LevelLayout, MotionProfile, PatrolSpec,
};
use gridquest_system_patrol::Patrol;
use gridquest_world::{self as world, query, World};

fn field(width: i32, height: i32) -> LevelLayout {
    let mut cells = Vec::new();
    for y in 0..height {
        for x in 0..width {
            cells.push(GridPosition::new(x, y));
        }
    }
    LevelLayout {
        cells,
        entry: GridPosition::new(0, 0),
        exit: GridPosition::new(width - 1, height - 1),
        walls: Vec::new(),
        crates: Vec::new(),
        enemies: Vec::new(),
        triggers: Vec::new(),
        doors: Vec::new(),
        player_health: 5,
    }
}

/// Runs one batch of events through the patrol system and applies whatever
/// commands it emits, handing each batch to the system exactly once.
fn pump(world: &mut World, patrol: &mut Patrol, events: Vec<Event>, all: &mut Vec<Event>) {
    let player = query::player_id(world);
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

/// Issues one player move and pumps the patrol system until the world
/// settles, the way the adapter's frame loop does.
fn play_move(world: &mut World, patrol: &mut Patrol, direction: Direction) -> Vec<Event> {
    let player = query::player_id(world);
    let mut all = Vec::new();

    let mut events = Vec::new();
    world::apply(
        world,
        Command::MoveActor {
            actor: player,
            direction,
        },
        &mut events,
    );
    pump(world, patrol, events, &mut all);

    for _ in 0..20 {
        let mut events = Vec::new();
        world::apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(100),
            },
            &mut events,
        );
        pump(world, patrol, events, &mut all);
    }
    all
}

#[test]
fn enemies_step_when_the_player_moves() {
    let mut layout = field(4, 2);
    layout.enemies.push(PatrolSpec {
        path: vec![GridPosition::new(3, 1), GridPosition::new(2, 1)],
    });
    let mut world =
        World::from_layout(&layout, MotionProfile::default()).expect("layout is valid");
    let mut patrol = Patrol::from_routes(query::patrol_routes(&world));
    let enemy = query::patrol_routes(&world)[0].enemy;

    let _ = play_move(&mut world, &mut patrol, Direction::East);
    assert_eq!(
        query::actor(&world, enemy).expect("enemy exists").cell,
        GridPosition::new(2, 1)
    );
}

#[test]
fn patrols_reverse_at_the_end_of_their_path() {
    let mut layout = field(5, 2);
    layout.enemies.push(PatrolSpec {
        path: vec![GridPosition::new(3, 1), GridPosition::new(4, 1)],
    });
    let mut world =
        World::from_layout(&layout, MotionProfile::default()).expect("layout is valid");
    let mut patrol = Patrol::from_routes(query::patrol_routes(&world));
    let enemy = query::patrol_routes(&world)[0].enemy;

    let _ = play_move(&mut world, &mut patrol, Direction::East);
    assert_eq!(
        query::actor(&world, enemy).expect("enemy exists").cell,
        GridPosition::new(4, 1)
    );

    let _ = play_move(&mut world, &mut patrol, Direction::East);
    assert_eq!(
        query::actor(&world, enemy).expect("enemy exists").cell,
        GridPosition::new(3, 1)
    );

    let _ = play_move(&mut world, &mut patrol, Direction::East);
    assert_eq!(
        query::actor(&world, enemy).expect("enemy exists").cell,
        GridPosition::new(4, 1)
    );
}

#[test]
fn enemy_strikes_instead_of_stepping_onto_the_player_destination() {
    let mut layout = field(3, 1);
    layout.player_health = 3;
    layout.enemies.push(PatrolSpec {
        path: vec![GridPosition::new(2, 0), GridPosition::new(1, 0)],
    });
    let mut world =
        World::from_layout(&layout, MotionProfile::default()).expect("layout is valid");
    let mut patrol = Patrol::from_routes(query::patrol_routes(&world));
    let enemy = query::patrol_routes(&world)[0].enemy;

    // The player moves onto (1, 0), exactly the enemy's next path cell.
    let events = play_move(&mut world, &mut patrol, Direction::East);
    let strikes = events
        .iter()
        .filter(|event| matches!(event, Event::PlayerStruck { .. }))
        .count();
    assert_eq!(strikes, 1);
    assert_eq!(
        query::actor(&world, enemy).expect("enemy exists").cell,
        GridPosition::new(2, 0)
    );
}

#[test]
fn blocked_enemies_hold_their_cursor_and_retry() {
    let mut layout = field(4, 3);
    layout.exit = GridPosition::new(3, 2);
    layout.walls.push(GridPosition::new(1, 1));
    layout.crates.push(GridPosition::new(2, 1));
    layout.enemies.push(PatrolSpec {
        path: vec![GridPosition::new(3, 1), GridPosition::new(2, 1)],
    });
    let mut world =
        World::from_layout(&layout, MotionProfile::default()).expect("layout is valid");
    let mut patrol = Patrol::from_routes(query::patrol_routes(&world));
    let enemy = query::patrol_routes(&world)[0].enemy;

    // The crate cannot be pushed into the wall, so the whole chain stalls
    // and the enemy keeps its place on the path.
    let _ = play_move(&mut world, &mut patrol, Direction::East);
    let _ = play_move(&mut world, &mut patrol, Direction::East);
    assert_eq!(
        query::actor(&world, enemy).expect("enemy exists").cell,
        GridPosition::new(3, 1)
    );

    // The player shoves the crate north out of the patrol row. The enemy
    // holds once more while the player stands on its path cell, then
    // resumes toward the same cell as soon as it frees up.
    let _ = play_move(&mut world, &mut patrol, Direction::North);
    assert_eq!(
        query::actor(&world, enemy).expect("enemy exists").cell,
        GridPosition::new(3, 1)
    );
    let _ = play_move(&mut world, &mut patrol, Direction::South);
    let _ = play_move(&mut world, &mut patrol, Direction::West);
    assert_eq!(
        query::actor(&world, enemy).expect("enemy exists").cell,
        GridPosition::new(2, 1)
    );
}
