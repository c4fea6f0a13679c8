//! Integration tests for the session state machine and its driver

use blockfall::core::{hard_drop_target, Driver, Grid, Phase, Session};
use blockfall::types::{
    Cell, Color, Direction, GameEvent, Intent, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, FRAME_MS,
    LINE_CLEAR_DELAY_MS,
};

fn block() -> Cell {
    Cell::Filled {
        kind: PieceKind::Z,
        color: Color::new(5, 5, 5),
    }
}

/// Row 19 full except where the first piece for `seed` lands on an empty grid.
fn grid_completed_by_first_drop(seed: u32) -> Grid {
    let first = Session::new(seed);
    let active = first.active().unwrap();
    let target = hard_drop_target(&Grid::new(), &active);
    let bottom = BOARD_HEIGHT as i8 - 1;

    let mut grid = Grid::new();
    for x in 0..BOARD_WIDTH as i8 {
        if !target.cells().contains(&(x, bottom)) {
            grid.set(x, bottom, block());
        }
    }
    grid
}

/// Run the driver in frame-sized steps until `done` or a step limit.
fn run_frames(
    session: &mut Session,
    driver: &mut Driver,
    frames: u32,
    done: impl Fn(&Session) -> bool,
) {
    for _ in 0..frames {
        if done(session) {
            return;
        }
        driver.advance(session, FRAME_MS);
    }
}

#[test]
fn test_game_lifecycle() {
    let mut session = Session::new(12345);
    assert_eq!(session.phase(), Phase::Falling);
    assert!(session.active().is_some());
    assert!(!session.paused());
    assert_eq!(session.pieces_spawned(), 1);
    assert_eq!(
        session.drain_events(),
        vec![GameEvent::Spawned(session.active().unwrap().kind)]
    );
    assert!(session.drain_events().is_empty());
}

#[test]
fn test_moves_emit_piece_moved() {
    let mut session = Session::new(12345);
    session.drain_events();
    let x0 = session.active().unwrap().x;

    assert!(session.apply(Intent::MoveRight));
    assert_eq!(session.active().unwrap().x, x0 + 1);
    assert!(session.request_move(Direction::Left));
    assert_eq!(session.active().unwrap().x, x0);
    assert_eq!(
        session.drain_events(),
        vec![GameEvent::PieceMoved, GameEvent::PieceMoved]
    );
}

#[test]
fn test_wall_blocks_horizontal_moves() {
    let mut session = Session::new(3);
    for _ in 0..BOARD_WIDTH {
        session.apply(Intent::MoveLeft);
    }
    let at_wall = session.active().unwrap();
    assert!(!session.apply(Intent::MoveLeft));
    assert_eq!(session.active().unwrap(), at_wall);
    assert!(at_wall.cells().iter().any(|&(x, _)| x == 0));
}

#[test]
fn test_hard_drop_locks_and_spawns_next() {
    let mut session = Session::new(42);
    let next = session.next_kind();
    session.drain_events();

    assert!(session.apply(Intent::HardDrop));
    assert_eq!(session.grid().filled_count(), 4);
    assert_eq!(session.active().unwrap().kind, next);

    let events = session.drain_events();
    assert_eq!(events.first(), Some(&GameEvent::PieceMoved));
    assert!(events.contains(&GameEvent::PieceLocked));
    assert_eq!(events.last(), Some(&GameEvent::Spawned(next)));
}

#[test]
fn test_single_line_clear_through_driver() {
    let seed = 8;
    let mut session = Session::with_grid(seed, grid_completed_by_first_drop(seed));
    let mut driver = Driver::new();
    session.drain_events();

    session.apply(Intent::HardDrop);
    assert_eq!(session.phase(), Phase::Clearing);
    assert_eq!(session.pending_clear_rows(), &[BOARD_HEIGHT - 1]);
    assert!(session.active().is_none());
    // The full row is still on the grid while it flashes.
    assert!(session.grid().is_row_full(BOARD_HEIGHT as usize - 1));

    // Input is dropped during the clear window.
    assert!(!session.apply(Intent::MoveLeft));
    assert!(!session.apply(Intent::HardDrop));

    run_frames(&mut session, &mut driver, 100, |s| s.phase() != Phase::Clearing);
    assert_eq!(session.phase(), Phase::Falling);
    assert_eq!(session.lines(), 1);
    assert_eq!(session.score(), 100);
    assert_eq!(session.level(), 0);
    assert!(session.pending_clear_rows().is_empty());

    let events = session.drain_events();
    assert!(events.contains(&GameEvent::LinesCleared(1)));
}

#[test]
fn test_clear_waits_for_full_delay() {
    let seed = 8;
    let mut session = Session::with_grid(seed, grid_completed_by_first_drop(seed));
    let mut driver = Driver::new();

    session.apply(Intent::HardDrop);
    let mut waited = 0;
    while session.phase() == Phase::Clearing {
        driver.advance(&mut session, 1);
        waited += 1;
    }
    assert_eq!(waited, LINE_CLEAR_DELAY_MS);
}

#[test]
fn test_gravity_locks_and_eventually_tops_out() {
    let mut session = Session::new(7);
    let mut driver = Driver::new();

    run_frames(&mut session, &mut driver, 1_000_000, Session::game_over);
    assert_eq!(session.phase(), Phase::GameOver);
    assert!(session.active().is_none());
    assert!(session.pieces_spawned() > 1);
    assert_eq!(session.drain_events().last(), Some(&GameEvent::GameOver));

    // The clock no longer does anything.
    let snap = session.snapshot();
    assert!(!driver.advance(&mut session, 10_000));
    assert_eq!(session.snapshot(), snap);
}

#[test]
fn test_any_intent_restarts_after_game_over() {
    let mut session = Session::new(7);
    while !session.game_over() {
        session.apply(Intent::HardDrop);
    }
    let episode = session.episode_id();
    session.drain_events();

    assert!(session.apply(Intent::MoveLeft));
    assert_eq!(session.phase(), Phase::Falling);
    assert_eq!(session.episode_id(), episode + 1);
    assert_eq!(session.score(), 0);
    assert_eq!(session.lines(), 0);
    assert_eq!(session.grid().filled_count(), 0);
    let events = session.drain_events();
    assert_eq!(events[0], GameEvent::Restarted);
    assert!(matches!(events[1], GameEvent::Spawned(_)));
}

#[test]
fn test_pause_blocks_input_and_gravity() {
    let mut session = Session::new(1);
    let mut driver = Driver::new();
    let before = session.snapshot();

    assert!(session.apply(Intent::TogglePause));
    assert!(session.paused());
    assert!(!session.apply(Intent::MoveLeft));
    assert!(!session.apply(Intent::HardDrop));
    assert!(!session.apply(Intent::Restart));
    run_frames(&mut session, &mut driver, 500, |_| false);

    assert!(session.apply(Intent::TogglePause));
    let after = session.snapshot();
    assert_eq!(after.active, before.active);
    assert_eq!(after.grid, before.grid);
    assert_eq!(after.episode_id, before.episode_id);
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        Intent::MoveLeft,
        Intent::Rotate,
        Intent::HardDrop,
        Intent::MoveRight,
        Intent::MoveRight,
        Intent::SoftDrop,
        Intent::HardDrop,
        Intent::Rotate,
        Intent::Rotate,
        Intent::HardDrop,
    ];

    let play = || {
        let mut session = Session::new(2718);
        let mut driver = Driver::new();
        for intent in script {
            session.apply(intent);
            driver.advance(&mut session, 250);
        }
        (session.snapshot(), session.drain_events())
    };

    assert_eq!(play(), play());
}
