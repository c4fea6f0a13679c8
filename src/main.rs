//! Terminal blockfall runner (default binary).
//!
//! Owns the wall clock: input is polled until the next frame is due, then the
//! elapsed milliseconds are fed to the session's [`Driver`].

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::cli::{parse_args, Command, PlayConfig, USAGE};
use blockfall::core::{Driver, Session};
use blockfall::input::{handle_key_event, is_mute_toggle, should_quit};
use blockfall::term::{FrameBuffer, GameView, HostStatus, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args)? {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Play(config) => config,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, config: PlayConfig) -> Result<()> {
    let mut session = Session::new(config.seed.unwrap_or_else(clock_seed));
    let mut driver = Driver::new();

    let view = GameView::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);

    let frame = Duration::from_millis(FRAME_MS as u64);
    let started = Instant::now();
    let mut last_tick = started;
    let mut host = HostStatus::default();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        host.blink_on = HostStatus::blink_on_at(started.elapsed().as_millis() as u64);
        view.render_into_with_host(&session.snapshot(), &host, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if is_mute_toggle(key) {
                        host.muted = !host.muted;
                    }
                    if let Some(intent) = handle_key_event(key) {
                        session.apply(intent);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            let ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
            last_tick += Duration::from_millis(ms as u64);
            driver.advance(&mut session, ms);
        }

        for ev in session.drain_events() {
            if host.rings_for(ev) {
                term.bell()?;
            }
        }
    }
}
