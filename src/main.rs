//! Terminal blockfall runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer. Logs go to
//! stderr through `env_logger` (`RUST_LOG`, default `warn`); redirect stderr
//! to a file to read them while playing.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use log::info;

use blockfall::core::{Session, Snapshot};
use blockfall::engine::{phase, tick};
use blockfall::input::{should_quit, IntentCollector};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::{Config, FileHighScoreStore};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_env();
    info!("starting with {:?}", config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let mut session = Session::new(config.seed_or_clock()).with_shadow(config.shadow);
    let mut store = FileHighScoreStore::new(&config.highscore_path);
    let mut input = IntentCollector::new();

    let view = GameView::default();
    let mut snapshot = Snapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(config.tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        session.snapshot_into(&mut snapshot);
        let (w, h) = term.size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        phase::commit_high_score(&mut session, &mut store);
                        info!("quit with score {}", session.score);
                        return Ok(());
                    }
                    input.handle_key_event(key);
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
            tick(&mut session, input.intent_mut(), elapsed_ms, &mut store);
        }
    }
}
