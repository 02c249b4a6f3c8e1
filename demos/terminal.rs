//! Terminal Reaction Game
//!
//! A line-based shell around `ReactionGame`: the tokio event loop waits for
//! either a line on stdin or the next timer deadline, whichever comes first.
//!
//! Controls:
//! - Enter        trigger (keyboard mode)
//! - c + Enter    "click" (mouse mode)
//! - m            toggle input mode
//! - t            toggle theme
//! - h            show history
//! - q            quit
//!
//! Preferences persist to `reflex-prefs.json`, or the file named by
//! `REFLEX_PREFS`.
//!
//! Run with: cargo run --example terminal

use rand::rngs::SmallRng;
use rand::SeedableRng;
use reflex::core::{Attempt, Frame, InputKind, InputMode};
use reflex::effects::{
    AttemptSink, Clock, InputModeSource, ReactionGame, Renderer, Scheduler, TimerQueue,
    TimerToken,
};
use reflex::prefs::{MemoryStore, PreferenceError, Preferences};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

const DEFAULT_PREFS_FILE: &str = "reflex-prefs.json";

struct TerminalEnv {
    started: Instant,
    timers: TimerQueue,
    prefs: Preferences,
    store: MemoryStore,
    prefs_path: PathBuf,
}

impl TerminalEnv {
    fn new(prefs_path: PathBuf) -> Self {
        let store = MemoryStore::load_file(&prefs_path).unwrap_or_else(|e| {
            warn!(error = %e, "starting with default preferences");
            MemoryStore::new()
        });
        Self {
            started: Instant::now(),
            timers: TimerQueue::new(),
            prefs: Preferences::load(&store),
            store,
            prefs_path,
        }
    }

    fn persist(&mut self) -> Result<(), PreferenceError> {
        self.prefs.save(&mut self.store);
        self.store.save_file(&self.prefs_path)
    }

    fn persist_or_warn(&mut self) {
        if let Err(e) = self.persist() {
            warn!(error = %e, "preferences not saved");
        }
    }

    fn deadline(&self) -> Option<tokio::time::Instant> {
        let due = self.timers.next_deadline()?;
        Some(tokio::time::Instant::from_std(
            self.started + Duration::from_millis(due),
        ))
    }
}

impl Clock for TerminalEnv {
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl Scheduler for TerminalEnv {
    fn schedule_once(&mut self, token: TimerToken, delay_ms: u64) {
        let due = self.now_ms() + delay_ms;
        self.timers.schedule(token, due);
    }

    fn cancel(&mut self, token: TimerToken) {
        self.timers.cancel(token);
    }
}

impl Renderer for TerminalEnv {
    fn render(&mut self, frame: &Frame) {
        let bg = frame.background.resolve(self.prefs.theme);
        let fg = frame.foreground.resolve(self.prefs.theme);
        println!(
            "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m {:^36} \x1b[0m",
            bg.r, bg.g, bg.b, fg.r, fg.g, fg.b, frame.text
        );
    }
}

impl AttemptSink for TerminalEnv {
    fn record_attempt(&mut self, attempt: &Attempt) {
        println!("  #{} {}", attempt.number, attempt);
    }
}

impl InputModeSource for TerminalEnv {
    fn input_mode(&self) -> InputMode {
        self.prefs.input_mode
    }
}

async fn wait_for(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}

fn classify(line: &str) -> InputKind {
    match line {
        "" => InputKind::Enter,
        " " => InputKind::Space,
        "c" => InputKind::PointerDown { primary: true },
        "r" => InputKind::PointerDown { primary: false },
        _ => InputKind::OtherKey,
    }
}

fn print_status(env: &TerminalEnv) {
    println!(
        "[{} | {}]  Enter/c: play  m: mode  t: theme  h: history  q: quit",
        env.prefs.input_mode.label(),
        env.prefs.theme.label()
    );
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    println!("=== Reaction Time ===\n");

    let prefs_path = std::env::var_os("REFLEX_PREFS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFS_FILE));
    let env = TerminalEnv::new(prefs_path);
    print_status(&env);
    let mut game = ReactionGame::new(env, SmallRng::from_entropy());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let deadline = game.env().deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.as_str() {
                    "q" => break,
                    "m" => {
                        let env = game.env_mut();
                        env.prefs.input_mode = env.prefs.input_mode.toggled();
                        env.persist_or_warn();
                        print_status(game.env());
                        game.on_mode_changed();
                    }
                    "t" => {
                        let env = game.env_mut();
                        env.prefs.theme = env.prefs.theme.toggled();
                        env.persist_or_warn();
                        print_status(game.env());
                        let frame = game.last_frame().clone();
                        game.env_mut().render(&frame);
                    }
                    "h" => {
                        for attempt in game.attempts().most_recent_first() {
                            println!("  #{} {}", attempt.number, attempt);
                        }
                    }
                    other => {
                        if game.input_mode().accepts(classify(other)) {
                            game.trigger();
                        }
                    }
                }
            }
            _ = wait_for(deadline) => {
                let now = game.env().now_ms();
                let due = game.env_mut().timers.pop_due(now);
                for token in due {
                    game.on_timer(token);
                }
            }
        }
    }

    let attempts = game.attempts();
    if let (Some(best), Some(average)) = (attempts.best(), attempts.average_ms()) {
        println!(
            "\n{} attempts, best {}, average {:.0} ms",
            attempts.len(),
            best,
            average
        );
    }
    let log = game.transitions();
    if let Some(span) = log.duration() {
        println!("{} transitions over {:.1} s", log.len(), span.as_secs_f64());
    }
    match game.env_mut().persist() {
        Ok(()) => println!("preferences saved to {}", game.env().prefs_path.display()),
        Err(e) => eprintln!("preferences not saved: {e}"),
    }

    Ok(())
}
