//! End-to-end rounds driven in virtual time.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use reflex::core::{hue_shift, Color, GameState, InputMode, Theme};
use reflex::effects::{Clock, ReactionGame, SimulatedEnv, TimerKind, RESULT_HOLD_MS};
use reflex::prefs::{MemoryStore, PreferenceStore, Preferences};

fn game_with(mode: InputMode, seed: u64) -> ReactionGame<SimulatedEnv, SmallRng> {
    ReactionGame::new(SimulatedEnv::new(mode), SmallRng::seed_from_u64(seed))
}

fn last_delay(game: &ReactionGame<SimulatedEnv, SmallRng>) -> u64 {
    game.env()
        .scheduled()
        .iter()
        .rev()
        .find(|t| t.token.kind == TimerKind::Delay)
        .map(|t| t.delay_ms)
        .unwrap()
}

fn hue_of(color: Color) -> u16 {
    match color {
        Color::Hsl(hsl) => hsl.hue,
        other => panic!("expected an HSL color, got {other:?}"),
    }
}

#[test]
fn successful_round() {
    let mut game = game_with(InputMode::Pointer, 11);

    game.trigger();
    assert_eq!(game.current_state(), GameState::Waiting);
    assert_eq!(game.last_frame().text, "Wait...");

    game.advance(last_delay(&game));
    assert_eq!(game.current_state(), GameState::Ready);
    assert_eq!(game.last_frame().text, "Action!");
    let ready_at = game.env().now_ms();

    game.advance(250);
    game.trigger();

    assert_eq!(game.current_state(), GameState::Result);
    assert_eq!(game.last_frame().text, "250 ms");
    assert_eq!(game.env().recorded().len(), 1);
    assert_eq!(game.env().recorded()[0].elapsed_ms, 250);
    assert_eq!(game.env().now_ms(), ready_at + 250);
}

#[test]
fn early_trigger_round() {
    let mut game = game_with(InputMode::Keyboard, 12);

    game.trigger();
    game.advance(1000);
    game.trigger();

    assert_eq!(game.current_state(), GameState::Result);
    assert_eq!(game.last_frame().text, "Too early. Retry.");
    assert_eq!(game.last_frame().background, Color::AreaBackground);
    assert_eq!(game.last_frame().foreground, Color::Text);
    assert!(game.env().recorded().is_empty());

    game.advance(RESULT_HOLD_MS);
    assert_eq!(game.last_frame().text, "Press Enter/Space to start");

    // The cancelled cue never shows up later.
    game.advance(10_000);
    assert_eq!(game.current_state(), GameState::Result);
    assert!(game.env().frames().iter().all(|f| f.text != "Action!"));
}

#[test]
fn mode_change_while_idle_updates_prompt_only() {
    let mut game = game_with(InputMode::Keyboard, 13);
    assert_eq!(game.last_frame().text, "Press Enter/Space to start");

    game.env_mut().set_input_mode(InputMode::Pointer);
    game.on_mode_changed();

    assert_eq!(game.current_state(), GameState::Idle);
    assert_eq!(game.last_frame().text, "Click here to start");
}

#[test]
fn trigger_during_result_hold_starts_next_round() {
    let mut game = game_with(InputMode::Pointer, 14);
    game.trigger();
    game.advance(last_delay(&game));
    game.advance(300);
    game.trigger();
    assert_eq!(game.current_state(), GameState::Result);

    game.advance(RESULT_HOLD_MS / 2);
    game.trigger();
    assert_eq!(game.current_state(), GameState::Waiting);

    // The hold that was running must not overwrite "Wait...".
    game.advance(RESULT_HOLD_MS);
    assert_eq!(game.last_frame().text, "Wait...");
}

#[test]
fn target_color_contrasts_with_wait_color() {
    for seed in 0..50 {
        let mut game = game_with(InputMode::Pointer, seed);
        game.trigger();
        let wait_hue = hue_of(game.last_frame().background);
        assert_eq!(wait_hue, game.wait_hue());

        game.advance(last_delay(&game));
        let frame = game.last_frame();
        assert_eq!(frame.foreground, Color::White);
        let target = match frame.background {
            Color::Hsl(hsl) => hsl,
            other => panic!("expected an HSL color, got {other:?}"),
        };
        assert_eq!((target.saturation, target.lightness), (80, 45));
        assert!((135..=225).contains(&hue_shift(wait_hue, target.hue)));
    }
}

#[test]
fn history_lists_most_recent_first() {
    let mut game = game_with(InputMode::Pointer, 15);
    for react_ms in [320, 280, 305] {
        game.trigger();
        game.advance(last_delay(&game));
        game.advance(react_ms);
        game.trigger();
        game.advance(RESULT_HOLD_MS);
    }
    // An early trigger in between leaves the history alone.
    game.trigger();
    game.trigger();

    let shown: Vec<String> = game
        .attempts()
        .most_recent_first()
        .map(ToString::to_string)
        .collect();
    assert_eq!(shown, vec!["305 ms", "280 ms", "320 ms"]);
    assert_eq!(game.attempts().best().map(|a| a.number), Some(2));
    assert!(game.transitions().is_consistent());
}

#[test]
fn preferences_choose_the_starting_prompt() {
    let mut store = MemoryStore::new();
    store.set("inputMode", "keyboard");
    store.set("theme", "dark");

    let prefs = Preferences::load(&store);
    assert_eq!(prefs.theme, Theme::Dark);

    let game = game_with(prefs.input_mode, 16);
    assert_eq!(game.last_frame().text, "Press Enter/Space to start");
}
