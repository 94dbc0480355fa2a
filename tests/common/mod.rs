//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Once;

use morris_engine::{Action, GameEngine, Outcome, PlayerId, PlayerInfo};
use tracing_subscriber::{fmt, EnvFilter};

pub const ANNA: PlayerId = PlayerId::new(1);
pub const BEN: PlayerId = PlayerId::new(2);

static INIT: Once = Once::new();

/// Install a test subscriber once. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, then `warn`.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Anna (White, opens) against Ben (Black).
pub fn new_engine() -> GameEngine {
    init_logging();
    GameEngine::new(PlayerInfo::new(ANNA, "Anna"), PlayerInfo::new(BEN, "Ben")).unwrap()
}

/// Parse a compact action script.
///
/// Tokens are separated by whitespace: `W` or `B` for the actor, then
/// `P<n>` place, `C<n>` capture or `M<from>-<to>` move, e.g. `WP4 BM9-8 WC2`.
pub fn script(text: &str) -> Vec<(PlayerId, Action)> {
    text.split_whitespace()
        .map(|token| {
            let (who, rest) = token.split_at(1);
            let player = match who {
                "W" => ANNA,
                "B" => BEN,
                other => panic!("unknown actor {other:?} in {token:?}"),
            };
            let (op, args) = rest.split_at(1);
            let action = match op {
                "P" => Action::Place { index: args.parse().unwrap() },
                "C" => Action::Capture { index: args.parse().unwrap() },
                "M" => {
                    let (from, to) = args.split_once('-').unwrap();
                    Action::Move {
                        from: from.parse().unwrap(),
                        to: to.parse().unwrap(),
                    }
                }
                other => panic!("unknown op {other:?} in {token:?}"),
            };
            (player, action)
        })
        .collect()
}

/// Apply every step, panicking on the first rejection. Returns the outcome
/// of the last step.
pub fn replay(engine: &mut GameEngine, text: &str) -> Option<Outcome> {
    let mut last = None;
    for (i, (player, action)) in script(text).into_iter().enumerate() {
        let outcome = engine
            .handle_action(player, action)
            .unwrap_or_else(|e| panic!("step {i} ({action:?} by {player}) rejected: {e}"));
        last = Some(outcome);
    }
    last
}
