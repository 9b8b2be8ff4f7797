//! Coin Hopper headless runner
//!
//! Runs the simulation without a renderer, steered by a simple autopilot,
//! and logs HUD changes. Usage: `coin-hopper [settings.json] [ticks]`

use coin_hopper::consts::SIM_DT;
use coin_hopper::sim::{ArcadeWorld, GameStateMachine, LevelCatalog, PhysicsWorld, TickInput};
use coin_hopper::{Hud, Result, ScoreSink, Settings};

/// Ten simulated minutes
const DEFAULT_TICKS: u64 = 60 * 60 * 10;

/// Horizontal distance at which the autopilot stops steering
const STEER_DEADZONE: f32 = 4.0;

fn main() {
    env_logger::init();
    log::info!("Coin Hopper (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let ticks = args
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let world = ArcadeWorld::from_settings(&settings);
    let mut game = GameStateMachine::new(LevelCatalog::builtin(), world, Hud::new(), &settings)?;
    game.start()?;

    let mut last_revision = 0;
    let mut levels_cleared = 0u32;
    for _ in 0..ticks {
        let input = autopilot(&game);
        let report = game.tick(&input, SIM_DT)?;
        if report.level_loaded {
            levels_cleared += 1;
        }

        let hud = game.sink();
        if hud.revision != last_revision {
            last_revision = hud.revision;
            log::info!("{}", hud.text());
        }
    }

    log::info!(
        "Finished {ticks} ticks: {levels_cleared} levels cleared, now on level {}",
        game.state().level_number()
    );
    game.teardown();
    Ok(())
}

/// Walk toward the nearest coin, jump when it is above us
fn autopilot<W: PhysicsWorld, S: ScoreSink>(game: &GameStateMachine<W, S>) -> TickInput {
    let Some(player) = game.player_position() else {
        return TickInput::default();
    };
    let Some(target) = game
        .coin_positions()
        .into_iter()
        .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)))
    else {
        return TickInput::default();
    };

    let dx = target.x - player.x;
    TickInput {
        left: dx < -STEER_DEADZONE,
        right: dx > STEER_DEADZONE,
        // Coins above the head need a jump; y grows downward
        up: target.y < player.y - 24.0 && game.is_player_grounded(),
    }
}
