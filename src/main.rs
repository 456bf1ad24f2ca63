//! Lumberjack Run entry point
//!
//! In the browser the page drives `web::WebGame` and this binary is empty.
//! Natively it runs the simulation headless on a fixed 60 Hz virtual clock
//! with a simple autopilot, which is handy for checking balance and
//! reproducing seeds.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result, anyhow};
    use clap::Parser;

    use lumberjack_run::{CheckpointPolicy, Settings};
    use lumberjack_run::sim::{GameEvent, GamePhase, GameState, Key, TickInput, UiAction, tick};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// How far ahead of the player's feet the autopilot looks for a landing
    const LOOKAHEAD: f32 = 90.0;

    #[derive(Parser, Debug)]
    #[command(name = "lumberjack-run")]
    #[command(about = "Run Lumberjack Run headless with an autopilot")]
    struct Cli {
        /// Number of 60 Hz ticks to simulate
        #[arg(long, default_value_t = 3600)]
        ticks: u64,
        /// RNG seed (falls back to the settings file, then the clock)
        #[arg(long)]
        seed: Option<u64>,
        /// JSON settings file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Checkpoint policy override: "exact" or "pinned-3"
        #[arg(long)]
        checkpoint: Option<String>,
        /// Restarts from the checkpoint allowed after dying
        #[arg(long, default_value_t = 3)]
        restarts: u32,
        /// Print the final snapshot as JSON
        #[arg(long)]
        dump: bool,
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let mut settings = match &cli.settings {
            Some(path) => Settings::load_from_path(path)?,
            None => Settings::default(),
        };
        if let Some(name) = &cli.checkpoint {
            settings.checkpoint_policy = CheckpointPolicy::from_str(name)
                .ok_or_else(|| anyhow!("unknown checkpoint policy: {name}"))?;
        }
        let seed = cli.seed.or(settings.seed).unwrap_or_else(clock_seed);
        log::info!(
            "Starting headless run with seed: {seed}, checkpoint policy: {}",
            settings.checkpoint_policy.as_str()
        );

        let mut state = GameState::new(settings, seed);
        let mut restarts_left = cli.restarts;
        let mut now_ms = 0.0;

        for _ in 0..cli.ticks {
            let input = autopilot(&state);
            tick(&mut state, &input, now_ms);
            now_ms += FRAME_MS;

            for event in state.drain_events() {
                log::info!("{event:?}");
                if let GameEvent::Died { .. } = event {
                    if restarts_left > 0 {
                        restarts_left -= 1;
                        state.apply_action(UiAction::Restart, now_ms);
                    }
                }
            }

            if matches!(state.phase, GamePhase::Won)
                || (matches!(state.phase, GamePhase::GameOver) && restarts_left == 0)
            {
                break;
            }
        }

        println!(
            "phase={:?} level={} score={} time={}",
            state.phase,
            state.level,
            state.score,
            state.timer.formatted(now_ms)
        );

        if cli.dump {
            let json = serde_json::to_string_pretty(&state.snapshot(now_ms))
                .context("Failed to serialize snapshot")?;
            println!("{json}");
        }
        Ok(())
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    /// Walk right while there is footing ahead and jump toward the next surface
    fn autopilot(state: &GameState) -> TickInput {
        match state.phase {
            GamePhase::Loading => return TickInput::default(),
            GamePhase::Title => return TickInput::pressing(Key::Jump),
            GamePhase::Playing => {}
            GamePhase::GameOver | GamePhase::Won => return TickInput::default(),
        }

        let player = &state.player;
        let geometry = &state.geometry;
        let rect = player.rect();
        let supported = player.on_ground || player.on_log;

        // Airborne: keep drifting toward the target
        if !supported {
            return TickInput::holding(&[Key::Right]);
        }

        let ahead = rect.right() + LOOKAHEAD;
        let landing_ahead = state
            .logs
            .iter()
            .map(|log| log.rect())
            .chain(std::iter::once(geometry.island))
            .any(|surface| surface.left() > rect.left() && surface.left() < ahead)
            || geometry.on_end_bank(ahead);

        // The ground under the player runs out within one stride
        let edge_near = geometry.in_water_span(rect.right() + player.speed * 4.0);

        if edge_near && !landing_ahead {
            // Wait on solid ground for something to jump onto
            return TickInput::default();
        }

        let mut input = TickInput::holding(&[Key::Right]);
        if edge_near {
            input.held.insert(Key::Jump);
            input.pressed.insert(Key::Jump);
        }
        input
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is `web::start` via wasm_bindgen
}
