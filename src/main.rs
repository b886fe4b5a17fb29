//! Jet Gates headless driver
//!
//! Runs the simulation natively with an autopilot at a fixed 60 Hz frame
//! cadence and reports the run. Rendering lives in the web frontend.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;

    use jet_gates::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
    use jet_gates::platform::{HostShell, Key, LogShell, RawInput, map_input};
    use jet_gates::sim::{Command, Field, Game, GameEvent, Mode, Snapshot};
    use jet_gates::{Settings, Tuning};

    /// Display frame period of the driver
    const FRAME_DT: f32 = 1.0 / 60.0;

    #[derive(Parser, Debug)]
    #[command(name = "jet-gates")]
    #[command(about = "Headless jetpack run with an autopilot")]
    struct Cli {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// Seconds of play before giving up on a run
        #[arg(long, default_value_t = 60.0)]
        seconds: f32,
        /// Number of runs (retries after each crash)
        #[arg(long, default_value_t = 1)]
        runs: u32,
        #[arg(long, default_value_t = 360.0)]
        width: f32,
        #[arg(long, default_value_t = 640.0)]
        height: f32,
        /// Balance overrides (JSON)
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Player preferences (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Best-score store (JSON); in-memory when omitted
        #[arg(long)]
        store: Option<PathBuf>,
    }

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let cli = Cli::parse();

        if !(cli.width > 0.0 && cli.height > 0.0) {
            bail!("field size must be positive, got {}x{}", cli.width, cli.height);
        }
        if !(cli.seconds > 0.0) {
            bail!("--seconds must be positive");
        }

        let tuning = match &cli.tuning {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading tuning {}", path.display()))?;
                Tuning::from_json(&json).with_context(|| format!("parsing tuning {}", path.display()))?
            }
            None => Tuning::default(),
        };
        let settings = cli
            .settings
            .as_deref()
            .map(Settings::load_from)
            .unwrap_or_default();
        let store: Box<dyn KeyValueStore> = match &cli.store {
            Some(path) => Box::new(JsonFileStore::open(path)),
            None => Box::new(MemoryStore::default()),
        };
        let seed = cli.seed.unwrap_or_else(time_seed);

        log::info!("Jet Gates (native) starting, seed {}", seed);
        let mut game = Game::new(store, tuning, Field::new(cli.width, cli.height), seed);
        let frames_per_run = (cli.seconds / FRAME_DT).ceil() as u64;

        for run in 1..=cli.runs {
            press(&mut game, RawInput::KeyDown { key: Key::Space, repeat: false });
            let mut peak_shake = 0.0f32;

            for _ in 0..frames_per_run {
                let thrust = autopilot(&game.snapshot());
                if thrust != game.thrust_held() {
                    let input = if thrust {
                        RawInput::KeyDown { key: Key::Space, repeat: false }
                    } else {
                        RawInput::KeyUp { key: Key::Space }
                    };
                    press(&mut game, input);
                }

                game.frame(FRAME_DT);
                let snap = game.snapshot();
                peak_shake = peak_shake.max(settings.shake_magnitude(&snap.shake));
                for event in snap.events {
                    match event {
                        GameEvent::ShieldNudge => log::info!("shield saved the run"),
                        GameEvent::ShieldCollected { .. } => log::debug!("shield up"),
                        _ => log::trace!("{:?}", event),
                    }
                }
                if snap.mode == Mode::GameOver {
                    break;
                }
            }

            match game.last_run().filter(|_| game.mode() == Mode::GameOver) {
                Some(summary) => log::info!(
                    "run {}: crashed with score {} ({} coins), best {}{}",
                    run,
                    summary.score,
                    summary.coins,
                    summary.best,
                    if summary.new_best { " (new best!)" } else { "" }
                ),
                None => {
                    let snap = game.snapshot();
                    log::info!(
                        "run {}: survived {:.0}s with score {} ({} coins)",
                        run,
                        snap.elapsed,
                        snap.score,
                        snap.coins_taken
                    );
                }
            }
            log::debug!("run {} peak shake {:.1}", run, peak_shake);

            press(&mut game, RawInput::KeyUp { key: Key::Space });
            game.apply(Command::NavigateToMenu);
        }

        LogShell.navigate_back();
        Ok(())
    }

    fn press<S: KeyValueStore>(game: &mut Game<S>, input: RawInput) {
        for command in map_input(input, game.mode()) {
            game.apply(command);
        }
    }

    /// Thrust while below the next gap center (or mid-field with no gate ahead)
    fn autopilot(snap: &Snapshot<'_>) -> bool {
        let player = snap.player;
        let behind = player.pos.x - snap.tuning.player_box_w / 2.0;
        let target = snap
            .gates
            .iter()
            .find(|g| g.x() + snap.tuning.gate_w >= behind)
            .map(|g| g.gap_y())
            .unwrap_or(snap.field.height / 2.0);
        // Lead the fall a little so the pilot doesn't bob into the blocks
        player.pos.y + player.vel_y * 0.12 > target
    }

    fn time_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    jet_gates::platform::init_web_logging();
    let settings = jet_gates::Settings::load();
    log::info!(
        "Jet Gates core loaded (screen shake {}); the web frontend drives the game loop",
        if settings.effective_screen_shake() { "on" } else { "off" }
    );
}
