//! Asteroid Runner headless driver
//!
//! Plays a few runs with an autopilot at a simulated 60 Hz frame clock and
//! logs the session leaderboard. Usage: `asteroid-runner [config.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use asteroid_runner::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
    use asteroid_runner::sim::{Run, TickOutcome};
    use asteroid_runner::{RunnerConfig, SessionScores};
    use glam::Vec2;

    /// Simulated display refresh
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on a run that outlives this (autopilot got lucky)
    const MAX_RUN_SECS: f32 = 300.0;
    const RUNS: u32 = 5;
    /// Meshes "finish loading" a few per frame
    const LOADS_PER_FRAME: usize = 6;
    /// How far ahead the autopilot looks for threats
    const LOOKAHEAD: f32 = 60.0;

    /// Driver state around a single `Run`
    struct Game {
        run: Run,
        accumulator: f32,
        next_load: usize,
    }

    impl Game {
        fn new(run: Run) -> Self {
            Self {
                run,
                accumulator: 0.0,
                next_load: 0,
            }
        }

        /// Emulate asynchronous mesh loads arriving over several frames
        fn pump_loads(&mut self) {
            let total = self.run.count_obstacles();
            let end = (self.next_load + LOADS_PER_FRAME).min(total);
            for index in self.next_load..end {
                self.run.mark_obstacle_loaded(index);
            }
            self.next_load = end;
        }

        /// Command Source: steer away from the closest threat ahead
        fn autopilot(&self) -> Vec2 {
            let player = self.run.player();
            let threat = self
                .run
                .obstacles()
                .iter()
                .filter(|o| o.loaded)
                .filter(|o| {
                    let dz = o.position.z - player.position.z;
                    dz > 0.0 && dz < LOOKAHEAD
                })
                .min_by(|a, b| {
                    let da = (a.position - player.position).truncate().length() - a.radius;
                    let db = (b.position - player.position).truncate().length() - b.radius;
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                });

            match threat {
                Some(o) => {
                    let away = (player.position - o.position).truncate();
                    // Dead-on: pick a side, then drift back toward center
                    let away = if away.length_squared() < 1e-4 { Vec2::X } else { away };
                    away.normalize()
                }
                None => -player.position.truncate() * 0.05,
            }
        }

        /// Advance one display frame. Returns true once the run has ended.
        fn frame(&mut self, dt: f32) -> bool {
            self.pump_loads();
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let command = self.autopilot();
                self.run.steer_player(command, SIM_DT);
                let outcome = self.run.tick(SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                if let TickOutcome::Collided { .. } = outcome {
                    self.accumulator = 0.0;
                    return true;
                }
            }
            self.run.is_ended()
        }
    }

    fn load_config() -> Result<RunnerConfig, asteroid_runner::ConfigError> {
        let mut args = std::env::args().skip(1);
        let mut config = match args.next() {
            Some(path) => RunnerConfig::load(path)?,
            None => RunnerConfig::default(),
        };
        if let Some(seed) = args.next() {
            match seed.parse() {
                Ok(seed) => config.seed = seed,
                Err(_) => log::warn!("Ignoring unparseable seed {:?}", seed),
            }
        }
        Ok(config)
    }

    pub fn main() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Asteroid Runner (headless) starting...");

        let config = match load_config() {
            Ok(config) => config,
            Err(e) => {
                log::error!("Bad config: {}", e);
                std::process::exit(1);
            }
        };
        let seed = config.seed;
        let run = match Run::new(config) {
            Ok(run) => run,
            Err(e) => {
                log::error!("Could not start run: {}", e);
                std::process::exit(1);
            }
        };

        let mut game = Game::new(run);
        let mut scores = SessionScores::new();

        for attempt in 1..=RUNS {
            while !game.frame(FRAME_DT) {
                if game.run.elapsed_time() >= MAX_RUN_SECS {
                    log::info!("Run {} survived the {}s cap", attempt, MAX_RUN_SECS);
                    break;
                }
            }

            let elapsed = game.run.final_time().unwrap_or(game.run.elapsed_time());
            log::info!(
                "Run {}: {:.2}s, {}",
                attempt,
                elapsed,
                asteroid_runner::renderer::debug_overlay_json(&game.run)
            );
            if let Some(rank) = scores.add_run(elapsed, seed) {
                log::info!("New leaderboard entry at rank {}", rank);
            }

            game.run.restart();
            game.run.set_player_position(glam::Vec3::ZERO);
            game.accumulator = 0.0;
        }

        for (i, entry) in scores.entries.iter().enumerate() {
            log::info!("#{:>2} {:>6} pts ({:.2}s)", i + 1, entry.score, entry.elapsed);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a host page; nothing to run here
}
