//! Flappy Sim entry point
//!
//! Native: runs the simulation headless (or as ASCII frames) with an autopilot
//! doing the flapping. The browser build is driven through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use flappy_sim::consts::SIM_DT;
    use flappy_sim::persistence::FileScore;
    use flappy_sim::renderer::{AsciiRenderer, NullRenderer};
    use flappy_sim::sim::{FixedStepDriver, GamePhase, GameState, SimEvent, Simulation};
    use flappy_sim::{Profile, SimConfig};

    /// Canvas size given as `WIDTHxHEIGHT`
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Size {
        pub width: f32,
        pub height: f32,
    }

    fn parse_size(s: &str) -> Result<Size, String> {
        let (w, h) = s.split_once('x').ok_or_else(|| format!("expected WxH, got {}", s))?;
        let width = w.parse().map_err(|_| format!("bad width {}", w))?;
        let height = h.parse().map_err(|_| format!("bad height {}", h))?;
        Ok(Size { width, height })
    }

    fn parse_profile(s: &str) -> Result<Profile, String> {
        Profile::from_str(s).ok_or_else(|| format!("unknown profile {} (classic or touch)", s))
    }

    /// Headless Flappy Bird with an autopilot
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    pub struct Options {
        /// Built-in profile: classic or touch
        #[arg(long, default_value = "classic", value_parser = parse_profile)]
        pub profile: Profile,
        /// Viewport for the touch profile
        #[arg(long, default_value = "390x844", value_parser = parse_size)]
        pub size: Size,
        /// JSON config file; overrides --profile and --size
        #[arg(long)]
        pub config: Option<PathBuf>,
        /// Print the effective config as JSON and exit
        #[arg(long)]
        pub dump_config: bool,
        /// Write the effective config to FILE and exit
        #[arg(long, value_name = "FILE")]
        pub save_config: Option<PathBuf>,
        #[arg(long, default_value = "flappy_sim_best.json")]
        pub score_file: PathBuf,
        /// RNG seed (random when omitted)
        #[arg(long)]
        pub seed: Option<u64>,
        /// Display frames to simulate
        #[arg(long, default_value_t = 60 * 60)]
        pub frames: u64,
        /// Stop after this many runs
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
        pub runs: u32,
        /// Print an ASCII frame every N display frames (0 = never)
        #[arg(long = "ascii", default_value_t = 0)]
        pub ascii_every: u64,
    }

    impl Options {
        pub fn sim_config(&self) -> Result<SimConfig> {
            match &self.config {
                Some(path) => SimConfig::load(path)
                    .with_context(|| format!("loading config {}", path.display())),
                None => {
                    let Size { width, height } = self.size;
                    let config = SimConfig::from_profile(self.profile, width, height);
                    config.validate()?;
                    Ok(config)
                }
            }
        }
    }

    /// Flap when the bird sinks below the middle of the next gap
    fn autopilot(state: &GameState, config: &SimConfig) -> bool {
        if state.phase != GamePhase::Running {
            return state.phase == GamePhase::NotStarted;
        }
        let bird = &state.bird;
        let gap = state.difficulty.pipe_gap;
        let target = state
            .pipes
            .iter()
            .find(|p| p.right_edge(config.pipe.width) > bird.pos.x)
            .map(|p| p.gap_y + gap * 0.65)
            .unwrap_or(config.canvas_height / 2.0);
        bird.velocity >= 0.0 && bird.pos.y + bird.size.y > target
    }

    pub fn run(opts: Options) -> Result<()> {
        let config = opts.sim_config()?;
        if opts.dump_config {
            println!("{}", config.to_json()?);
            return Ok(());
        }
        if let Some(path) = &opts.save_config {
            config.save(path).with_context(|| format!("saving config {}", path.display()))?;
            return Ok(());
        }

        let seed = opts.seed.unwrap_or_else(rand::random);
        log::info!(
            "Running {} profile ({}x{}) with seed {}",
            config.profile.as_str(),
            config.canvas_width,
            config.canvas_height,
            seed
        );

        let store = FileScore::open(&opts.score_file);
        log::debug!("Best score file: {}", store.path().display());
        let mut sim = Simulation::new(config, store, seed);
        let mut driver = FixedStepDriver::default();
        let mut ascii = AsciiRenderer::new(40, 30);
        let mut runs = 0;

        for frame in 0..opts.frames {
            if autopilot(&sim.state, sim.config()) {
                driver.trigger();
            }

            let show = opts.ascii_every > 0 && frame % opts.ascii_every == 0;
            if show {
                driver.frame(SIM_DT, &mut sim, &mut ascii);
                print!("\x1b[2J\x1b[H{}", ascii.frame_text());
            } else {
                driver.frame(SIM_DT, &mut sim, &mut NullRenderer);
            }

            for event in sim.drain_events() {
                match event {
                    SimEvent::DifficultyRaised {
                        score,
                        pipe_speed,
                        pipe_gap,
                    } => {
                        log::info!("Score {}: speed {:.2}, gap {:.0}", score, pipe_speed, pipe_gap)
                    }
                    SimEvent::NewBest { score } => log::debug!("New best {}", score),
                    SimEvent::GameOver { score, best } => {
                        runs += 1;
                        println!("run {}: score {} (best {})", runs, score, best);
                    }
                    _ => {}
                }
            }

            if sim.phase() == GamePhase::GameOver {
                if runs >= opts.runs {
                    break;
                }
                sim.reset();
            }
        }

        println!("best score: {}", sim.state.best_score());
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Flappy Sim (native) starting...");
    native::run(native::Options::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
