//! Platformer2D - Headless demo runner
//!
//! Runs two scripted players around the test course and logs what the
//! character controller does with them.
//!
//! ```text
//! platformer2d [config.toml]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use platformer2d_game::{Level, PlayerInput, Simulation, SimulationConfig, SimulationEvent, TriggerEvent};

/// How many ticks the demo runs for.
const DEMO_TICKS: u64 = 480;

/// One stretch of held input.
struct Phase {
    ticks: u64,
    input: PlayerInput,
}

impl Phase {
    fn new(ticks: u64, input: PlayerInput) -> Self {
        Self { ticks, input }
    }
}

/// Scripted input for one player, repeated from the start once exhausted.
struct Script {
    phases: Vec<Phase>,
}

impl Script {
    fn input_at(&self, frame: u64) -> PlayerInput {
        let total: u64 = self.phases.iter().map(|p| p.ticks).sum();
        if total == 0 {
            return PlayerInput::default();
        }

        let mut t = frame % total;
        for phase in &self.phases {
            if t < phase.ticks {
                return PlayerInput { frame, ..phase.input };
            }
            t -= phase.ticks;
        }
        PlayerInput::default()
    }
}

fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: SimulationConfig =
        toml::from_str(&content).with_context(|| format!("failed to parse config file {}", path.display()))?;

    log::info!("loaded config from {}", path.display());
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1);
    let config = load_config(config_path.as_deref().map(Path::new))?;
    log::info!(
        "tick rate {} Hz, skin width {}, slope limit {}",
        config.tick_rate,
        config.controller.skin_width,
        config.controller.slope_limit
    );

    let mut simulation = Simulation::new(config, Level::test_course()).context("invalid controller config")?;
    log::info!("level: {}", simulation.level.name);

    // Runner heads up the ramp towards the goal, the hopper works the
    // one-way platform.
    let runner = simulation.add_player("Runner");
    let hopper = simulation.add_player("Hopper");

    let scripts = [
        Script {
            phases: vec![
                Phase::new(240, PlayerInput::right()),
                Phase::new(30, PlayerInput::default()),
                Phase::new(1, PlayerInput::jump()),
                Phase::new(209, PlayerInput::left()),
            ],
        },
        Script {
            phases: vec![
                Phase::new(20, PlayerInput::default()),
                Phase::new(1, PlayerInput::jump()),
                Phase::new(80, PlayerInput::default()),
                Phase::new(10, PlayerInput::down()),
                Phase::new(60, PlayerInput::left()),
            ],
        },
    ];

    for _ in 0..DEMO_TICKS {
        let frame = simulation.frame;
        let inputs: Vec<PlayerInput> = scripts.iter().map(|s| s.input_at(frame)).collect();

        for event in simulation.tick(&inputs) {
            match event {
                SimulationEvent::Landed { player, position } => {
                    log::info!("[{frame}] player {player} landed at ({:.2}, {:.2})", position.x, position.y);
                }
                SimulationEvent::Trigger { player, event: TriggerEvent::Enter(_), name } => {
                    log::info!("[{frame}] player {player} entered '{name}'");
                }
                SimulationEvent::Trigger { player, event: TriggerEvent::Exit(_), name } => {
                    log::info!("[{frame}] player {player} left '{name}'");
                }
                SimulationEvent::Trigger { .. } => {}
                SimulationEvent::Collision { player, hit } => {
                    if !hit.is_flat_ground() {
                        log::debug!(
                            "[{frame}] player {player} hit collider {:?} at {:.1} degrees",
                            hit.collider,
                            hit.angle_from_up()
                        );
                    }
                }
            }
        }
    }

    for id in [runner, hopper] {
        if let Some(player) = simulation.get_player(id) {
            log::info!(
                "{} finished at ({:.2}, {:.2}), {}",
                player.name,
                player.position().x,
                player.position().y,
                player.controller.state()
            );
        }
    }

    Ok(())
}
