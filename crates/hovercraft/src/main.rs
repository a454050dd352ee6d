//! Headless hovercraft simulation
//!
//! Usage: `hovercraft [config.toml|config.ron]`

mod config;
mod game;

use config::GameConfig;
use game::Game;
use hover_engine::config::Config;
use hover_engine::foundation::logging;
use hover_engine::foundation::time::{FixedTimestep, Timer};
use hover_engine::assets::MeshLibrary;
use hover_engine::physics::CollisionMeshFactory;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default_filter("info");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            GameConfig::load_from_file(&path)?
        }
        None => GameConfig::default(),
    };
    config.validate()?;

    let mut meshes = MeshLibrary::new();
    let terrain = match &config.simulation.terrain_mesh {
        Some(path) => meshes.load_obj("terrain", path)?,
        None => meshes.insert(
            "terrain",
            CollisionMeshFactory::floor(config.simulation.terrain_half_extent, 0.0),
        ),
    };

    let mut game = Game::new(&config)?;
    game.init(terrain);

    let simulation = &config.simulation;
    let mut timer = Timer::new();
    let mut timestep = FixedTimestep::new(simulation.timestep, simulation.max_steps_per_frame);
    let frame = Duration::try_from_secs_f32(simulation.timestep)?;

    while timer.total_time() < simulation.duration_seconds {
        std::thread::sleep(frame);
        timer.update();

        for _ in 0..timestep.advance(timer.delta_time()) {
            game.update(timestep.step());
        }
    }

    log::info!(
        "Simulated {:.2}s over {} frames with {} entities; hovercraft at {:?}, velocity {:?}",
        timer.total_time(),
        timer.frame_count(),
        game.world().entity_count(),
        game.hovercraft_position(),
        game.hovercraft_velocity()
    );
    Ok(())
}
