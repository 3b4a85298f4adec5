use chaos_game::config::Config;
use chaos_game::engine::ChaosGame;
use chaos_game::{App, HEIGHT, WIDTH};
use speedy2d::Window;

fn main() {
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "bad configuration");
            std::process::exit(1);
        }
    };

    let game = match config.seed {
        Some(seed) => ChaosGame::seeded(config.vertices.clone(), seed),
        None => ChaosGame::new(config.vertices.clone()),
    };
    let game = match game {
        Ok(game) => game.with_speed(config.speed),
        Err(e) => {
            tracing::error!(error = %e, "cannot start chaos game");
            std::process::exit(1);
        }
    };

    tracing::info!(
        vertices = config.vertices.len(),
        seed = ?config.seed,
        speed = game.speed(),
        "chaos game starting"
    );

    let window = Window::new_centered("Chaos game", (WIDTH as u32, HEIGHT as u32))
        .expect("failed to create window");

    let app = App::new(game);

    // run the event loop (this blocks until the window is closed)
    window.run_loop(app);
}
