#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::Parser;
    use platformer::{CliRenderer, Game, Input, Renderer, Settings};
    use std::io;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    // Game logic update rate (one physics step per display frame)
    const GAME_UPDATE_RATE: Duration = Duration::from_millis(16);

    /// Terminal edition of the ball platformer
    #[derive(Parser, Debug)]
    #[command(version)]
    struct Args {
        /// JSON settings file
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Start playing immediately instead of showing the title screen
        #[arg(long)]
        skip_title: bool,

        /// Rebuild the world when the terminal is resized on the title screen
        #[arg(long)]
        rebuild_on_title_resize: bool,
    }

    pub fn run() -> io::Result<()> {
        env_logger::init();
        let args = Args::parse();

        let mut settings = match &args.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if args.skip_title {
            settings.show_title_screen = false;
        }
        if args.rebuild_on_title_resize {
            settings.rebuild_on_title_resize = true;
        }

        let mut renderer = CliRenderer::new()?;
        // No background image in the terminal, so no loading screen
        let mut game = Game::new(renderer.viewport(), settings, false);
        log::info!("Starting at {:?} in {:?}", game.viewport, game.state);

        renderer.init()?;

        let mut last_game_update = Instant::now();

        loop {
            // Poll for input
            if let Some(input) = renderer.poll_input()? {
                match input {
                    Input::Quit => break,
                    input => game.handle_input(input),
                }
            }

            // Update game logic at fixed rate
            if last_game_update.elapsed() >= GAME_UPDATE_RATE {
                game.update();
                last_game_update = Instant::now();
            }

            // Let renderer decide when to actually render
            // (it manages its own frame rate internally)
            renderer.render(&game)?;
        }

        renderer.cleanup()?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
