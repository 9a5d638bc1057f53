use crate::entity::Direction;
use crate::menu::{MenuAction, TitleScreen};
use crate::renderer::Input;
use crate::settings::Settings;
use crate::world::{Viewport, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for the background image; nothing updates or draws.
    Loading,
    TitleScreen,
    Playing,
}

pub struct Game {
    pub viewport: Viewport,
    pub state: GameState,
    pub title: TitleScreen,
    pub world: Option<World>,
    pub settings: Settings,
}

impl Game {
    /// Create a game for `viewport`. With a background image pending the game
    /// starts in `Loading` and waits for [`Game::background_loaded`].
    pub fn new(viewport: Viewport, settings: Settings, awaiting_background: bool) -> Self {
        let title = TitleScreen::new(
            &settings.title,
            &settings.menu_items,
            settings.decoration_seed,
            settings.decoration_count,
        );

        let mut game = Self {
            viewport,
            state: GameState::Loading,
            title,
            world: None,
            settings,
        };

        if !awaiting_background {
            game.enter_first_screen();
        }

        game
    }

    /// One-shot completion of the background image load.
    pub fn background_loaded(&mut self) {
        if self.state != GameState::Loading {
            return;
        }
        log::info!("Background ready");
        self.enter_first_screen();
    }

    fn enter_first_screen(&mut self) {
        if self.settings.show_title_screen {
            log::debug!("Entering title screen");
            self.state = GameState::TitleScreen;
        } else {
            self.start_playing();
        }
    }

    fn start_playing(&mut self) {
        self.state = GameState::Playing;
        self.rebuild_world();
    }

    fn rebuild_world(&mut self) {
        let world = World::build(self.viewport);
        log::debug!(
            "Built world for {}x{} with {} platforms",
            self.viewport.width,
            self.viewport.height,
            world.platforms.len()
        );
        self.world = Some(world);
    }

    fn activate(&mut self, action: Option<MenuAction>) {
        match action {
            Some(MenuAction::Play) => {
                log::info!("Play selected");
                self.start_playing();
            }
            None => {}
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);

        let rebuild = match self.state {
            GameState::Playing => true,
            GameState::TitleScreen => self.settings.rebuild_on_title_resize,
            GameState::Loading => false,
        };
        if rebuild {
            self.rebuild_world();
        }
    }

    pub fn handle_input(&mut self, input: Input) {
        if let Input::Resize { width, height } = input {
            self.resize(width, height);
            return;
        }

        match self.state {
            GameState::Loading => {}
            GameState::TitleScreen => match input {
                Input::Direction(direction @ (Direction::Up | Direction::Down)) => {
                    self.title.navigate(direction);
                }
                Input::Confirm => self.activate(self.title.selected_action()),
                Input::Click { x, y } => self.activate(self.title.action_at(x, y)),
                _ => {}
            },
            GameState::Playing => {
                if let (Input::Direction(direction), Some(world)) = (input, self.world.as_mut()) {
                    world.ball.steer(direction, &self.settings.physics);
                }
            }
        }
    }

    /// Per-frame update for the current state.
    pub fn update(&mut self) {
        match self.state {
            GameState::Loading => {}
            GameState::TitleScreen => self.title.layout(self.viewport),
            GameState::Playing => {
                if let Some(world) = self.world.as_mut() {
                    world.step(&self.settings.physics, self.viewport);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Position;
    use proptest::prelude::*;

    fn title_game() -> Game {
        Game::new(Viewport::new(800.0, 600.0), Settings::default(), false)
    }

    fn playing_game() -> Game {
        let mut game = title_game();
        game.handle_input(Input::Confirm);
        game
    }

    #[test]
    fn test_starts_on_title_screen_without_world() {
        let game = title_game();
        assert_eq!(game.state, GameState::TitleScreen);
        assert!(game.world.is_none());
    }

    #[test]
    fn test_confirm_play_builds_world() {
        let game = playing_game();
        assert_eq!(game.state, GameState::Playing);
        let world = game.world.as_ref().unwrap();
        assert_eq!(world.platforms.len(), 5);
        assert_eq!(world.ball.position, Position::new(400.0, 50.0));
    }

    #[test]
    fn test_confirm_on_inert_item_stays_on_title() {
        let mut game = title_game();
        game.handle_input(Input::Direction(Direction::Down));
        game.handle_input(Input::Confirm);
        assert_eq!(game.state, GameState::TitleScreen);
        assert!(game.world.is_none());
    }

    #[test]
    fn test_up_from_play_wraps_to_last() {
        let mut game = title_game();
        game.handle_input(Input::Direction(Direction::Up));
        assert_eq!(game.title.selected, 3);
    }

    #[test]
    fn test_click_play_ignores_selection() {
        let mut game = title_game();
        game.handle_input(Input::Direction(Direction::Down));
        game.update();

        let play = game.title.items[0].bounds.unwrap();
        game.handle_input(Input::Click {
            x: play.x + 10.0,
            y: play.y + 10.0,
        });

        assert_eq!(game.state, GameState::Playing);
    }

    #[test]
    fn test_click_before_first_layout_does_nothing() {
        let mut game = title_game();
        game.handle_input(Input::Click { x: 500.0, y: 190.0 });
        assert_eq!(game.state, GameState::TitleScreen);
    }

    #[test]
    fn test_first_frame_of_play() {
        let mut game = playing_game();
        game.update();
        let ball = &game.world.as_ref().unwrap().ball;
        assert_eq!(ball.velocity, (0.0, 0.5));
        assert_eq!(ball.position, Position::new(400.0, 50.5));
    }

    #[test]
    fn test_playing_keys_steer_ball() {
        let mut game = playing_game();
        game.handle_input(Input::Direction(Direction::Right));
        game.handle_input(Input::Direction(Direction::Up));
        game.handle_input(Input::Direction(Direction::Up));
        let ball = &game.world.as_ref().unwrap().ball;
        assert_eq!(ball.velocity, (5.0, -12.0));
        assert!(ball.airborne);
    }

    #[test]
    fn test_playing_ignores_menu_inputs() {
        let mut game = playing_game();
        game.handle_input(Input::Direction(Direction::Down));
        game.handle_input(Input::Confirm);
        assert_eq!(game.title.selected, 0);
        assert_eq!(game.state, GameState::Playing);
    }

    #[test]
    fn test_loading_ignores_input_until_background() {
        let mut game = Game::new(Viewport::new(800.0, 600.0), Settings::default(), true);
        assert_eq!(game.state, GameState::Loading);

        game.handle_input(Input::Direction(Direction::Down));
        game.handle_input(Input::Confirm);
        game.update();
        assert_eq!(game.state, GameState::Loading);
        assert_eq!(game.title.selected, 0);
        assert!(game.title.panel.is_none());

        game.background_loaded();
        assert_eq!(game.state, GameState::TitleScreen);

        // Second completion is a no-op
        game.handle_input(Input::Confirm);
        game.background_loaded();
        assert_eq!(game.state, GameState::Playing);
    }

    #[test]
    fn test_loading_still_tracks_resize() {
        let mut game = Game::new(Viewport::new(800.0, 600.0), Settings::default(), true);
        game.handle_input(Input::Resize {
            width: 1024.0,
            height: 768.0,
        });
        assert_eq!(game.viewport, Viewport::new(1024.0, 768.0));
        assert!(game.world.is_none());
    }

    #[test]
    fn test_skip_title_goes_straight_to_play() {
        let settings = Settings {
            show_title_screen: false,
            ..Settings::default()
        };
        let game = Game::new(Viewport::new(800.0, 600.0), settings, false);
        assert_eq!(game.state, GameState::Playing);
        assert!(game.world.is_some());
    }

    #[test]
    fn test_resize_while_playing_rebuilds() {
        let mut game = playing_game();
        for _ in 0..10 {
            game.update();
        }
        game.resize(1000.0, 700.0);
        let world = game.world.as_ref().unwrap();
        assert_eq!(world.ball.position, Position::new(500.0, 50.0));
        assert_eq!(world.platforms[0].position.y, 680.0);
        assert_eq!(world.platforms[0].width, 1000.0);
    }

    #[test]
    fn test_resize_on_title_respects_setting() {
        let mut game = title_game();
        game.resize(1000.0, 700.0);
        assert!(game.world.is_none());

        let settings = Settings {
            rebuild_on_title_resize: true,
            ..Settings::default()
        };
        let mut game = Game::new(Viewport::new(800.0, 600.0), settings, false);
        game.resize(1000.0, 700.0);
        assert_eq!(game.state, GameState::TitleScreen);
        assert_eq!(game.world.as_ref().unwrap().platforms[0].width, 1000.0);
    }

    fn input_strategy() -> impl Strategy<Value = Input> {
        prop_oneof![
            Just(Input::Direction(Direction::Up)),
            Just(Input::Direction(Direction::Down)),
            Just(Input::Direction(Direction::Left)),
            Just(Input::Direction(Direction::Right)),
            Just(Input::Confirm),
            (0.0f64..800.0, 0.0f64..600.0).prop_map(|(x, y)| Input::Click { x, y }),
        ]
    }

    proptest! {
        #[test]
        fn prop_playing_is_terminal(inputs in prop::collection::vec(input_strategy(), 0..80)) {
            let mut game = title_game();
            let mut was_playing = false;

            for input in inputs {
                game.handle_input(input);
                game.update();

                if was_playing {
                    prop_assert_eq!(game.state, GameState::Playing);
                }
                was_playing = game.state == GameState::Playing;
                prop_assert_eq!(was_playing, game.world.is_some());
            }
        }
    }
}
